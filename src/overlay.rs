//! Annotations drawn onto the displayed frame.

use crate::ground::GroundPoint;
use crate::modules::{Candidate, Contour};
use crate::swarm::SwarmMember;

use opencv::core::{self, Mat, Point, Rect, Scalar, Vec3b, Vector};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::Result;

const RED: (f64, f64, f64) = (0., 0., 255.);
const GREEN: (f64, f64, f64) = (0., 255., 0.);
const BLUE: (f64, f64, f64) = (255., 0., 0.);
const ORANGE: (f64, f64, f64) = (0., 165., 255.);
const AMBER: (f64, f64, f64) = (0., 100., 255.);
const YELLOW: (f64, f64, f64) = (0., 255., 255.);
const LEAF: (f64, f64, f64) = (55., 200., 0.);
const CYAN: (f64, f64, f64) = (255., 255., 0.);

const AXIS_LENGTH: i32 = 20;

fn bgr(color: (f64, f64, f64)) -> Scalar {
	Scalar::new(color.0, color.1, color.2, 0.)
}

fn dot(frame: &mut Mat, at: Point, radius: i32, color: (f64, f64, f64)) -> Result<()> {
	imgproc::circle(frame, at, radius, bgr(color), imgproc::FILLED, imgproc::LINE_8, 0)
}

fn arrow(frame: &mut Mat, from: Point, to: Point, color: (f64, f64, f64), thickness: i32) -> Result<()> {
	imgproc::arrowed_line(frame, from, to, bgr(color), thickness, imgproc::LINE_8, 0, 0.1)
}

/// Optical centre with +x (blue) and +y (green) ground axes.
pub fn draw_axes(frame: &mut Mat, center: Point) -> Result<()> {
	dot(frame, center, 5, RED)?;
	arrow(frame, center, Point::new(center.x, center.y - AXIS_LENGTH), GREEN, 3)?;
	arrow(frame, center, Point::new(center.x + AXIS_LENGTH, center.y), BLUE, 3)
}

pub fn draw_robot(frame: &mut Mat, at: Point, radius: i32) -> Result<()> {
	dot(frame, at, radius, RED)?;
	dot(frame, at, radius - radius / 7, AMBER)
}

pub fn draw_candidates(frame: &mut Mat, candidates: &[Candidate]) -> Result<()> {
	let cnts: Vector<Contour> = candidates.iter().map(|c| c.cnt.clone()).collect();
	imgproc::draw_contours(frame, &cnts, -1, bgr(ORANGE), 2, imgproc::LINE_8, &Mat::default(), i32::MAX, Point::new(0, 0))
}

pub fn draw_member(frame: &mut Mat, member: &SwarmMember, robot: Option<Point>) -> Result<()> {
	dot(frame, member.position, 14, GREEN)?;
	dot(frame, member.position, 12, LEAF)?;
	if let Some(robot) = robot {
		arrow(frame, member.position, robot, LEAF, 2)?;
	}
	Ok(())
}

pub fn draw_label(frame: &mut Mat, text: &str, origin: Point) -> Result<()> {
	imgproc::put_text(frame, text, origin, imgproc::FONT_HERSHEY_SIMPLEX, 0.7, bgr(YELLOW), 2, imgproc::LINE_8, false)
}

pub fn draw_readout(frame: &mut Mat, ground: GroundPoint) -> Result<()> {
	draw_label(frame, &format!("X: {:.2}m  Y: {:.2}m", ground.x, ground.y), Point::new(10, 30))
}

pub fn draw_fps(frame: &mut Mat, fps: f64) -> Result<()> {
	let y = frame.rows() / 8;
	imgproc::put_text(frame, &format!("{}", fps as usize), Point::new(10, y), imgproc::FONT_HERSHEY_DUPLEX, 0.5, bgr(CYAN), 2, imgproc::LINE_8, false)
}

/// Two small swatches showing the HSV band limits in the top corner.
pub fn draw_hsv_bounds(frame: &mut Mat, lower: [u8; 3], upper: [u8; 3]) -> Result<()> {
	for (x, hsv) in [(5, lower), (15, upper)] {
		let color = hsv_to_bgr(hsv)?;
		imgproc::rectangle(frame, Rect::new(x, 5, 6, 6), color, imgproc::FILLED, imgproc::LINE_8, 0)?;
	}
	Ok(())
}

fn hsv_to_bgr(hsv: [u8; 3]) -> Result<Scalar> {
	let swatch = Mat::new_rows_cols_with_default(1, 1, core::CV_8UC3, Scalar::new(hsv[0] as f64, hsv[1] as f64, hsv[2] as f64, 0.))?;
	let mut converted = Mat::default();
	imgproc::cvt_color_def(&swatch, &mut converted, imgproc::COLOR_HSV2BGR)?;
	let px = converted.at_2d::<Vec3b>(0, 0)?;
	Ok(Scalar::new(px[0] as f64, px[1] as f64, px[2] as f64, 0.))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::blank_frame;

	#[test]
	fn robot_marker_is_filled() {
		let mut frame = blank_frame(100, 100).unwrap();
		draw_robot(&mut frame, Point::new(50, 50), 14).unwrap();
		let inner = frame.at_2d::<Vec3b>(50, 50).unwrap();
		assert_eq!((inner[0], inner[1], inner[2]), (0, 100, 255));
		let rim = frame.at_2d::<Vec3b>(50, 63).unwrap();
		assert_eq!((rim[0], rim[1], rim[2]), (0, 0, 255));
	}

	#[test]
	fn hsv_swatch_converts_to_bgr() {
		// OpenCV hue 0 at full saturation is pure red
		assert_eq!(hsv_to_bgr([0, 255, 255]).unwrap(), Scalar::new(0., 0., 255., 0.));
	}
}
