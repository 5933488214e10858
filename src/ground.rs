//! Pixel to ground-plane conversion for a camera looking straight down at a
//! flat surface a known distance below it. No distortion correction.

use crate::settings::{CameraSettings, InputSettings};

use opencv::core::Point;

/// Metres from the point under the optical centre; x right, y up the image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundPoint {
	pub x: f64,
	pub y: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
	center_x: f64,
	center_y: f64,
	mount_height_m: f64,
	focal_px: f64,
}

impl Projection {
	pub fn new(frame_width_px: i32, frame_height_px: i32, mount_height_m: f64, fov_deg: f64) -> Self {
		let center_x = frame_width_px as f64 / 2.;
		Self {
			center_x,
			center_y: frame_height_px as f64 / 2.,
			mount_height_m,
			focal_px: center_x / (fov_deg.to_radians() / 2.).tan(),
		}
	}

	pub fn from_settings(input: &InputSettings, camera: &CameraSettings) -> Self {
		Self::new(input.width, input.height, camera.height_m, camera.fov_deg)
	}

	pub fn focal_px(&self) -> f64 {
		self.focal_px
	}

	pub fn center(&self) -> (f64, f64) {
		(self.center_x, self.center_y)
	}

	pub fn to_ground(&self, pixel_x: f64, pixel_y: f64) -> GroundPoint {
		let x_px = pixel_x - self.center_x;
		let y_px = self.center_y - pixel_y;

		GroundPoint {
			x: x_px * self.mount_height_m / self.focal_px,
			y: y_px * self.mount_height_m / self.focal_px,
		}
	}

	pub fn point_to_ground(&self, p: Point) -> GroundPoint {
		self.to_ground(p.x as f64, p.y as f64)
	}
}
