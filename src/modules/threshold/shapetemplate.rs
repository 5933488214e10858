use crate::modules::ThresholdModule;
use crate::settings::ShapeSettings;

use opencv::core::{Mat, Point, Size, BORDER_CONSTANT};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::Result;

/// Bright silhouette on a dark background. Grayscale, blur, fixed luminance
/// cut, then an opening to drop speckle and a closing to fill small gaps.
pub struct ShapeTemplate {
	blur: i32,
	luminance: f64,
	open_iterations: i32,
	close_iterations: i32,
	clean_kernel: Mat,
	fill_kernel: Mat,
}

impl ThresholdModule for ShapeTemplate {
	fn run(&mut self, frame: &Mat) -> Result<Mat> {
		let mut gray = Mat::default();
		imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;

		let mut blurred = Mat::default();
		imgproc::gaussian_blur_def(&gray, &mut blurred, Size::new(self.blur, self.blur), 0.)?;

		let mut binary = Mat::default();
		imgproc::threshold(&blurred, &mut binary, self.luminance, 255., imgproc::THRESH_BINARY)?;

		let border = imgproc::morphology_default_border_value()?;
		let mut opened = Mat::default();
		imgproc::morphology_ex(&binary, &mut opened, imgproc::MORPH_OPEN, &self.clean_kernel, Point::new(-1, -1), self.open_iterations, BORDER_CONSTANT, border)?;

		let mut closed = Mat::default();
		imgproc::morphology_ex(&opened, &mut closed, imgproc::MORPH_CLOSE, &self.fill_kernel, Point::new(-1, -1), self.close_iterations, BORDER_CONSTANT, border)?;

		Ok(closed)
	}
}

impl ShapeTemplate {
	pub fn new(settings: &ShapeSettings) -> Result<Self> {
		Ok(Self {
			blur: settings.blur,
			luminance: settings.luminance,
			open_iterations: settings.open_iterations,
			close_iterations: settings.close_iterations,
			clean_kernel: imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(3, 3), Point::new(-1, -1))?,
			fill_kernel: imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(5, 5), Point::new(-1, -1))?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{blank_frame, fill_rect};
	use opencv::core;

	fn segment(frame: &Mat) -> Mat {
		ShapeTemplate::new(&ShapeSettings::default()).unwrap().run(frame).unwrap()
	}

	#[test]
	fn bright_body_becomes_foreground() {
		let mut frame = blank_frame(480, 640).unwrap();
		fill_rect(&mut frame, 200, 150, 200, 120, 255.).unwrap();

		let mask = segment(&frame);
		assert_eq!(*mask.at_2d::<u8>(210, 300).unwrap(), 255);
		assert_eq!(*mask.at_2d::<u8>(20, 20).unwrap(), 0);
	}

	#[test]
	fn grey_body_stays_under_the_cut() {
		let mut frame = blank_frame(480, 640).unwrap();
		fill_rect(&mut frame, 200, 150, 200, 120, 180.).unwrap();

		assert_eq!(core::count_non_zero(&segment(&frame)).unwrap(), 0);
	}

	#[test]
	fn opening_removes_speckle() {
		let mut frame = blank_frame(480, 640).unwrap();
		fill_rect(&mut frame, 200, 150, 200, 120, 255.).unwrap();
		// a 6x6 glint survives the blur and threshold but not four erosions
		fill_rect(&mut frame, 50, 400, 6, 6, 255.).unwrap();

		let mask = segment(&frame);
		assert_eq!(*mask.at_2d::<u8>(403, 53).unwrap(), 0);
		assert_eq!(*mask.at_2d::<u8>(210, 300).unwrap(), 255);
	}

	#[test]
	fn closing_fills_a_narrow_gap() {
		let mut frame = blank_frame(480, 640).unwrap();
		fill_rect(&mut frame, 200, 150, 200, 120, 255.).unwrap();
		// dark seam two pixels wide across the body
		fill_rect(&mut frame, 299, 150, 2, 120, 0.).unwrap();

		let mask = segment(&frame);
		assert_eq!(*mask.at_2d::<u8>(210, 300).unwrap(), 255);
	}
}
