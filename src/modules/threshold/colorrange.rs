use crate::modules::ThresholdModule;
use crate::settings::ColorSettings;

use opencv::core::{self, Mat, Point, Scalar, Size, BORDER_CONSTANT};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::Result;

/// Blurred HSV band check followed by erode/dilate cleanup.
pub struct ColorRange {
	blur: i32,
	color_l: [u8; 3],
	color_u: [u8; 3],
	iterations: i32,
	kernel: Mat,
}

impl ThresholdModule for ColorRange {
	fn run(&mut self, frame: &Mat) -> Result<Mat> {
		let mut blurred = Mat::default();
		imgproc::gaussian_blur_def(frame, &mut blurred, Size::new(self.blur, self.blur), 0.)?;

		let mut hsv = Mat::default();
		imgproc::cvt_color_def(&blurred, &mut hsv, imgproc::COLOR_BGR2HSV)?;

		let mut mask = Mat::default();
		core::in_range(&hsv, &to_scalar(self.color_l), &to_scalar(self.color_u), &mut mask)?;

		let border = imgproc::morphology_default_border_value()?;
		let mut eroded = Mat::default();
		imgproc::erode(&mask, &mut eroded, &self.kernel, Point::new(-1, -1), self.iterations, BORDER_CONSTANT, border)?;
		imgproc::dilate(&eroded, &mut mask, &self.kernel, Point::new(-1, -1), self.iterations, BORDER_CONSTANT, border)?;

		Ok(mask)
	}
}

impl ColorRange {
	pub fn new(settings: &ColorSettings) -> Result<Self> {
		Ok(Self {
			blur: settings.blur,
			color_l: settings.lower,
			color_u: settings.upper,
			iterations: settings.cleanup_iterations,
			kernel: imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(3, 3), Point::new(-1, -1))?,
		})
	}
}

fn to_scalar(color: [u8; 3]) -> Scalar {
	Scalar::new(color[0] as f64, color[1] as f64, color[2] as f64, 0.)
}
