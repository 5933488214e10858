use opencv::core::{self, Mat, Point, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::Result;

use crate::modules::{extract_candidates, Candidate};

pub fn blank_mask(rows: i32, cols: i32) -> Result<Mat> {
	Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC1, Scalar::all(0.))
}

pub fn blank_frame(rows: i32, cols: i32) -> Result<Mat> {
	Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC3, Scalar::all(0.))
}

pub fn fill_rect(img: &mut Mat, x: i32, y: i32, width: i32, height: i32, value: f64) -> Result<()> {
	imgproc::rectangle(img, Rect::new(x, y, width, height), Scalar::all(value), imgproc::FILLED, imgproc::LINE_8, 0)
}

pub fn fill_circle(img: &mut Mat, x: i32, y: i32, radius: i32) -> Result<()> {
	imgproc::circle(img, Point::new(x, y), radius, Scalar::all(255.), imgproc::FILLED, imgproc::LINE_8, 0)
}

/// The single candidate of a mask holding one blob.
pub fn only_candidate(mask: &Mat) -> Result<Candidate> {
	let mut candidates = extract_candidates(mask)?;
	assert_eq!(candidates.len(), 1, "expected exactly one blob");
	Ok(candidates.remove(0))
}
