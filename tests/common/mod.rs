use opencv::core::{self, Mat, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use sauron::modules::OutputModule;

use std::io;

pub fn frame_with(rects: &[(Rect, (f64, f64, f64))]) -> Mat {
	let mut frame = Mat::new_rows_cols_with_default(480, 640, core::CV_8UC3, Scalar::all(0.)).unwrap();
	for (rect, bgr) in rects {
		imgproc::rectangle(&mut frame, *rect, Scalar::new(bgr.0, bgr.1, bgr.2, 0.), imgproc::FILLED, imgproc::LINE_8, 0).unwrap();
	}
	frame
}

/// Keeps every datagram instead of putting it on the wire.
#[derive(Default)]
pub struct Recorder {
	pub sent: Vec<String>,
}

impl OutputModule for Recorder {
	fn run(&mut self, payload: &[u8]) -> io::Result<usize> {
		self.sent.push(String::from_utf8(payload.to_vec()).unwrap());
		Ok(payload.len())
	}
}
