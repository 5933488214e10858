use crate::modules::InputModule;
use crate::settings::InputSettings;

use opencv::core::{self, Mat};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use opencv::Result;
use tracing::info;

pub struct Camera {
	cap: VideoCapture,
	mirror: bool,
}

impl InputModule for Camera {
	fn run(&mut self) -> Result<Option<Mat>> {
		let mut frame = Mat::default();
		if !self.cap.read(&mut frame)? || frame.empty() {
			return Ok(None);
		}

		if self.mirror {
			let mut flipped = Mat::default();
			core::flip(&frame, &mut flipped, 1)?;
			return Ok(Some(flipped));
		}
		Ok(Some(frame))
	}
}

impl Camera {
	pub fn open(settings: &InputSettings) -> Result<Self> {
		let mut cap = VideoCapture::new(settings.device, videoio::CAP_ANY)?;
		if !cap.is_opened()? {
			return Err(opencv::Error::new(core::StsError, format!("camera {} could not be opened", settings.device)));
		}
		cap.set(videoio::CAP_PROP_FRAME_WIDTH, settings.width as f64)?;
		cap.set(videoio::CAP_PROP_FRAME_HEIGHT, settings.height as f64)?;

		info!(
			"camera {} streaming at {}x{}",
			settings.device,
			cap.get(videoio::CAP_PROP_FRAME_WIDTH)?,
			cap.get(videoio::CAP_PROP_FRAME_HEIGHT)?
		);

		Ok(Self {
			cap,
			mirror: settings.mirror,
		})
	}
}
