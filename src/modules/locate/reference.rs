use crate::modules::locate::largest;
use crate::modules::{extract_candidates, Contour};

use opencv::core::Mat;
use opencv::imgcodecs;
use opencv::imgproc;
use opencv::prelude::*;
use opencv::Result;
use tracing::{info, warn};

use std::path::Path;

/// Template outline the shape matcher compares candidates against.
#[derive(Debug, Clone)]
pub struct ReferenceShape {
	cnt: Contour,
}

impl ReferenceShape {
	pub fn from_contour(cnt: Contour) -> Self {
		Self { cnt }
	}

	/// Dominant outline of a silhouette image, thresholded at `threshold`.
	pub fn from_image(image: &Mat, threshold: f64) -> Result<Option<Self>> {
		let gray = if image.channels() == 1 {
			image.try_clone()?
		} else {
			let mut gray = Mat::default();
			imgproc::cvt_color_def(image, &mut gray, imgproc::COLOR_BGR2GRAY)?;
			gray
		};

		let mut binary = Mat::default();
		imgproc::threshold(&gray, &mut binary, threshold, 255., imgproc::THRESH_BINARY)?;

		let candidates = extract_candidates(&binary)?;
		Ok(largest(&candidates).map(|c| Self::from_contour(c.cnt.clone())))
	}

	/// A missing or unusable template is reported and yields `None`.
	pub fn load(path: &Path, threshold: f64) -> Option<Self> {
		let Some(path_str) = path.to_str() else {
			warn!("reference path {} is not valid UTF-8", path.display());
			return None;
		};

		let image = match imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR) {
			Ok(image) if !image.empty() => image,
			Ok(_) => {
				warn!("reference image {} is missing or unreadable", path.display());
				return None;
			}
			Err(e) => {
				warn!("failed to read reference image {}: {}", path.display(), e);
				return None;
			}
		};

		match Self::from_image(&image, threshold) {
			Ok(Some(shape)) => {
				info!("loaded reference outline from {} ({} points)", path.display(), shape.cnt.len());
				Some(shape)
			}
			Ok(None) => {
				warn!("reference image {} has no silhouette", path.display());
				None
			}
			Err(e) => {
				warn!("failed to extract reference outline from {}: {}", path.display(), e);
				None
			}
		}
	}

	pub fn contour(&self) -> &Contour {
		&self.cnt
	}

	/// Hu-moment distance (I1), 0 for identical shapes.
	pub fn score(&self, other: &Contour) -> Result<f64> {
		imgproc::match_shapes(&self.cnt, other, imgproc::CONTOURS_MATCH_I1, 0.)
	}
}
