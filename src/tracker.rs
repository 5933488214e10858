//! One frame in, at most one object position out.
//!
//! A [`Tracker`] chains the module stages: a threshold module turns the frame
//! into a mask, the mask's outer contours become candidates, filter modules
//! prune them and a locate module picks the object. Which modules are used is
//! fixed for the session by the configured [`Strategy`].

use crate::modules::filter::ContourArea;
use crate::modules::locate::{LargestArea, ReferenceShape, ShapeMatch};
use crate::modules::threshold::{ColorRange, ShapeTemplate};
use crate::modules::{extract_candidates, Candidate, FilterModule, LocateModule, Localization, ThresholdModule};
use crate::settings::{ShapeSettings, Strategy};

use opencv::core::Mat;
use opencv::Result;
use tracing::debug;

/// What one frame produced: every outer contour, the candidates that survived
/// filtering and the verdict.
#[derive(Debug, Default)]
pub struct Sighting {
	pub contours: Vec<Candidate>,
	pub candidates: Vec<Candidate>,
	pub localization: Localization,
}

pub struct Tracker {
	threshold: Box<dyn ThresholdModule>,
	filter_modules: Vec<Box<dyn FilterModule>>,
	locate: Box<dyn LocateModule>,
}

impl Tracker {
	pub fn new(threshold: Box<dyn ThresholdModule>, filter_modules: Vec<Box<dyn FilterModule>>, locate: Box<dyn LocateModule>) -> Self {
		Self {
			threshold,
			filter_modules,
			locate,
		}
	}

	/// Builds the module chain for `strategy`. The reference outline for
	/// shape matching is read once here and kept for the whole session.
	pub fn from_strategy(strategy: &Strategy) -> Result<Self> {
		match strategy {
			Strategy::Color(color) => Ok(Self::new(Box::new(ColorRange::new(color)?), Vec::new(), Box::new(LargestArea))),
			Strategy::Shape(shape) => {
				let reference = ReferenceShape::load(&shape.reference, shape.reference_threshold);
				Self::with_reference(shape, reference)
			}
		}
	}

	pub fn with_reference(shape: &ShapeSettings, reference: Option<ReferenceShape>) -> Result<Self> {
		Ok(Self::new(
			Box::new(ShapeTemplate::new(shape)?),
			vec![Box::new(ContourArea::new(shape.min_area)) as Box<dyn FilterModule>],
			Box::new(ShapeMatch::new(reference, shape.max_score)),
		))
	}

	pub fn run(&mut self, frame: &Mat) -> Result<Sighting> {
		let mask = self.threshold.run(frame)?;

		let contours = extract_candidates(&mask)?;
		let mut candidates = contours.clone();
		for module in self.filter_modules.iter_mut() {
			candidates.retain(|obj| module.run(obj));
		}
		debug!(found = contours.len(), kept = candidates.len(), "candidates");

		let localization = self.locate.run(&candidates)?;
		Ok(Sighting {
			contours,
			candidates,
			localization,
		})
	}
}
