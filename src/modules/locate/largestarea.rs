use crate::modules::locate::largest;
use crate::modules::{Candidate, LocateModule, Localization};

use opencv::core::Point;
use opencv::imgproc;
use opencv::Result;

/// Moment centroid of the biggest region.
#[derive(Debug, Default)]
pub struct LargestArea;

impl LocateModule for LargestArea {
	fn run(&mut self, candidates: &[Candidate]) -> Result<Localization> {
		let Some(biggest) = largest(candidates) else {
			return Ok(Localization::NotFound);
		};

		let m = imgproc::moments(&biggest.cnt, false)?;
		if m.m00 <= 0. {
			return Ok(Localization::NotFound);
		}

		Ok(Localization::Found(Point::new((m.m10 / m.m00) as i32, (m.m01 / m.m00) as i32)))
	}
}
