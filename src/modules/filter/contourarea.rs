use crate::modules::FilterModule;
use crate::modules::Candidate;

/// Keeps candidates whose enclosed area reaches `min` square pixels.
pub struct ContourArea {
	min: f64,
}

impl FilterModule for ContourArea {
	fn run(&mut self, object: &Candidate) -> bool {
		object.area >= self.min
	}
}

impl ContourArea {
	pub fn new(min: f64) -> Self {
		Self { min }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{blank_mask, fill_rect, only_candidate};

	#[test]
	fn drops_blobs_below_the_minimum() {
		let mut filter = ContourArea::new(10_000.);

		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 10, 10, 80, 80, 255.).unwrap();
		assert!(!filter.run(&only_candidate(&mask).unwrap()));

		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 10, 10, 150, 150, 255.).unwrap();
		assert!(filter.run(&only_candidate(&mask).unwrap()));
	}

	#[test]
	fn boundary_area_is_kept() {
		let mut mask = blank_mask(480, 640).unwrap();
		// polygon area 100 x 100
		fill_rect(&mut mask, 10, 10, 101, 101, 255.).unwrap();
		let candidate = only_candidate(&mask).unwrap();
		assert_eq!(candidate.area, 10_000.);
		assert!(ContourArea::new(10_000.).run(&candidate));
	}
}
