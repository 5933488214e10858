use crate::modules::locate::ReferenceShape;
use crate::modules::{Candidate, LocateModule, Localization};

use opencv::core::Point;
use opencv::imgproc;
use opencv::Result;
use tracing::debug;

// Scores at or above this never become the running best.
const INITIAL_SCORE: f64 = 1.;

/// Best match against the reference outline, reported at the centre of its
/// minimum-area rotated rectangle.
pub struct ShapeMatch {
	reference: Option<ReferenceShape>,
	max_score: f64,
}

impl LocateModule for ShapeMatch {
	fn run(&mut self, candidates: &[Candidate]) -> Result<Localization> {
		let Some(reference) = &self.reference else {
			return Ok(Localization::NotFound);
		};

		let mut best_match: Option<&Candidate> = None;
		let mut lowest_score = INITIAL_SCORE;
		for candidate in candidates {
			let score = reference.score(&candidate.cnt)?;
			debug!(score, area = candidate.area, "scored candidate");
			if score < lowest_score {
				lowest_score = score;
				best_match = Some(candidate);
			}
		}

		match best_match {
			Some(best) if lowest_score < self.max_score => {
				let rect = imgproc::min_area_rect(&best.cnt)?;
				Ok(Localization::Found(Point::new(rect.center.x as i32, rect.center.y as i32)))
			}
			_ => Ok(Localization::NotFound),
		}
	}
}

impl ShapeMatch {
	pub fn new(reference: Option<ReferenceShape>, max_score: f64) -> Self {
		Self { reference, max_score }
	}

	pub fn has_reference(&self) -> bool {
		self.reference.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::modules::extract_candidates;
	use crate::test_utils::{blank_mask, fill_circle, fill_rect, only_candidate};

	fn reference_from(mask: &opencv::core::Mat) -> ReferenceShape {
		ReferenceShape::from_contour(only_candidate(mask).unwrap().cnt)
	}

	fn rect_reference(width: i32, height: i32) -> ReferenceShape {
		let mut mask = blank_mask(300, 300).unwrap();
		fill_rect(&mut mask, 20, 20, width, height, 255.).unwrap();
		reference_from(&mask)
	}

	#[test]
	fn identical_shape_scores_zero_and_is_accepted() {
		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 200, 150, 200, 120, 255.).unwrap();
		let candidates = extract_candidates(&mask).unwrap();

		let reference = ReferenceShape::from_contour(candidates[0].cnt.clone());
		assert!(reference.score(&candidates[0].cnt).unwrap().abs() < 1e-9);

		let found = ShapeMatch::new(Some(reference), 0.2).run(&candidates).unwrap().point().unwrap();
		// rectangle centre (299.5, 209.5)
		assert!((found.x - 299).abs() <= 1);
		assert!((found.y - 209).abs() <= 1);
	}

	#[test]
	fn scale_and_position_do_not_matter() {
		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 300, 100, 200, 120, 255.).unwrap();
		let candidates = extract_candidates(&mask).unwrap();

		let reference = rect_reference(100, 60);
		assert!(reference.score(&candidates[0].cnt).unwrap() < 0.01);
		assert!(ShapeMatch::new(Some(reference), 0.2).run(&candidates).unwrap().is_found());
	}

	#[test]
	fn elongated_bar_is_rejected_against_a_square() {
		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 100, 150, 400, 100, 255.).unwrap();
		let candidates = extract_candidates(&mask).unwrap();

		let reference = rect_reference(200, 200);
		assert!(reference.score(&candidates[0].cnt).unwrap() > 0.2);
		assert_eq!(ShapeMatch::new(Some(reference), 0.2).run(&candidates).unwrap(), Localization::NotFound);
	}

	#[test]
	fn square_and_equal_area_disc_are_indistinguishable() {
		let mut square = blank_mask(480, 640).unwrap();
		fill_rect(&mut square, 100, 100, 199, 199, 255.).unwrap();
		let mut disc = blank_mask(480, 640).unwrap();
		// r = sqrt(199² / pi)
		fill_circle(&mut disc, 320, 240, 112).unwrap();

		// both are isotropic, only the first Hu invariant differs
		let score = reference_from(&square).score(&only_candidate(&disc).unwrap().cnt).unwrap();
		assert!(score < 0.2, "score {}", score);
	}

	#[test]
	fn tied_scores_keep_the_first_candidate() {
		let mut mask = blank_mask(480, 640).unwrap();
		fill_rect(&mut mask, 50, 50, 150, 150, 255.).unwrap();
		fill_rect(&mut mask, 350, 250, 150, 150, 255.).unwrap();
		let candidates = extract_candidates(&mask).unwrap();
		assert_eq!(candidates.len(), 2);

		let center = |c: &Candidate| {
			let rect = imgproc::min_area_rect(&c.cnt).unwrap();
			Point::new(rect.center.x as i32, rect.center.y as i32)
		};

		for order in [[0, 1], [1, 0]] {
			let tied = [candidates[order[0]].clone(), candidates[order[1]].clone()];
			// the first scores exactly zero, the second no lower
			let reference = ReferenceShape::from_contour(tied[0].cnt.clone());
			let second = reference.score(&tied[1].cnt).unwrap();
			assert!(second.abs() < 1e-9, "score {}", second);

			let found = ShapeMatch::new(Some(reference), 0.2).run(&tied).unwrap().point().unwrap();
			assert_eq!(found, center(&tied[0]));
			assert_ne!(found, center(&tied[1]));
		}
	}

	#[test]
	fn closest_candidate_wins() {
		let mut mask = blank_mask(480, 640).unwrap();
		// bar on the left, square on the right
		fill_rect(&mut mask, 20, 20, 300, 60, 255.).unwrap();
		fill_rect(&mut mask, 400, 200, 150, 150, 255.).unwrap();
		let candidates = extract_candidates(&mask).unwrap();
		assert_eq!(candidates.len(), 2);

		let found = ShapeMatch::new(Some(rect_reference(100, 100)), 0.2).run(&candidates).unwrap().point().unwrap();
		assert!((found.x - 474).abs() <= 1);
		assert!((found.y - 274).abs() <= 1);
	}

	#[test]
	fn no_reference_means_never_found() {
		let mut mask = blank_mask(480, 640).unwrap();
		fill_circle(&mut mask, 300, 200, 80).unwrap();
		let candidates = extract_candidates(&mask).unwrap();

		let mut locate = ShapeMatch::new(None, 0.2);
		assert!(!locate.has_reference());
		assert_eq!(locate.run(&candidates).unwrap(), Localization::NotFound);
	}

	#[test]
	fn empty_frame_is_not_found() {
		assert_eq!(ShapeMatch::new(Some(rect_reference(100, 100)), 0.2).run(&[]).unwrap(), Localization::NotFound);
	}
}
