mod largestarea;
mod reference;
mod shapematch;

pub use largestarea::LargestArea;
pub use reference::ReferenceShape;
pub use shapematch::ShapeMatch;

use crate::modules::Candidate;

use itertools::Itertools;

use std::cmp::Ordering;

/// Largest candidate by area; the first one seen wins a tie.
pub fn largest(candidates: &[Candidate]) -> Option<&Candidate> {
	candidates
		.iter()
		.max_set_by(|a, b| a.area.partial_cmp(&b.area).unwrap_or(Ordering::Equal))
		.into_iter()
		.next()
}
