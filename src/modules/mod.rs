pub mod input;
pub mod threshold;
pub mod filter;
pub mod locate;
pub mod output;

use opencv::core::{Mat, Point, Vector};
use opencv::imgproc;
use opencv::Result;

use std::io;

pub type Contour = Vector<Point>;

/// An outer boundary pulled from a mask, with its enclosed area.
#[derive(Debug, Clone)]
pub struct Candidate {
	pub cnt: Contour,
	pub area: f64,
}

impl Candidate {
	pub fn new(cnt: Contour) -> Result<Self> {
		let area = imgproc::contour_area(&cnt, false)?;
		Ok(Self { cnt, area })
	}
}

/// Pixel position of the tracked object, if one was accepted this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Localization {
	#[default]
	NotFound,
	Found(Point),
}

impl Localization {
	pub fn point(&self) -> Option<Point> {
		match self {
			Localization::Found(p) => Some(*p),
			Localization::NotFound => None,
		}
	}

	pub fn is_found(&self) -> bool {
		matches!(self, Localization::Found(_))
	}
}

pub trait InputModule {
	/// `None` once the source is exhausted.
	fn run(&mut self) -> Result<Option<Mat>>;
}

pub trait ThresholdModule {
	fn run(&mut self, frame: &Mat) -> Result<Mat>;
}

pub trait FilterModule {
	fn run(&mut self, object: &Candidate) -> bool;
}

pub trait LocateModule {
	fn run(&mut self, candidates: &[Candidate]) -> Result<Localization>;
}

pub trait OutputModule {
	fn run(&mut self, payload: &[u8]) -> io::Result<usize>;
}

/// External boundaries of every foreground component, holes ignored.
pub fn extract_candidates(mask: &Mat) -> Result<Vec<Candidate>> {
	let mut cnts = Vector::<Contour>::new();
	imgproc::find_contours(mask, &mut cnts, imgproc::RETR_EXTERNAL, imgproc::CHAIN_APPROX_SIMPLE, Point::new(0, 0))?;

	cnts.iter().map(Candidate::new).collect()
}
