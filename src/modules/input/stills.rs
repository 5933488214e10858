use crate::modules::InputModule;

use opencv::core::Mat;
use opencv::imgcodecs;
use opencv::prelude::*;
use opencv::Result;
use tracing::warn;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Every image in a directory, in file name order. Unreadable files are skipped.
pub struct Stills {
	paths: vec::IntoIter<PathBuf>,
	current: Option<PathBuf>,
}

impl InputModule for Stills {
	fn run(&mut self) -> Result<Option<Mat>> {
		for path in self.paths.by_ref() {
			let Some(path_str) = path.to_str() else {
				warn!("skipping {}: path is not valid UTF-8", path.display());
				continue;
			};

			let frame = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)?;
			if frame.empty() {
				warn!("skipping {}: not a readable image", path.display());
				continue;
			}

			self.current = Some(path);
			return Ok(Some(frame));
		}

		self.current = None;
		Ok(None)
	}
}

impl Stills {
	pub fn open(dir: &Path) -> io::Result<Self> {
		let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
			.filter_map(|entry| entry.ok().map(|e| e.path()))
			.filter(|path| is_image(path))
			.collect();
		paths.sort();

		Ok(Self {
			paths: paths.into_iter(),
			current: None,
		})
	}

	pub fn remaining(&self) -> usize {
		self.paths.len()
	}

	/// File behind the frame returned last.
	pub fn current(&self) -> Option<&Path> {
		self.current.as_deref()
	}
}

fn is_image(path: &Path) -> bool {
	path.is_file()
		&& path
			.extension()
			.and_then(|ext| ext.to_str())
			.map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
