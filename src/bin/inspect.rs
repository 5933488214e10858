use anyhow::{Context, Result};
use clap::Parser;
use opencv::core::Point;
use opencv::highgui;
use opencv::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use sauron::modules::input::Stills;
use sauron::modules::{InputModule, Localization};
use sauron::overlay;
use sauron::settings::VisionSettings;
use sauron::tracker::Tracker;

const WINDOW: &str = "Robot Detection";
const DISPLAY_HEIGHT: i32 = 800;

/// Run the robot localizer over a folder of still images
#[derive(Parser, Debug)]
#[command(name = "inspect")]
struct Args {
	/// Folder of .png/.jpg/.jpeg/.bmp images
	#[arg(default_value = "test_imgs")]
	dir: PathBuf,

	/// Vision settings file (defaults to ./sauron.toml when present)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Show each annotated image and wait for a key
	#[arg(short, long)]
	show: bool,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();
	let vset = VisionSettings::resolve(args.config.as_deref())?;

	let mut tracker = Tracker::from_strategy(&vset.strategy)?;
	let mut stills = Stills::open(&args.dir).with_context(|| format!("failed to list {}", args.dir.display()))?;
	if stills.remaining() == 0 {
		warn!("no images in {}", args.dir.display());
		return Ok(());
	}

	let mut found = 0;
	let mut total = 0;
	while let Some(mut frame) = stills.run()? {
		total += 1;
		let name = stills
			.current()
			.and_then(|p| p.file_name())
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();

		let sighting = match tracker.run(&frame) {
			Ok(sighting) => sighting,
			Err(e) => {
				warn!("{}: {}", name, e);
				continue;
			}
		};

		match sighting.localization {
			Localization::Found(center) => {
				found += 1;
				info!("{}: robot found at ({}, {})", name, center.x, center.y);
			}
			Localization::NotFound => info!("{}: no robot detected", name),
		}

		if args.show {
			overlay::draw_candidates(&mut frame, &sighting.contours)?;
			if let Localization::Found(center) = sighting.localization {
				overlay::draw_robot(&mut frame, center, 40)?;
				overlay::draw_label(&mut frame, &format!("Center: ({}, {})", center.x, center.y), Point::new(10, 30))?;
			}
			show(&frame)?;
		}
	}

	info!("robot found in {} of {} images", found, total);
	if args.show {
		highgui::destroy_all_windows()?;
	}
	Ok(())
}

fn show(frame: &Mat) -> opencv::Result<()> {
	let aspect_ratio = frame.cols() as f64 / frame.rows() as f64;
	highgui::named_window(WINDOW, highgui::WINDOW_NORMAL)?;
	highgui::resize_window(WINDOW, (DISPLAY_HEIGHT as f64 * aspect_ratio) as i32, DISPLAY_HEIGHT)?;
	highgui::imshow(WINDOW, frame)?;
	highgui::wait_key(0)?;
	Ok(())
}
