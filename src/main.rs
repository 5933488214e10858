use anyhow::{Context, Result};
use clap::Parser;
use opencv::core::{self, Mat, Point};
use opencv::highgui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::SystemTime;

use sauron::ground::Projection;
use sauron::modules::input::Camera;
use sauron::modules::output::{Broadcaster, Entity, UdpBroadcast};
use sauron::modules::InputModule;
use sauron::overlay;
use sauron::settings::{Strategy, VisionSettings};
use sauron::swarm::{Swarm, Toggle};
use sauron::tracker::{Sighting, Tracker};

const WINDOW: &str = "Overhead Tracker";
const QUIT_KEY: i32 = 'q' as i32;

/// Track the robot from an overhead camera and broadcast its position
#[derive(Parser, Debug)]
#[command(name = "sauron")]
struct Args {
	/// Vision settings file (defaults to ./sauron.toml when present)
	#[arg(short, long)]
	config: Option<PathBuf>,
}

// Main
fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();
	let vset = VisionSettings::resolve(args.config.as_deref())?;
	run(&vset)
}

fn run(vset: &VisionSettings) -> Result<()> {
	//Input Module
	let mut input = Camera::open(&vset.input).context("failed to open camera")?;

	let mut tracker = Tracker::from_strategy(&vset.strategy)?;
	let projection = Projection::from_settings(&vset.input, &vset.camera);

	//Output Module
	let output = UdpBroadcast::bind(vset.output.target())
		.with_context(|| format!("failed to open broadcast socket for {}", vset.output.target()))?;
	info!("broadcasting to {} every {:?}", output.target(), vset.output.interval());
	let mut broadcaster = Broadcaster::new(output, vset.output.interval());

	let mut swarm = Swarm::new();
	let clicks = open_window()?;

	//Main Vision Loop
	loop {
		// FPS
		let e1 = core::get_tick_count()?;

		let Some(mut frame) = input.run()? else {
			info!("camera stream ended");
			break;
		};

		for at in clicks.try_iter() {
			match swarm.toggle(at) {
				Toggle::Added(id) => info!("swarm member {} placed at ({}, {})", id, at.x, at.y),
				Toggle::Removed(id) => {
					broadcaster.forget(Entity::Swarm(id));
					info!("swarm member {} removed", id);
				}
			}
		}

		let sighting = tracker.run(&frame).unwrap_or_else(|e| {
			warn!("frame skipped: {}", e);
			Sighting::default()
		});
		let robot = sighting.localization.point();

		let now = SystemTime::now();
		for member in swarm.members() {
			broadcaster.publish(Entity::Swarm(member.id), projection.point_to_ground(member.position), now);
		}
		if let Some(robot) = robot {
			broadcaster.publish(Entity::Robot, projection.point_to_ground(robot), now);
		}

		// FPS
		let e2 = core::get_tick_count()?;
		let fps = 1. / ((e2 as f64 - e1 as f64) / core::get_tick_frequency()?);

		if let Err(e) = annotate(&mut frame, vset, &projection, &sighting, &swarm, fps) {
			warn!("overlay failed: {}", e);
		}

		highgui::imshow(WINDOW, &frame)?;
		if highgui::wait_key(1)? & 0xFF == QUIT_KEY {
			break;
		}
	}

	highgui::destroy_all_windows()?;
	Ok(())
}

/// Double clicks in the window arrive on the returned channel.
fn open_window() -> Result<Receiver<Point>> {
	highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;

	let (tx, rx) = mpsc::channel();
	highgui::set_mouse_callback(
		WINDOW,
		Some(Box::new(move |event, x, y, _flags| {
			if event == highgui::EVENT_LBUTTONDBLCLK {
				let _ = tx.send(Point::new(x, y));
			}
		})),
	)?;
	Ok(rx)
}

fn annotate(frame: &mut Mat, vset: &VisionSettings, projection: &Projection, sighting: &Sighting, swarm: &Swarm, fps: f64) -> opencv::Result<()> {
	let (cx, cy) = projection.center();
	overlay::draw_axes(frame, Point::new(cx as i32, cy as i32))?;

	if let Strategy::Color(color) = &vset.strategy {
		overlay::draw_hsv_bounds(frame, color.lower, color.upper)?;
	}

	overlay::draw_candidates(frame, &sighting.contours)?;

	let robot = sighting.localization.point();
	for member in swarm.members() {
		overlay::draw_member(frame, member, robot)?;
	}

	if let Some(robot) = robot {
		overlay::draw_robot(frame, robot, 14)?;
		overlay::draw_readout(frame, projection.point_to_ground(robot))?;
	}

	overlay::draw_fps(frame, fps)
}
