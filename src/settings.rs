use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::info;

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SETTINGS_PATH: &str = "sauron.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
	pub input: InputSettings,
	pub camera: CameraSettings,
	pub strategy: Strategy,
	pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
	pub device: i32,
	pub width: i32,
	pub height: i32,
	/// Flip every frame left/right before processing.
	pub mirror: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
	/// Distance from the lens to the tracked plane.
	pub height_m: f64,
	/// Horizontal field of view.
	pub fov_deg: f64,
}

/// Which segmentation/localization pair runs for the whole session.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Strategy {
	Color(ColorSettings),
	Shape(ShapeSettings),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
	pub blur: i32,
	/// Inclusive HSV lower bound, OpenCV scale (H in 0..180).
	pub lower: [u8; 3],
	pub upper: [u8; 3],
	pub cleanup_iterations: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
	pub reference: PathBuf,
	pub reference_threshold: f64,
	pub blur: i32,
	pub luminance: f64,
	pub open_iterations: i32,
	pub close_iterations: i32,
	pub min_area: f64,
	pub max_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
	pub address: IpAddr,
	pub port: u16,
	pub interval_s: f64,
}

impl Default for InputSettings {
	fn default() -> Self {
		Self {
			device: 0,
			width: 640,
			height: 480,
			mirror: true,
		}
	}
}

impl Default for CameraSettings {
	fn default() -> Self {
		Self {
			height_m: 1.2192,
			fov_deg: 120.,
		}
	}
}

impl Default for Strategy {
	fn default() -> Self {
		Strategy::Shape(ShapeSettings::default())
	}
}

impl Default for ColorSettings {
	fn default() -> Self {
		Self {
			blur: 11,
			lower: [35, 76, 153],
			upper: [56, 255, 255],
			cleanup_iterations: 2,
		}
	}
}

impl Default for ShapeSettings {
	fn default() -> Self {
		Self {
			reference: PathBuf::from("contour_refs/uuv_contour.png"),
			reference_threshold: 127.,
			blur: 5,
			luminance: 200.,
			open_iterations: 4,
			close_iterations: 2,
			min_area: 10_000.,
			max_score: 0.2,
		}
	}
}

impl Default for OutputSettings {
	fn default() -> Self {
		Self {
			address: IpAddr::from([255, 255, 255, 255]),
			port: 5005,
			interval_s: 1.,
		}
	}
}

impl OutputSettings {
	pub fn target(&self) -> SocketAddr {
		SocketAddr::new(self.address, self.port)
	}

	/// Non-positive intervals disable throttling; overlong ones saturate.
	pub fn interval(&self) -> Duration {
		if self.interval_s.is_nan() || self.interval_s <= 0. {
			return Duration::ZERO;
		}
		Duration::try_from_secs_f64(self.interval_s).unwrap_or(Duration::MAX)
	}

	fn validate(&self) -> Result<()> {
		ensure!(
			self.interval_s.is_finite() && self.interval_s >= 0.,
			"output.interval_s must be a finite number of seconds, got {}",
			self.interval_s
		);
		Ok(())
	}
}

impl InputSettings {
	fn validate(&self) -> Result<()> {
		ensure!(self.width > 0 && self.height > 0, "input size must be positive, got {}x{}", self.width, self.height);
		Ok(())
	}
}

impl CameraSettings {
	fn validate(&self) -> Result<()> {
		ensure!(self.height_m.is_finite() && self.height_m > 0., "camera.height_m must be positive, got {}", self.height_m);
		ensure!(self.fov_deg > 0. && self.fov_deg < 180., "camera.fov_deg must lie in (0, 180), got {}", self.fov_deg);
		Ok(())
	}
}

impl ColorSettings {
	fn validate(&self) -> Result<()> {
		check_kernel("strategy.blur", self.blur)?;
		ensure!(self.cleanup_iterations >= 0, "strategy.cleanup_iterations must not be negative");
		ensure!(
			self.lower.iter().zip(&self.upper).all(|(l, u)| l <= u),
			"strategy.lower {:?} exceeds strategy.upper {:?}",
			self.lower,
			self.upper
		);
		Ok(())
	}
}

impl ShapeSettings {
	fn validate(&self) -> Result<()> {
		check_kernel("strategy.blur", self.blur)?;
		check_level("strategy.luminance", self.luminance)?;
		check_level("strategy.reference_threshold", self.reference_threshold)?;
		ensure!(
			self.open_iterations >= 0 && self.close_iterations >= 0,
			"strategy.open_iterations and strategy.close_iterations must not be negative"
		);
		ensure!(self.min_area.is_finite() && self.min_area >= 0., "strategy.min_area must not be negative, got {}", self.min_area);
		ensure!(self.max_score.is_finite() && self.max_score > 0., "strategy.max_score must be positive, got {}", self.max_score);
		Ok(())
	}
}

impl Strategy {
	fn validate(&self) -> Result<()> {
		match self {
			Strategy::Color(color) => color.validate(),
			Strategy::Shape(shape) => shape.validate(),
		}
	}
}

// Gaussian kernels must be odd and positive.
fn check_kernel(name: &str, size: i32) -> Result<()> {
	ensure!(size > 0 && size % 2 == 1, "{} must be a positive odd kernel size, got {}", name, size);
	Ok(())
}

fn check_level(name: &str, level: f64) -> Result<()> {
	ensure!((0. ..=255.).contains(&level), "{} must lie in 0..=255, got {}", name, level);
	Ok(())
}

impl VisionSettings {
	pub fn from_toml(content: &str) -> Result<Self> {
		let vset: Self = toml::from_str(content).context("invalid vision settings")?;
		vset.validate()?;
		Ok(vset)
	}

	pub fn validate(&self) -> Result<()> {
		self.input.validate()?;
		self.camera.validate()?;
		self.strategy.validate()?;
		self.output.validate()
	}

	pub fn load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("failed to read {}", path.display()))?;
		Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
	}

	/// An explicitly named file must exist; the default file may be absent.
	pub fn resolve(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::load(path),
			None => {
				let path = Path::new(DEFAULT_SETTINGS_PATH);
				if path.exists() {
					Self::load(path)
				} else {
					info!("{} not found, using built-in settings", DEFAULT_SETTINGS_PATH);
					Ok(Self::default())
				}
			}
		}
	}
}
