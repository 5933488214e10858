use crate::ground::GroundPoint;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Pseudo-GPS payloads, underscore separated, metres to three decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
	/// `GPS_<ts>_<x>_<y>`
	Robot { timestamp: u64, position: GroundPoint },
	/// `SW_<ts>_<x>_<y>_0_0`, the zeros hold room for velocity and heading.
	Swarm { timestamp: u64, position: GroundPoint },
}

impl fmt::Display for Message {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Message::Robot { timestamp, position } => {
				write!(f, "GPS_{}_{:.3}_{:.3}", timestamp, position.x, position.y)
			}
			Message::Swarm { timestamp, position } => {
				write!(f, "SW_{}_{:.3}_{:.3}_0_0", timestamp, position.x, position.y)
			}
		}
	}
}

/// Whole seconds since the epoch, rounded to nearest.
pub fn unix_timestamp(now: SystemTime) -> u64 {
	now.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs_f64().round() as u64)
		.unwrap_or(0)
}
