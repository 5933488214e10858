use crate::ground::GroundPoint;
use crate::modules::output::{unix_timestamp, Message};
use crate::modules::OutputModule;

use tracing::{info, warn};

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Who a position belongs to; each entity is rate limited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
	Robot,
	Swarm(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Sent(String),
	/// Last transmission for this entity is younger than the interval.
	Throttled,
	/// The output rejected the datagram; already logged.
	Failed,
}

pub struct Broadcaster<O> {
	output: O,
	interval: Duration,
	last_sent: HashMap<Entity, SystemTime>,
}

impl<O: OutputModule> Broadcaster<O> {
	pub fn new(output: O, interval: Duration) -> Self {
		Self {
			output,
			interval,
			last_sent: HashMap::new(),
		}
	}

	pub fn publish(&mut self, entity: Entity, position: GroundPoint, now: SystemTime) -> Outcome {
		if !self.due(entity, now) {
			return Outcome::Throttled;
		}
		// a failed send still waits out the interval; the next one supersedes it
		self.last_sent.insert(entity, now);

		let timestamp = unix_timestamp(now);
		let payload = match entity {
			Entity::Robot => Message::Robot { timestamp, position },
			Entity::Swarm(_) => Message::Swarm { timestamp, position },
		}
		.to_string();

		match self.output.run(payload.as_bytes()) {
			Ok(_) => {
				info!("{}", payload);
				Outcome::Sent(payload)
			}
			Err(e) => {
				warn!("network error sending {}: {}", payload, e);
				Outcome::Failed
			}
		}
	}

	/// Drops the rate limit state of an entity that no longer exists.
	pub fn forget(&mut self, entity: Entity) {
		self.last_sent.remove(&entity);
	}

	pub fn output(&self) -> &O {
		&self.output
	}

	fn due(&self, entity: Entity, now: SystemTime) -> bool {
		match self.last_sent.get(&entity) {
			None => true,
			// a clock stepping backwards counts as elapsed
			Some(last) => now.duration_since(*last).map_or(true, |elapsed| elapsed >= self.interval),
		}
	}
}
