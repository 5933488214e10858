use opencv::core::Point;

/// A click within this many pixels of a member removes it.
pub const TOGGLE_RADIUS_PX: f64 = 10.;

/// Operator-placed virtual teammate, known only by its pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmMember {
	pub id: u64,
	pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
	Added(u64),
	Removed(u64),
}

#[derive(Debug, Default)]
pub struct Swarm {
	members: Vec<SwarmMember>,
	next_id: u64,
}

impl Swarm {
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes the first member near `at`, or places a new one there.
	pub fn toggle(&mut self, at: Point) -> Toggle {
		let near = self.members.iter().position(|m| {
			let dx = (m.position.x - at.x) as f64;
			let dy = (m.position.y - at.y) as f64;
			dx.hypot(dy) <= TOGGLE_RADIUS_PX
		});

		match near {
			Some(i) => Toggle::Removed(self.members.remove(i).id),
			None => {
				let id = self.next_id;
				self.next_id += 1;
				self.members.push(SwarmMember { id, position: at });
				Toggle::Added(id)
			}
		}
	}

	pub fn members(&self) -> &[SwarmMember] {
		&self.members
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}
