//! Overhead tracker for a single surface robot.
//!
//! Frames from a downward-looking camera are segmented, the robot is picked
//! out either by colour or by matching a reference silhouette, its pixel
//! position is projected onto the ground plane and the result is broadcast
//! as a pseudo-GPS datagram, together with any operator-placed virtual
//! swarm members.

pub mod ground;
pub mod modules;
pub mod overlay;
pub mod settings;
pub mod swarm;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_utils;
