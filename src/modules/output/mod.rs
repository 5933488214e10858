mod broadcast;
mod message;
mod udp;

pub use broadcast::{Broadcaster, Entity, Outcome};
pub use message::{unix_timestamp, Message};
pub use udp::UdpBroadcast;
