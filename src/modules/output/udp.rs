use crate::modules::OutputModule;

use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Connectionless datagrams to a (usually broadcast) address.
pub struct UdpBroadcast {
	socket: UdpSocket,
	target: SocketAddr,
}

impl OutputModule for UdpBroadcast {
	fn run(&mut self, payload: &[u8]) -> io::Result<usize> {
		self.socket.send_to(payload, self.target)
	}
}

impl UdpBroadcast {
	pub fn bind(target: SocketAddr) -> io::Result<Self> {
		let socket = UdpSocket::bind("0.0.0.0:0")?;
		socket.set_broadcast(true)?;
		Ok(Self { socket, target })
	}

	pub fn target(&self) -> SocketAddr {
		self.target
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn delivers_to_the_target() {
		let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
		listener.set_read_timeout(Some(Duration::from_secs(2))).unwrap();

		let mut output = UdpBroadcast::bind(listener.local_addr().unwrap()).unwrap();
		assert_eq!(output.run(b"GPS_1_0.000_0.000").unwrap(), 17);

		let mut buf = [0u8; 64];
		let (n, _) = listener.recv_from(&mut buf).unwrap();
		assert_eq!(&buf[..n], b"GPS_1_0.000_0.000");
	}
}
