//! Port selection helpers for launched browsers.

use std::net::TcpListener;

use crate::error::Result;

/// Asks the OS for an unused localhost port.
///
/// The port is released before returning, so another process may still claim
/// it before the browser binds it; the launcher notices and fails fast.
pub fn free_port() -> Result<u16> {
	let listener = TcpListener::bind(("127.0.0.1", 0))?;
	Ok(listener.local_addr()?.port())
}
