//! Headless Chrome lifecycle and Chrome DevTools Protocol plumbing.
//!
//! This crate launches a private Chrome/Chromium instance with remote
//! debugging enabled, attaches to its first page over a WebSocket, and exposes
//! the handful of page operations the login ceremony needs through
//! [`ChromePage`]. It knows nothing about AWS; the ceremony itself lives in
//! `mfa-sso`.

pub mod chrome;
pub mod connection;
pub mod error;
pub mod finder;
pub mod js;
pub mod launcher;
pub mod page;
pub mod probe;
pub mod process;

pub use chrome::{HeadlessChrome, LaunchOptions};
pub use connection::CdpConnection;
pub use error::{Error, Result};
pub use page::ChromePage;
