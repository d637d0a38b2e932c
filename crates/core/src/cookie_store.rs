//! Persistence for the portal sign-in cookie.
//!
//! The file holds the cookie's JSON, base64 encoded (standard alphabet).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mfa_sso_protocol::{Cookie, find_auth_cookie};
use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct CookieStore {
	path: PathBuf,
}

impl CookieStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Loads the stored sign-in cookie. Anything unreadable counts as no cookie.
	pub fn load(&self) -> Option<Cookie> {
		let text = match fs::read_to_string(&self.path) {
			Ok(text) => text,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
			Err(e) => {
				debug!(path = %self.path.display(), "cookie file not readable: {}", e);
				return None;
			}
		};

		let bytes = STANDARD
			.decode(text.trim())
			.inspect_err(|e| debug!("cookie file is not base64: {}", e))
			.ok()?;
		let cookie: Cookie = serde_json::from_slice(&bytes)
			.inspect_err(|e| debug!("cookie file is not a cookie: {}", e))
			.ok()?;

		if !cookie.is_auth_cookie() {
			debug!(name = %cookie.name, "ignoring stored cookie with unexpected name");
			return None;
		}
		Some(cookie)
	}

	pub fn save(&self, cookie: &Cookie) -> Result<()> {
		let json = serde_json::to_vec(cookie)?;
		write_private(&self.path, STANDARD.encode(json).as_bytes()).map_err(|source| Error::Persist {
			path: self.path.clone(),
			source,
		})
	}

	/// Saves the sign-in cookie out of a browser jar.
	///
	/// Returns `false`, leaving any stored cookie untouched, when the jar lacks it.
	pub fn save_from_jar(&self, jar: &[Cookie]) -> Result<bool> {
		let Some(cookie) = find_auth_cookie(jar) else {
			debug!(cookies = jar.len(), "no sign-in cookie in browser jar");
			return Ok(false);
		};
		self.save(cookie)?;
		Ok(true)
	}

	/// Deletes the cookie file; `Ok(false)` when there was none.
	pub fn remove(&self) -> io::Result<bool> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
			Err(e) => Err(e),
		}
	}
}

/// Writes `contents` readable by the owner only.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}

	let mut options = OpenOptions::new();
	options.write(true).create(true).truncate(true);
	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o600);
	}
	let mut file = options.open(path)?;
	file.write_all(contents)?;

	// `mode` only applies on creation.
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
	}
	Ok(())
}
