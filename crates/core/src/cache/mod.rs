//! The AWS CLI's SSO token cache.
//!
//! Each `*.json` file in the cache directory holds one [`SessionCacheRecord`].
//! The directory is written by `aws sso login`; this module only reads it,
//! or deletes records on a forced re-authentication.

mod inspector;
mod manager;

use std::fs;
use std::path::{Path, PathBuf};

pub use inspector::SessionCacheInspector;
pub use manager::{ClearReport, SessionCacheManager};
use mfa_sso_protocol::SessionCacheRecord;
use tracing::debug;

/// Lists the `*.json` entries in `dir`, the way a shell glob would.
///
/// Entries that are not readable records (directories included) are dropped
/// later by [`read_record`]. A missing or unreadable directory has none.
fn record_files(dir: &Path) -> Vec<PathBuf> {
	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => {
			debug!(dir = %dir.display(), "cache directory not readable: {}", e);
			return Vec::new();
		}
	};

	entries
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|path| path.extension().is_some_and(|ext| ext == "json"))
		.collect()
}

/// Reads one record; unreadable or malformed files yield `None`.
fn read_record(path: &Path) -> Option<SessionCacheRecord> {
	let text = fs::read_to_string(path)
		.inspect_err(|e| debug!(path = %path.display(), "skipping unreadable cache record: {}", e))
		.ok()?;
	serde_json::from_str(&text)
		.inspect_err(|e| debug!(path = %path.display(), "skipping malformed cache record: {}", e))
		.ok()
}
