use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mfa_sso_protocol::SessionCacheRecord;

use super::{read_record, record_files};

/// Answers "is there a usable SSO session for this start URL?".
#[derive(Debug, Clone)]
pub struct SessionCacheInspector {
	dir: PathBuf,
}

impl SessionCacheInspector {
	pub fn new(dir: PathBuf) -> Self {
		Self { dir }
	}

	/// `start_url` of `None` or `""` accepts a session for any start URL.
	pub fn has_valid_session(&self, start_url: Option<&str>) -> bool {
		self.has_valid_session_at(start_url, Utc::now())
	}

	pub fn has_valid_session_at(&self, start_url: Option<&str>, now: DateTime<Utc>) -> bool {
		self.find_valid_at(start_url, now).is_some()
	}

	pub fn find_valid(&self, start_url: Option<&str>) -> Option<SessionCacheRecord> {
		self.find_valid_at(start_url, Utc::now())
	}

	/// Returns the first qualifying record; file order is unspecified.
	pub fn find_valid_at(&self, start_url: Option<&str>, now: DateTime<Utc>) -> Option<SessionCacheRecord> {
		record_files(&self.dir)
			.iter()
			.filter_map(|path| read_record(path))
			.find(|record| record.matches_start_url(start_url) && record.is_usable_at(now))
	}
}
