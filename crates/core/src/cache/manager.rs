use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{read_record, record_files};
use crate::cookie_store::CookieStore;

/// What a [`SessionCacheManager::clear`] call removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
	pub records_removed: usize,
	pub cookie_removed: bool,
	/// Deletions that failed and were skipped.
	pub failures: usize,
}

/// Clears cached sessions and the stored sign-in cookie for `--force`.
#[derive(Debug, Clone)]
pub struct SessionCacheManager {
	dir: PathBuf,
	cookies: CookieStore,
}

impl SessionCacheManager {
	pub fn new(dir: PathBuf, cookie_file: PathBuf) -> Self {
		Self {
			dir,
			cookies: CookieStore::new(cookie_file),
		}
	}

	/// Deletes records for `start_url` (all records when `None` or empty) and the cookie file.
	///
	/// Never fails; each deletion error is logged and counted in the report.
	pub fn clear(&self, start_url: Option<&str>) -> ClearReport {
		let filter = start_url.filter(|url| !url.is_empty());
		let mut report = ClearReport::default();

		for path in record_files(&self.dir) {
			if filter.is_some() && !read_record(&path).is_some_and(|record| record.matches_start_url(filter)) {
				continue;
			}
			match fs::remove_file(&path) {
				Ok(()) => {
					debug!(path = %path.display(), "removed cache record");
					report.records_removed += 1;
				}
				Err(e) => {
					warn!(path = %path.display(), "failed to remove cache record: {}", e);
					report.failures += 1;
				}
			}
		}

		match self.cookies.remove() {
			Ok(removed) => report.cookie_removed = removed,
			Err(e) => {
				warn!(path = %self.cookies.path().display(), "failed to remove cookie file: {}", e);
				report.failures += 1;
			}
		}

		report
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;
	use crate::cache::fixtures::write_record;

	struct Fixture {
		_temp: TempDir,
		cache_dir: PathBuf,
		cookie_file: PathBuf,
	}

	fn fixture() -> Fixture {
		let temp = TempDir::new().unwrap();
		let cache_dir = temp.path().join("cache");
		fs::create_dir_all(&cache_dir).unwrap();
		write_record(&cache_dir, "x1.json", "https://x", "a", "2030-01-01T00:00:00Z");
		write_record(&cache_dir, "x2.json", "https://x", "b", "2020-01-01T00:00:00Z");
		write_record(&cache_dir, "y.json", "https://y", "c", "2030-01-01T00:00:00Z");
		fs::write(cache_dir.join("broken.json"), "garbage").unwrap();
		let cookie_file = temp.path().join(".aws-mfa-sso");
		fs::write(&cookie_file, "Y29va2ll").unwrap();
		Fixture {
			_temp: temp,
			cache_dir,
			cookie_file,
		}
	}

	fn remaining(dir: &std::path::Path) -> Vec<String> {
		let mut names: Vec<String> = fs::read_dir(dir)
			.unwrap()
			.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
			.collect();
		names.sort();
		names
	}

	#[test]
	fn clear_without_filter_removes_everything() {
		let f = fixture();
		let report = SessionCacheManager::new(f.cache_dir.clone(), f.cookie_file.clone()).clear(None);

		assert_eq!(report.records_removed, 4);
		assert!(report.cookie_removed);
		assert_eq!(report.failures, 0);
		assert!(remaining(&f.cache_dir).is_empty());
		assert!(!f.cookie_file.exists());
	}

	#[test]
	fn clear_with_filter_keeps_other_start_urls() {
		let f = fixture();
		let report = SessionCacheManager::new(f.cache_dir.clone(), f.cookie_file.clone()).clear(Some("https://x"));

		assert_eq!(report.records_removed, 2);
		assert!(report.cookie_removed);
		assert_eq!(remaining(&f.cache_dir), vec!["broken.json".to_string(), "y.json".to_string()]);
		assert!(!f.cookie_file.exists());
	}

	#[test]
	fn failed_deletion_is_counted_and_the_rest_still_removed() {
		let f = fixture();
		let stuck = f.cache_dir.join("stuck.json");
		fs::create_dir(&stuck).unwrap();
		fs::write(stuck.join("inner"), "x").unwrap();

		let report = SessionCacheManager::new(f.cache_dir.clone(), f.cookie_file.clone()).clear(None);

		assert_eq!(report.failures, 1);
		assert_eq!(report.records_removed, 4);
		assert!(report.cookie_removed);
		assert_eq!(remaining(&f.cache_dir), vec!["stuck.json".to_string()]);
		assert!(!f.cookie_file.exists());
	}

	#[test]
	fn clear_tolerates_missing_directory_and_cookie() {
		let temp = TempDir::new().unwrap();
		let manager = SessionCacheManager::new(temp.path().join("missing"), temp.path().join("no-cookie"));
		assert_eq!(manager.clear(Some("https://x")), ClearReport::default());
	}
}
