//! Per-user file locations, resolved once and passed to each component.

use std::path::{Path, PathBuf};

/// File holding the persisted sign-in cookie, relative to the home directory.
pub const COOKIE_FILE_NAME: &str = ".aws-mfa-sso";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoPaths {
	/// AWS shared config (`~/.aws/config`).
	pub config_file: PathBuf,
	/// SSO token cache written by the AWS CLI (`~/.aws/sso/cache`).
	pub cache_dir: PathBuf,
	pub cookie_file: PathBuf,
}

impl SsoPaths {
	pub fn from_home(home: &Path) -> Self {
		Self {
			config_file: home.join(".aws").join("config"),
			cache_dir: home.join(".aws").join("sso").join("cache"),
			cookie_file: home.join(COOKIE_FILE_NAME),
		}
	}

	/// Overrides the config location (`AWS_CONFIG_FILE`).
	pub fn with_config_file(mut self, config_file: PathBuf) -> Self {
		self.config_file = config_file;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paths_hang_off_home() {
		let paths = SsoPaths::from_home(Path::new("/home/dev"));
		assert_eq!(paths.config_file, PathBuf::from("/home/dev/.aws/config"));
		assert_eq!(paths.cache_dir, PathBuf::from("/home/dev/.aws/sso/cache"));
		assert_eq!(paths.cookie_file, PathBuf::from("/home/dev/.aws-mfa-sso"));
	}

	#[test]
	fn config_override_keeps_other_paths() {
		let paths = SsoPaths::from_home(Path::new("/home/dev")).with_config_file(PathBuf::from("/etc/aws.conf"));
		assert_eq!(paths.config_file, PathBuf::from("/etc/aws.conf"));
		assert_eq!(paths.cache_dir, PathBuf::from("/home/dev/.aws/sso/cache"));
	}
}
