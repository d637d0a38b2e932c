use std::path::{Path, PathBuf};

use mfa_sso::{CookieStore, ProfileResolver, SessionCacheInspector, SessionCacheManager, SsoPaths};

use crate::error::{Result, SsoError};

/// Settings and file locations shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
	pub paths: SsoPaths,
	/// Requested profile; `None` selects the default section.
	pub profile: Option<String>,
	pub aws_cli: PathBuf,
}

impl CommandContext {
	pub fn new(profile: Option<String>, aws_cli: PathBuf, config_file: Option<PathBuf>) -> Result<Self> {
		let home = dirs::home_dir().ok_or_else(|| SsoError::Context("Could not determine home directory".into()))?;
		Ok(Self::with_home(&home, profile, aws_cli, config_file))
	}

	pub fn with_home(home: &Path, profile: Option<String>, aws_cli: PathBuf, config_file: Option<PathBuf>) -> Self {
		let paths = SsoPaths::from_home(home);
		let paths = match config_file {
			Some(path) => paths.with_config_file(path),
			None => paths,
		};

		Self {
			paths,
			profile: profile.filter(|p| !p.is_empty()),
			aws_cli,
		}
	}

	pub fn profile_or_empty(&self) -> &str {
		self.profile.as_deref().unwrap_or("")
	}

	pub fn profiles(&self) -> ProfileResolver {
		ProfileResolver::new(self.paths.config_file.clone())
	}

	pub fn inspector(&self) -> SessionCacheInspector {
		SessionCacheInspector::new(self.paths.cache_dir.clone())
	}

	pub fn cache_manager(&self) -> SessionCacheManager {
		SessionCacheManager::new(self.paths.cache_dir.clone(), self.paths.cookie_file.clone())
	}

	pub fn cookie_store(&self) -> CookieStore {
		CookieStore::new(self.paths.cookie_file.clone())
	}
}
