//! Profile lookup in the AWS shared config file.
//!
//! Only two keys are consumed: `sso_start_url` and `source_profile`. A missing
//! file, section, or key is not an error; lookups simply return `None`.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

const START_URL_KEY: &str = "sso_start_url";
const SOURCE_PROFILE_KEY: &str = "source_profile";

/// How a requested profile maps onto an SSO start URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChain {
	/// Requested profile; empty means the default section.
	pub requested: String,
	/// The requested profile's `source_profile`, followed one hop only.
	pub source_profile: Option<String>,
	/// `sso_start_url` of the SSO profile.
	pub start_url: Option<String>,
}

impl ProfileChain {
	/// Profile that owns the SSO configuration.
	pub fn sso_profile(&self) -> &str {
		self.source_profile.as_deref().unwrap_or(&self.requested)
	}
}

#[derive(Debug, Clone)]
pub struct ProfileResolver {
	config_file: PathBuf,
}

impl ProfileResolver {
	pub fn new(config_file: PathBuf) -> Self {
		Self { config_file }
	}

	pub fn start_url(&self, profile: &str) -> Option<String> {
		find_key(&self.read()?, profile, START_URL_KEY)
	}

	pub fn source_profile(&self, profile: &str) -> Option<String> {
		find_key(&self.read()?, profile, SOURCE_PROFILE_KEY)
	}

	/// Resolves `profile` to its start URL, following `source_profile` once.
	pub fn resolve(&self, profile: &str) -> ProfileChain {
		let Some(config) = self.read() else {
			return ProfileChain {
				requested: profile.to_string(),
				..Default::default()
			};
		};

		let source_profile = find_key(&config, profile, SOURCE_PROFILE_KEY);
		let owner = source_profile.as_deref().unwrap_or(profile);
		let start_url = find_key(&config, owner, START_URL_KEY);
		debug!(profile, sso_profile = owner, start_url = start_url.as_deref().unwrap_or(""), "resolved profile");

		ProfileChain {
			requested: profile.to_string(),
			source_profile,
			start_url,
		}
	}

	fn read(&self) -> Option<String> {
		match fs::read_to_string(&self.config_file) {
			Ok(text) => Some(text),
			Err(e) => {
				debug!(path = %self.config_file.display(), "config not readable: {}", e);
				None
			}
		}
	}
}

/// Section header for `profile`: `[default]` for the default profile, `[profile <name>]` otherwise.
pub fn section_header(profile: &str) -> String {
	match profile {
		"" | "default" => "[default]".to_string(),
		name => format!("[profile {name}]"),
	}
}

/// Returns the first non-empty value of `key` inside `profile`'s section.
pub fn find_key(config: &str, profile: &str, key: &str) -> Option<String> {
	let header = section_header(profile);
	let mut in_section = false;

	for line in config.lines().map(str::trim) {
		if line.starts_with('[') && line.ends_with(']') {
			in_section = line == header;
			continue;
		}
		if !in_section {
			continue;
		}

		let Some((name, value)) = line.split_once('=') else {
			continue;
		};
		if name.trim() == key {
			let value = value.trim();
			return (!value.is_empty()).then(|| value.to_string());
		}
	}

	None
}
