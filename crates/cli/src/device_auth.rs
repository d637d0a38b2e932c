//! The `aws sso login --no-browser` subprocess.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use mfa_sso::spawn_url_capture;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{Result, SsoError};

/// Grace period for the CLI to pick up the approval before it is waited on.
const SETTLE: Duration = Duration::from_secs(1);

/// How to invoke `aws sso login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthCommand {
	program: PathBuf,
	profile: Option<String>,
	use_device_code: bool,
}

impl DeviceAuthCommand {
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			profile: None,
			use_device_code: false,
		}
	}

	/// An empty name leaves the profile to the AWS CLI's own defaults.
	pub fn profile(mut self, profile: &str) -> Self {
		self.profile = (!profile.is_empty()).then(|| profile.to_string());
		self
	}

	pub fn use_device_code(mut self, enabled: bool) -> Self {
		self.use_device_code = enabled;
		self
	}

	pub fn program(&self) -> &Path {
		&self.program
	}

	pub fn args(&self) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec!["sso".into(), "login".into(), "--no-browser".into()];
		if let Some(profile) = &self.profile {
			args.push("--profile".into());
			args.push(profile.into());
		}
		if self.use_device_code {
			args.push("--use-device-code".into());
		}
		args
	}

	/// Starts the process with stdout piped into a URL scanner.
	pub fn spawn(&self) -> Result<DeviceAuthorization> {
		debug!(target = "aws-mfa-sso", program = %self.program.display(), args = ?self.args(), "starting device authorization");
		let mut child = Command::new(&self.program)
			.args(self.args())
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::inherit())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| SsoError::DeviceAuth(format!("failed to start {}: {e}", self.program.display())))?;

		let stdout = child
			.stdout
			.take()
			.ok_or_else(|| SsoError::DeviceAuth("stdout was not captured".into()))?;

		Ok(DeviceAuthorization {
			child,
			url: spawn_url_capture(stdout),
		})
	}
}

/// A running `aws sso login`. Dropping it kills the process.
pub struct DeviceAuthorization {
	child: Child,
	url: oneshot::Receiver<Option<String>>,
}

impl DeviceAuthorization {
	/// Waits for the verification URL to appear on the process's stdout.
	pub async fn authorization_url(&mut self) -> Result<String> {
		match (&mut self.url).await {
			Ok(Some(url)) => Ok(url),
			Ok(None) | Err(_) => Err(SsoError::DeviceAuth("Failed to capture SSO URL from aws sso login".into())),
		}
	}

	/// Lets the process finish the token exchange and logs how it exited.
	pub async fn finish(mut self) {
		tokio::time::sleep(SETTLE).await;
		match self.child.wait().await {
			Ok(status) if status.success() => info!(target = "aws-mfa-sso", "aws sso login completed successfully"),
			Ok(status) => warn!(target = "aws-mfa-sso", %status, "aws sso login exited with error"),
			Err(e) => warn!(target = "aws-mfa-sso", error = %e, "failed to wait for aws sso login"),
		}
	}
}
