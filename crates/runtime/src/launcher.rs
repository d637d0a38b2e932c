//! Browser process launch helpers.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::{Error, Result};
use crate::probe::{CdpVersionInfo, fetch_cdp_endpoint};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Command-line flags for a private, automation-only browser profile.
pub fn chrome_args(port: u16, user_data_dir: &Path, headless: bool) -> Vec<String> {
	let mut args = vec![
		format!("--remote-debugging-port={}", port),
		format!("--user-data-dir={}", user_data_dir.display()),
		"--no-first-run".to_string(),
		"--no-default-browser-check".to_string(),
		"--disable-background-networking".to_string(),
		"--disable-extensions".to_string(),
		"--disable-sync".to_string(),
		"--window-size=1280,900".to_string(),
	];
	if headless {
		args.push("--headless=new".to_string());
		args.push("--disable-gpu".to_string());
	}
	args.push("about:blank".to_string());
	args
}

/// Spawns the browser with remote debugging on `port`.
pub fn spawn_chrome(executable: &Path, port: u16, user_data_dir: &Path, headless: bool) -> Result<Child> {
	let mut cmd = Command::new(executable);
	cmd.args(chrome_args(port, user_data_dir, headless))
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.kill_on_drop(true);

	debug!(executable = %executable.display(), port, "spawning browser");
	cmd.spawn()
		.map_err(|e| Error::Launch(format!("Failed to launch {}: {}", executable.display(), e)))
}

/// Polls `/json/version` until the endpoint answers, the process exits, or `startup_timeout` elapses.
pub async fn wait_for_endpoint(child: &mut Child, port: u16, startup_timeout: Duration) -> Result<CdpVersionInfo> {
	let max_attempts = (startup_timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);
	let mut last_error = "endpoint not reachable".to_string();

	for _ in 0..max_attempts {
		tokio::time::sleep(POLL_INTERVAL).await;

		if let Ok(Some(status)) = child.try_wait() {
			return Err(Error::Launch(format!(
				"Browser exited before debugging endpoint became available (status: {})",
				status
			)));
		}

		match fetch_cdp_endpoint(port).await {
			Ok(info) => return Ok(info),
			Err(e) => {
				last_error = e.to_string();
				continue;
			}
		}
	}

	Err(Error::Launch(format!(
		"Browser launched but debugging endpoint not available on port {}. \n\
         Last error: {}",
		port, last_error
	)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn headless_args_include_debugging_port_and_profile() {
		let args = chrome_args(9333, Path::new("/tmp/profile"), true);
		assert!(args.contains(&"--remote-debugging-port=9333".to_string()));
		assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
		assert!(args.contains(&"--headless=new".to_string()));
		assert_eq!(args.last().map(String::as_str), Some("about:blank"));
	}

	#[test]
	fn headed_args_omit_headless_flag() {
		let args = chrome_args(9333, Path::new("/tmp/profile"), false);
		assert!(!args.iter().any(|arg| arg.starts_with("--headless")));
	}
}
