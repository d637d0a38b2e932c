//! Launch and teardown of a private headless Chrome instance.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::connection::CdpConnection;
use crate::error::Result;
use crate::page::ChromePage;
use crate::{finder, launcher, probe, process};

const CLOSE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Browser executable; discovered from well-known locations when `None`.
	pub executable: Option<PathBuf>,
	pub headless: bool,
	pub startup_timeout: Duration,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self {
			executable: None,
			headless: true,
			startup_timeout: Duration::from_secs(15),
		}
	}
}

/// A browser process owned by this run, with one attached page.
///
/// The profile directory is throwaway: state that must survive between runs
/// is carried explicitly as cookies.
pub struct HeadlessChrome {
	child: Child,
	user_data_dir: PathBuf,
	page: ChromePage,
}

impl HeadlessChrome {
	pub async fn launch(options: LaunchOptions) -> Result<Self> {
		let executable = finder::resolve_executable(options.executable.as_deref())?;
		let port = process::free_port()?;
		let user_data_dir = std::env::temp_dir().join(format!("aws-mfa-sso-{}-{}", std::process::id(), port));
		std::fs::create_dir_all(&user_data_dir)?;

		let mut child = launcher::spawn_chrome(&executable, port, &user_data_dir, options.headless)?;
		let attached = async {
			let info = launcher::wait_for_endpoint(&mut child, port, options.startup_timeout).await?;
			info!(browser = info.browser.as_deref().unwrap_or("unknown"), port, "browser ready");

			let target = probe::page_target(port).await?;
			let page = ChromePage::new(CdpConnection::connect(&target).await?);
			page.enable().await?;
			Ok::<_, crate::Error>(page)
		}
		.await;

		match attached {
			Ok(page) => Ok(Self {
				child,
				user_data_dir,
				page,
			}),
			Err(e) => {
				let _ = child.kill().await;
				remove_profile_dir(&user_data_dir);
				Err(e)
			}
		}
	}

	pub fn page(&self) -> &ChromePage {
		&self.page
	}

	/// Closes the browser, killing it if it does not exit promptly, and removes its profile.
	pub async fn close(mut self) -> Result<()> {
		match tokio::time::timeout(CLOSE_GRACE, self.page.close_browser()).await {
			Ok(Ok(())) => {}
			Ok(Err(e)) => debug!("Browser.close failed: {}", e),
			Err(_) => debug!("Browser.close did not answer"),
		}

		let killed = match tokio::time::timeout(CLOSE_GRACE, self.child.wait()).await {
			Ok(Ok(status)) => {
				debug!(%status, "browser exited");
				Ok(())
			}
			_ => {
				warn!("browser did not exit after Browser.close, killing it");
				self.child.kill().await
			}
		};

		remove_profile_dir(&self.user_data_dir);
		Ok(killed?)
	}
}

fn remove_profile_dir(dir: &std::path::Path) {
	if let Err(e) = std::fs::remove_dir_all(dir) {
		debug!(path = %dir.display(), "could not remove browser profile: {}", e);
	}
}
