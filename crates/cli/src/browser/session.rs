use async_trait::async_trait;
use mfa_sso::{Browser, Cookie, Locator};
use mfa_sso_runtime::{HeadlessChrome, LaunchOptions};
use tracing::debug;

use crate::error::{Result, SsoError};

/// Headless Chrome driven over CDP, seen through [`Browser`].
pub struct ChromeSession {
	chrome: HeadlessChrome,
}

impl ChromeSession {
	pub async fn launch(options: LaunchOptions) -> Result<Self> {
		debug!(target = "aws-mfa-sso", headless = options.headless, "starting Chrome...");
		let chrome = HeadlessChrome::launch(options)
			.await
			.map_err(|e| SsoError::BrowserLaunch(e.to_string()))?;
		Ok(Self { chrome })
	}
}

fn browser_error(err: mfa_sso_runtime::Error) -> mfa_sso::Error {
	mfa_sso::Error::Browser(err.to_string())
}

#[async_trait]
impl Browser for ChromeSession {
	async fn navigate(&self, url: &str) -> mfa_sso::Result<()> {
		self.chrome.page().navigate(url).await.map_err(browser_error)
	}

	async fn is_present(&self, locator: &Locator) -> mfa_sso::Result<bool> {
		self.chrome.page().is_present(locator).await.map_err(browser_error)
	}

	async fn is_enabled(&self, locator: &Locator) -> mfa_sso::Result<bool> {
		self.chrome.page().is_enabled(locator).await.map_err(browser_error)
	}

	async fn is_loaded(&self, locator: &Locator) -> mfa_sso::Result<bool> {
		self.chrome.page().is_loaded(locator).await.map_err(browser_error)
	}

	async fn click(&self, locator: &Locator) -> mfa_sso::Result<()> {
		self.chrome.page().click(locator).await.map_err(browser_error)
	}

	async fn type_text(&self, locator: &Locator, text: &str) -> mfa_sso::Result<()> {
		self.chrome.page().type_text(locator, text).await.map_err(browser_error)
	}

	async fn press_enter(&self, locator: &Locator) -> mfa_sso::Result<()> {
		self.chrome.page().press_enter(locator).await.map_err(browser_error)
	}

	async fn cookies(&self) -> mfa_sso::Result<Vec<Cookie>> {
		self.chrome.page().cookies().await.map_err(browser_error)
	}

	async fn set_cookies(&self, cookies: &[Cookie]) -> mfa_sso::Result<()> {
		self.chrome.page().set_cookies(cookies).await.map_err(browser_error)
	}

	async fn close(self) -> mfa_sso::Result<()> {
		self.chrome.close().await.map_err(browser_error)
	}
}
