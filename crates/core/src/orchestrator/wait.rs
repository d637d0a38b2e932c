//! Polling waits over [`Browser`] queries.

use std::future::Future;
use std::time::Duration;

use mfa_sso_protocol::Locator;
use tracing::debug;

use crate::{Browser, Error, Result};

/// Waits for page conditions by re-querying at a fixed interval.
///
/// There is no per-wait timeout; the ceremony deadline bounds every wait.
pub(crate) struct Waiter<'a, B> {
	browser: &'a B,
	poll_interval: Duration,
}

impl<'a, B: Browser> Waiter<'a, B> {
	pub(crate) fn new(browser: &'a B, poll_interval: Duration) -> Self {
		Self { browser, poll_interval }
	}

	pub(crate) async fn present(&self, locator: &Locator) -> Result<()> {
		poll_until(self.poll_interval, || self.browser.is_present(locator)).await
	}

	pub(crate) async fn enabled(&self, locator: &Locator) -> Result<()> {
		poll_until(self.poll_interval, || self.browser.is_enabled(locator)).await
	}

	pub(crate) async fn loaded(&self, locator: &Locator) -> Result<()> {
		poll_until(self.poll_interval, || self.browser.is_loaded(locator)).await
	}

	pub(crate) async fn click_when_enabled(&self, locator: &Locator) -> Result<()> {
		self.enabled(locator).await?;
		self.browser.click(locator).await
	}

	/// Types `text` into the field once it appears, then submits with Enter.
	pub(crate) async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
		self.present(locator).await?;
		self.browser.type_text(locator, text).await?;
		self.browser.press_enter(locator).await
	}
}

/// Runs `check` until it yields `true`, sleeping `interval` between attempts.
///
/// A failed browser query counts as "not yet": a page that is mid-navigation
/// answers with a destroyed execution context until the next document loads.
/// Any other error ends the wait.
pub(crate) async fn poll_until<F, Fut>(interval: Duration, mut check: F) -> Result<()>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<bool>>,
{
	loop {
		match check().await {
			Ok(true) => return Ok(()),
			Ok(false) => {}
			Err(Error::Browser(message)) => debug!(%message, "page query failed, retrying"),
			Err(e) => return Err(e),
		}
		tokio::time::sleep(interval).await;
	}
}
