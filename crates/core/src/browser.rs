//! The browser as seen by the login ceremony.

use async_trait::async_trait;
use mfa_sso_protocol::{Cookie, Locator};

use crate::Result;

/// A single browser page driven by [`LoginOrchestrator`](crate::LoginOrchestrator).
///
/// Queries (`is_present`, `is_enabled`, `is_loaded`) answer for the current
/// page state and must not wait; polling is the orchestrator's job.
/// Implementations report their own failures as [`Error::Browser`](crate::Error::Browser).
#[async_trait]
pub trait Browser: Send + Sync {
	async fn navigate(&self, url: &str) -> Result<()>;

	async fn is_present(&self, locator: &Locator) -> Result<bool>;

	async fn is_enabled(&self, locator: &Locator) -> Result<bool>;

	/// Element is present and the document has finished loading.
	async fn is_loaded(&self, locator: &Locator) -> Result<bool>;

	async fn click(&self, locator: &Locator) -> Result<()>;

	async fn type_text(&self, locator: &Locator, text: &str) -> Result<()>;

	async fn press_enter(&self, locator: &Locator) -> Result<()>;

	async fn cookies(&self) -> Result<Vec<Cookie>>;

	async fn set_cookies(&self, cookies: &[Cookie]) -> Result<()>;

	/// Shuts the browser down and releases its resources.
	async fn close(self) -> Result<()>
	where
		Self: Sized;
}
