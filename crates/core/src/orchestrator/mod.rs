//! The device authorization ceremony.
//!
//! Page flow, after the stored sign-in cookie is offered to the browser:
//!
//! ```text
//! Authorize -> Branch -+-> (Allow visible) ---------+-> ConfirmCode -> DeviceApproval -> Approved -> Persist
//!                      +-> (username field) SignIn -+
//! ```
//!
//! Every wait after `Start` shares one deadline ([`LoginOptions::timeout`]).

mod elements;
mod mfa;
mod step;
mod wait;


use std::slice;
use std::time::Duration;

use elements::*;
pub use mfa::{MFA_ATTEMPTS, normalize_mfa_code};
use parking_lot::Mutex;
use serde::Serialize;
pub use step::Step;
use tracing::{debug, info, warn};
use wait::Waiter;

use crate::{Browser, CookieStore, Error, Prompt, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOptions {
	/// Deadline for the whole ceremony.
	pub timeout: Duration,
	/// Delay between page queries while waiting for an element.
	pub poll_interval: Duration,
}

impl Default for LoginOptions {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_TIMEOUT,
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}
}

impl LoginOptions {
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
		self.poll_interval = poll_interval;
		self
	}
}

/// Which branch of the ceremony ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignInPath {
	/// The portal accepted the stored cookie; no credentials were asked for.
	AlreadyAuthenticated,
	SignedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
	pub path: SignInPath,
	/// Whether the sign-in cookie was found in the browser and written to disk.
	pub cookie_saved: bool,
}

/// Step in progress; outlives the ceremony future so a deadline can name it.
struct Progress(Mutex<Step>);

impl Progress {
	fn new() -> Self {
		Self(Mutex::new(Step::Start))
	}

	fn enter(&self, step: Step) {
		debug!(%step, "entering step");
		*self.0.lock() = step;
	}

	fn current(&self) -> Step {
		*self.0.lock()
	}
}

/// Drives one browser through the device authorization pages.
pub struct LoginOrchestrator<'a, P> {
	cookies: &'a CookieStore,
	prompt: &'a P,
	options: LoginOptions,
}

impl<'a, P: Prompt> LoginOrchestrator<'a, P> {
	pub fn new(cookies: &'a CookieStore, prompt: &'a P) -> Self {
		Self {
			cookies,
			prompt,
			options: LoginOptions::default(),
		}
	}

	pub fn with_options(mut self, options: LoginOptions) -> Self {
		self.options = options;
		self
	}

	/// Approves the device authorization at `url`.
	///
	/// The browser is closed before returning, whatever the outcome.
	pub async fn run<B: Browser>(&self, browser: B, url: &str) -> Result<LoginOutcome> {
		let progress = Progress::new();
		self.restore_cookie(&browser).await;

		let result = match tokio::time::timeout(self.options.timeout, self.ceremony(&browser, url, &progress)).await {
			Ok(result) => result,
			Err(_) => Err(Error::DeadlineExceeded {
				step: progress.current(),
				after: self.options.timeout,
			}),
		};

		if let Err(e) = browser.close().await {
			warn!("failed to close browser: {}", e);
		}
		result
	}

	async fn restore_cookie<B: Browser>(&self, browser: &B) {
		let Some(cookie) = self.cookies.load() else {
			debug!("no stored sign-in cookie");
			return;
		};

		match browser.set_cookies(slice::from_ref(&cookie)).await {
			Ok(()) => debug!(domain = %cookie.domain, "restored sign-in cookie"),
			Err(e) => warn!("could not restore sign-in cookie, continuing without it: {}", e),
		}
	}

	async fn ceremony<B: Browser>(&self, browser: &B, url: &str, progress: &Progress) -> Result<LoginOutcome> {
		let page = Waiter::new(browser, self.options.poll_interval);

		progress.enter(Step::Authorize);
		browser.navigate(url).await.map_err(|e| e.at_step(Step::Authorize))?;
		page.click_when_enabled(&NEXT_BUTTON).await.map_err(|e| e.at_step(Step::Authorize))?;

		progress.enter(Step::Branch);
		let (allow, username) = (ALLOW_BUTTON, USERNAME_INPUT);
		let path = tokio::select! {
			biased;
			found = page.present(&allow) => found.map(|()| SignInPath::AlreadyAuthenticated),
			found = page.present(&username) => found.map(|()| SignInPath::SignedIn),
		}
		.map_err(|e| e.at_step(Step::Branch))?;

		match path {
			SignInPath::AlreadyAuthenticated => info!("Existing portal session accepted"),
			SignInPath::SignedIn => {
				progress.enter(Step::SignIn);
				self.sign_in(&page).await.map_err(|e| e.at_step(Step::SignIn))?;
			}
		}

		progress.enter(Step::ConfirmCode);
		info!("Waiting for code confirmation page...");
		page.click_when_enabled(&CONFIRM_BUTTON).await.map_err(|e| e.at_step(Step::ConfirmCode))?;
		info!("Code confirmed");

		progress.enter(Step::DeviceApproval);
		info!("Waiting for device approval page...");
		page.click_when_enabled(&ALLOW_BUTTON).await.map_err(|e| e.at_step(Step::DeviceApproval))?;
		info!("Device access allowed");

		progress.enter(Step::Approved);
		info!("Waiting for approval confirmation...");
		page.loaded(&APPROVED_BANNER).await.map_err(|e| e.at_step(Step::Approved))?;
		info!("Request approved!");

		progress.enter(Step::Persist);
		let jar = browser.cookies().await.map_err(|e| e.at_step(Step::Persist))?;
		let cookie_saved = self.cookies.save_from_jar(&jar)?;
		if cookie_saved {
			debug!(path = %self.cookies.path().display(), "saved sign-in cookie");
		} else {
			warn!("sign-in cookie not found in browser; the next login will ask for credentials");
		}

		Ok(LoginOutcome { path, cookie_saved })
	}

	async fn sign_in<B: Browser>(&self, page: &Waiter<'_, B>) -> Result<()> {
		let username = self.prompt.read_line("Enter Username: ").await?;
		page.fill(&USERNAME_INPUT, username.trim()).await?;

		let password = self.prompt.read_hidden("Enter Password: ").await?;
		page.fill(&PASSWORD_INPUT, &password).await?;

		let code = self.read_mfa_code().await?;
		page.fill(&MFA_INPUT, &code).await?;
		info!("MFA code submitted");
		Ok(())
	}

	async fn read_mfa_code(&self) -> Result<String> {
		for attempt in 1..=MFA_ATTEMPTS {
			let raw = self.prompt.read_line("Enter MFA: ").await?;
			if let Some(code) = normalize_mfa_code(&raw) {
				return Ok(code);
			}
			warn!(attempt, "MFA code must be 6 digits");
		}

		Err(Error::Ceremony {
			step: Step::SignIn,
			message: format!("no valid MFA code after {MFA_ATTEMPTS} attempts"),
		})
	}
}
