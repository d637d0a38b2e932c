//! Headless AWS IAM Identity Center (SSO) login with MFA.
//!
//! The crate decides whether a login is needed at all (profile resolution and
//! the SSO token cache), and when it is, drives the browser ceremony that
//! approves the device authorization started by `aws sso login --no-browser`:
//!
//! - [`ProfileResolver`] - maps a profile name to its SSO start URL
//! - [`SessionCacheInspector`] / [`SessionCacheManager`] - read and clear `~/.aws/sso/cache`
//! - [`CookieStore`] - carries the portal sign-in cookie between runs
//! - [`LoginOrchestrator`] - the page-by-page ceremony
//! - [`capture`] - picks the authorization URL out of the CLI's output
//!
//! The browser and the terminal are reached only through the [`Browser`] and
//! [`Prompt`] traits.

pub mod browser;
pub mod cache;
pub mod capture;
pub mod cookie_store;
pub mod error;
pub mod orchestrator;
pub mod paths;
pub mod profile;
pub mod prompt;

pub use browser::Browser;
pub use cache::{ClearReport, SessionCacheInspector, SessionCacheManager};
pub use capture::{is_authorization_url, spawn_url_capture};
pub use cookie_store::CookieStore;
pub use error::{Error, Result};
pub use orchestrator::{LoginOptions, LoginOrchestrator, LoginOutcome, SignInPath, Step};
pub use paths::SsoPaths;
pub use profile::{ProfileChain, ProfileResolver};
pub use prompt::Prompt;

pub use mfa_sso_protocol::{AUTH_COOKIE_NAME, Cookie, Locator, SessionCacheRecord};
