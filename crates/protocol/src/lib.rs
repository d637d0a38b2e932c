//! Data shapes shared across the aws-mfa-sso crates.
//!
//! This crate contains the serde-serializable types that cross a boundary:
//! files written by the AWS CLI (SSO cache records), the persisted browser
//! cookie, the JSON printed for `credential_process`, and the element
//! locators the login ceremony hands to the browser driver.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization and small predicates
//! * 1:1 with the external format: field names match what AWS tooling and
//!   the Chrome DevTools Protocol put on disk and on the wire
//! * Stable: Changes only when an external format changes
//!
//! Behavior built on these types lives in `mfa-sso` and `mfa-sso-runtime`.

pub mod cache;
pub mod cookie;
pub mod credentials;
pub mod locator;

pub use cache::*;
pub use cookie::*;
pub use credentials::*;
pub use locator::*;
