//! Browser cookie shape, matching the Chrome DevTools Protocol `Network.Cookie`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Name of the cookie that marks an IAM Identity Center portal session as signed in.
pub const AUTH_COOKIE_NAME: &str = "x-amz-sso_authn";

/// SameSite attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
	Strict,
	Lax,
	None,
}

/// A browser cookie as reported by `Network.getAllCookies`.
///
/// Optional CDP fields default when absent so records written by any CDP
/// client (including earlier releases of this tool) load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
	pub name: String,
	pub value: String,
	#[serde(default)]
	pub domain: String,
	#[serde(default = "default_path")]
	pub path: String,
	/// Expiry in seconds since the epoch; `-1` for session cookies.
	#[serde(default = "session_expiry")]
	pub expires: f64,
	#[serde(default)]
	pub size: u32,
	#[serde(default)]
	pub http_only: bool,
	#[serde(default)]
	pub secure: bool,
	#[serde(default)]
	pub session: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub same_site: Option<SameSite>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub priority: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_scheme: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_port: Option<i32>,
}

fn default_path() -> String {
	"/".to_string()
}

fn session_expiry() -> f64 {
	-1.0
}

impl Cookie {
	/// Returns `true` for the IAM Identity Center sign-in cookie.
	pub fn is_auth_cookie(&self) -> bool {
		self.name == AUTH_COOKIE_NAME
	}

	/// Builds the `Network.CookieParam` object used to re-inject this cookie.
	///
	/// Read-only fields (`size`, `session`) are dropped and session cookies are
	/// sent without an expiry.
	pub fn to_cookie_param(&self) -> Value {
		let mut param = Map::new();
		param.insert("name".into(), json!(self.name));
		param.insert("value".into(), json!(self.value));
		param.insert("domain".into(), json!(self.domain));
		param.insert("path".into(), json!(self.path));
		param.insert("secure".into(), json!(self.secure));
		param.insert("httpOnly".into(), json!(self.http_only));
		if !self.session && self.expires >= 0.0 {
			param.insert("expires".into(), json!(self.expires));
		}
		if let Some(same_site) = self.same_site {
			param.insert("sameSite".into(), json!(same_site));
		}
		if let Some(priority) = &self.priority {
			param.insert("priority".into(), json!(priority));
		}
		if let Some(scheme) = &self.source_scheme {
			param.insert("sourceScheme".into(), json!(scheme));
		}
		if let Some(port) = self.source_port {
			param.insert("sourcePort".into(), json!(port));
		}
		Value::Object(param)
	}
}

/// Returns the first sign-in cookie in `jar`, if any.
pub fn find_auth_cookie(jar: &[Cookie]) -> Option<&Cookie> {
	jar.iter().find(|cookie| cookie.is_auth_cookie())
}
