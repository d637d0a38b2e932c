//! AWS SSO token cache records (`~/.aws/sso/cache/*.json`).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One cached federation session as written by `aws sso login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCacheRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub start_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
	#[serde(deserialize_with = "deserialize_timestamp")]
	pub expires_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	#[serde(default, deserialize_with = "deserialize_optional_timestamp", skip_serializing_if = "Option::is_none")]
	pub registration_expires_at: Option<DateTime<Utc>>,
}

impl SessionCacheRecord {
	/// Returns `true` when the record carries a non-empty token that expires after `now`.
	pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
		self.access_token.as_deref().is_some_and(|token| !token.is_empty()) && self.expires_at > now
	}

	/// Returns `true` when `start_url` is empty or equal to this record's start URL.
	pub fn matches_start_url(&self, start_url: Option<&str>) -> bool {
		match start_url {
			None | Some("") => true,
			Some(url) => self.start_url.as_deref() == Some(url),
		}
	}
}

/// Parses an AWS cache timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`) and the older AWS CLI form with a
/// literal `UTC` suffix (`2024-05-01T12:00:00UTC`).
pub fn parse_cache_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
		return Some(parsed.with_timezone(&Utc));
	}

	let naive = raw.strip_suffix("UTC")?;
	NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	parse_cache_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid cache timestamp: {raw}")))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;
	match raw.as_deref() {
		None | Some("") => Ok(None),
		Some(value) => parse_cache_timestamp(value)
			.map(Some)
			.ok_or_else(|| serde::de::Error::custom(format!("invalid cache timestamp: {value}"))),
	}
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, TimeZone};

	use super::*;

	fn record(token: Option<&str>, expires_at: DateTime<Utc>) -> SessionCacheRecord {
		SessionCacheRecord {
			start_url: Some("https://x".into()),
			region: None,
			access_token: token.map(str::to_string),
			expires_at,
			client_id: None,
			client_secret: None,
			registration_expires_at: None,
		}
	}

	#[test]
	fn parses_aws_cli_v2_record() {
		let json = r#"{
  "startUrl": "https://example.awsapps.com/start",
  "region": "eu-west-1",
  "accessToken": "abc",
  "expiresAt": "2030-01-01T08:00:00Z",
  "clientId": "cid",
  "clientSecret": "secret",
  "registrationExpiresAt": "2030-03-01T08:00:00Z",
  "refreshToken": "ignored"
}"#;
		let record: SessionCacheRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.start_url.as_deref(), Some("https://example.awsapps.com/start"));
		assert_eq!(record.region.as_deref(), Some("eu-west-1"));
		assert_eq!(record.expires_at, Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap());
		assert!(record.registration_expires_at.is_some());
	}

	#[test]
	fn parses_legacy_utc_suffix() {
		let json = r#"{"accessToken":"abc","expiresAt":"2019-11-14T04:05:45UTC"}"#;
		let record: SessionCacheRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.expires_at, Utc.with_ymd_and_hms(2019, 11, 14, 4, 5, 45).unwrap());
		assert_eq!(record.start_url, None);
	}

	#[test]
	fn missing_expiry_is_malformed() {
		assert!(serde_json::from_str::<SessionCacheRecord>(r#"{"accessToken":"abc"}"#).is_err());
		assert!(serde_json::from_str::<SessionCacheRecord>(r#"{"accessToken":"abc","expiresAt":"soon"}"#).is_err());
	}

	#[test]
	fn usable_requires_token_and_future_expiry() {
		let now = Utc::now();
		assert!(record(Some("abc"), now + Duration::hours(1)).is_usable_at(now));
		assert!(!record(Some(""), now + Duration::hours(1)).is_usable_at(now));
		assert!(!record(None, now + Duration::hours(1)).is_usable_at(now));
		assert!(!record(Some("abc"), now).is_usable_at(now));
		assert!(!record(Some("abc"), now - Duration::seconds(1)).is_usable_at(now));
	}

	#[test]
	fn empty_filter_matches_any_start_url() {
		let rec = record(Some("abc"), Utc::now());
		assert!(rec.matches_start_url(None));
		assert!(rec.matches_start_url(Some("")));
		assert!(rec.matches_start_url(Some("https://x")));
		assert!(!rec.matches_start_url(Some("https://y")));
	}
}
