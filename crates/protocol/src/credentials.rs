//! Credential shapes for the `credential_process` integration.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// JSON printed to stdout for the AWS `credential_process` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialProcessOutput {
	pub version: u8,
	pub access_key_id: String,
	pub secret_access_key: String,
	pub session_token: String,
	pub expiration: String,
}

/// The part of `aws sts assume-role --output json` this tool consumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumeRoleOutput {
	pub credentials: StsCredentials,
}

/// Temporary credentials returned by STS.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StsCredentials {
	pub access_key_id: String,
	pub secret_access_key: String,
	pub session_token: String,
	pub expiration: String,
}

impl From<StsCredentials> for CredentialProcessOutput {
	fn from(creds: StsCredentials) -> Self {
		Self {
			version: 1,
			access_key_id: creds.access_key_id,
			secret_access_key: creds.secret_access_key,
			session_token: creds.session_token,
			expiration: normalize_expiration(&creds.expiration),
		}
	}
}

/// Rewrites an STS expiry as RFC 3339 in UTC (`2030-01-01T09:00:00Z`).
///
/// Values that do not parse are passed through unchanged.
fn normalize_expiration(raw: &str) -> String {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true))
		.unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn assume_role_output_maps_to_credential_process_shape() {
		let raw = r#"{
  "Credentials": {
    "AccessKeyId": "ASIAEXAMPLE",
    "SecretAccessKey": "secret",
    "SessionToken": "token",
    "Expiration": "2030-01-01T10:00:00+01:00"
  },
  "AssumedRoleUser": {
    "AssumedRoleId": "AROA:aws-mfa-sso",
    "Arn": "arn:aws:sts::123456789012:assumed-role/Admin/aws-mfa-sso"
  }
}"#;
		let parsed: AssumeRoleOutput = serde_json::from_str(raw).unwrap();
		let output = CredentialProcessOutput::from(parsed.credentials);
		let json = serde_json::to_value(&output).unwrap();
		assert_eq!(json["Version"], 1);
		assert_eq!(json["AccessKeyId"], "ASIAEXAMPLE");
		assert_eq!(json["SecretAccessKey"], "secret");
		assert_eq!(json["SessionToken"], "token");
		assert_eq!(json["Expiration"], "2030-01-01T09:00:00Z");
	}

	#[test]
	fn unparseable_expiration_passes_through() {
		assert_eq!(normalize_expiration("tomorrow"), "tomorrow");
	}
}
