//! `credential-process`: role credentials on stdout for the AWS SDKs.
//!
//! Invoked by the AWS CLI/SDK through `credential_process` in `~/.aws/config`,
//! with `AWS_PROFILE` naming the downstream profile. The role is assumed with
//! the SSO profile's cached session via `aws sts assume-role`.

use std::path::Path;
use std::process::Stdio;

use chrono::Utc;
use mfa_sso_protocol::{AssumeRoleOutput, CredentialProcessOutput};
use tokio::process::Command;
use tracing::{debug, info};

use crate::context::CommandContext;
use crate::error::{Result, SsoError};

/// STS limit on `RoleSessionName`.
const MAX_SESSION_NAME: usize = 64;

pub async fn execute(role_arn: &str, region: &str, ctx: &CommandContext) -> Result<()> {
	let current = ctx.profile.as_deref().unwrap_or("default");
	let chain = ctx.profiles().resolve(current);
	let sso_profile = chain.sso_profile();

	if !ctx.inspector().has_valid_session(chain.start_url.as_deref()) {
		return Err(SsoError::Context(format!(
			"No valid SSO credentials found for profile '{sso_profile}'. Please run 'aws-mfa-sso --profile {sso_profile}' first to login."
		)));
	}

	let session_name = session_name(&hostname(), Utc::now().timestamp());
	info!(target = "aws-mfa-sso", profile = current, sso_profile, role_arn, %session_name, "assuming role");
	let output = assume_role(&ctx.aws_cli, sso_profile, role_arn, &session_name, region).await?;

	println!("{}", serde_json::to_string(&output)?);
	Ok(())
}

async fn assume_role(aws_cli: &Path, profile: &str, role_arn: &str, session_name: &str, region: &str) -> Result<CredentialProcessOutput> {
	let output = Command::new(aws_cli)
		.args(["sts", "assume-role", "--profile", profile, "--role-arn", role_arn])
		.args(["--role-session-name", session_name, "--region", region, "--output", "json"])
		.stdin(Stdio::null())
		.output()
		.await
		.map_err(|e| SsoError::AssumeRole(format!("failed to run {}: {e}", aws_cli.display())))?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr);
		return Err(SsoError::AssumeRole(stderr.trim().to_string()));
	}

	parse_assume_role(&output.stdout)
}

fn parse_assume_role(stdout: &[u8]) -> Result<CredentialProcessOutput> {
	let response: AssumeRoleOutput = serde_json::from_slice(stdout)?;
	debug!(target = "aws-mfa-sso", expiration = %response.credentials.expiration, "role assumed");
	Ok(response.credentials.into())
}

/// `aws-mfa-sso-<host>-<unix time>`, restricted to the characters STS accepts.
fn session_name(host: &str, timestamp: i64) -> String {
	format!("aws-mfa-sso-{host}-{timestamp}")
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || "+=,.@_-".contains(c) { c } else { '-' })
		.take(MAX_SESSION_NAME)
		.collect()
}

fn hostname() -> String {
	system_hostname()
		.filter(|name| !name.is_empty())
		.unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
	let mut buf = [0u8; 256];
	// SAFETY: the pointer and length describe `buf`, which outlives the call.
	let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
	if rc != 0 {
		return None;
	}
	let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
	std::str::from_utf8(&buf[..end]).ok().map(str::to_string)
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
	std::env::var("COMPUTERNAME").ok()
}
