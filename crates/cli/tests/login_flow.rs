use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const CONFIG: &str = "\
[profile work]
source_profile = ssoacct
role_arn = arn:aws:iam::123456789012:role/Admin

[profile ssoacct]
sso_start_url = https://example.awsapps.com/start
sso_region = us-east-1
";

struct Home {
	dir: TempDir,
}

impl Home {
	fn new() -> Self {
		let dir = TempDir::new().expect("temp dir should be created");
		let aws = dir.path().join(".aws");
		fs::create_dir_all(aws.join("sso").join("cache")).unwrap();
		fs::write(aws.join("config"), CONFIG).unwrap();
		Self { dir }
	}

	fn path(&self) -> &Path {
		self.dir.path()
	}

	fn cache_record(&self, name: &str, start_url: &str, expires_at: &str) {
		let record = serde_json::json!({
			"startUrl": start_url,
			"region": "us-east-1",
			"accessToken": "token",
			"expiresAt": expires_at,
		});
		let path = self.path().join(".aws/sso/cache").join(name);
		fs::write(path, record.to_string()).unwrap();
	}

	fn run(&self, args: &[&str]) -> (bool, String, String) {
		let output = Command::new(env!("CARGO_BIN_EXE_aws-mfa-sso"))
			.args(args)
			.env("HOME", self.path())
			.env("NO_COLOR", "1")
			.env_remove("AWS_PROFILE")
			.env_remove("AWS_CONFIG_FILE")
			.env_remove("RUST_LOG")
			.env("AWS_MFA_SSO_AWS_CLI", self.path().join("no-such-aws"))
			.output()
			.expect("failed to execute aws-mfa-sso");

		let stdout = String::from_utf8_lossy(&output.stdout).to_string();
		let stderr = String::from_utf8_lossy(&output.stderr).to_string();
		(output.status.success(), stdout, stderr)
	}
}

#[test]
fn valid_cached_session_skips_login() {
	let home = Home::new();
	home.cache_record("a.json", "https://example.awsapps.com/start", "2099-01-01T00:00:00Z");

	let (success, stdout, stderr) = home.run(&["--profile", "work"]);
	assert!(success, "login failed: {stderr}");
	assert!(stdout.contains("Already logged in with valid AWS SSO credentials"), "{stdout}");
	assert!(stdout.contains("Use --force to re-authenticate"), "{stdout}");
}

#[test]
fn force_clears_matching_records_and_cookie() {
	let home = Home::new();
	home.cache_record("mine.json", "https://example.awsapps.com/start", "2099-01-01T00:00:00Z");
	home.cache_record("other.json", "https://other.awsapps.com/start", "2099-01-01T00:00:00Z");
	fs::write(home.path().join(".aws-mfa-sso"), "Y29va2ll").unwrap();

	let (success, stdout, stderr) = home.run(&["--profile", "work", "--force"]);

	// The fake AWS CLI path does not exist, so login stops after clearing.
	assert!(!success);
	assert!(stderr.contains("failed to start"), "{stderr}");
	assert!(stdout.contains("Cleared existing SSO credentials"), "{stdout}");
	assert!(stdout.contains("Cleared browser cookies"), "{stdout}");
	assert!(!home.path().join(".aws/sso/cache/mine.json").exists());
	assert!(home.path().join(".aws/sso/cache/other.json").exists());
	assert!(!home.path().join(".aws-mfa-sso").exists());
}

#[test]
fn expired_session_starts_device_authorization() {
	let home = Home::new();
	home.cache_record("a.json", "https://example.awsapps.com/start", "2000-01-01T00:00:00Z");

	let (success, stdout, stderr) = home.run(&["--profile", "work"]);
	assert!(!success);
	assert!(!stdout.contains("Already logged in"), "{stdout}");
	assert!(stderr.contains("aws sso login"), "{stderr}");
}

#[test]
fn credential_process_requires_cached_session() {
	let home = Home::new();

	let (success, stdout, stderr) = home.run(&[
		"credential-process",
		"--role-arn",
		"arn:aws:iam::123456789012:role/Admin",
		"--profile",
		"work",
	]);
	assert!(!success);
	assert!(stdout.is_empty(), "stdout must stay clean: {stdout}");
	assert!(stderr.contains("No valid SSO credentials found for profile 'ssoacct'"), "{stderr}");
}
