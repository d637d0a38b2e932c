use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aws-mfa-sso")]
#[command(about = "Headless browser AWS SSO login with MFA")]
#[command(
	long_about = "Automates AWS SSO login using a headless browser.\nHandles MFA authentication without requiring a browser window."
)]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// AWS profile to use for SSO login
	#[arg(short, long, global = true, env = "AWS_PROFILE")]
	pub profile: Option<String>,

	/// AWS CLI executable
	#[arg(long, global = true, env = "AWS_MFA_SSO_AWS_CLI", default_value = "aws", value_name = "PATH")]
	pub aws_cli: PathBuf,

	/// AWS shared config file (defaults to ~/.aws/config)
	#[arg(long, global = true, env = "AWS_CONFIG_FILE", value_name = "FILE")]
	pub config_file: Option<PathBuf>,

	#[command(flatten)]
	pub login: LoginArgs,

	#[command(subcommand)]
	pub command: Option<Commands>,
}

/// Options for the default login action.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoginArgs {
	/// Force login even if valid credentials exist
	#[arg(long)]
	pub force: bool,

	/// Seconds allowed for the browser ceremony
	#[arg(long, default_value_t = 300, value_name = "SECS")]
	pub timeout: u64,

	/// Show the browser window
	#[arg(long)]
	pub headed: bool,

	/// Chrome or Chromium executable (auto-detected by default)
	#[arg(long, env = "AWS_MFA_SSO_BROWSER", value_name = "PATH")]
	pub browser_path: Option<PathBuf>,

	/// Pass --use-device-code to `aws sso login`
	#[arg(long)]
	pub use_device_code: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Output credentials in AWS credential_process format
	///
	/// Assumes a role using SSO credentials. Use it from ~/.aws/config with the
	/// credential_process setting.
	CredentialProcess {
		/// Role ARN to assume
		#[arg(short, long)]
		role_arn: String,

		/// Region for the STS call
		#[arg(long, default_value = "us-east-1")]
		region: String,
	},
}
