//! The default command: log in unless a valid SSO session is cached.

use std::time::Duration;

use colored::Colorize;
use mfa_sso::{ClearReport, LoginOptions, LoginOrchestrator, SignInPath};
use mfa_sso_runtime::LaunchOptions;
use tracing::{debug, info};

use crate::browser::ChromeSession;
use crate::cli::LoginArgs;
use crate::context::CommandContext;
use crate::device_auth::DeviceAuthCommand;
use crate::error::Result;
use crate::prompt::TerminalPrompt;

pub async fn execute(args: &LoginArgs, ctx: &CommandContext) -> Result<()> {
	let chain = ctx.profiles().resolve(ctx.profile_or_empty());
	let start_url = chain.start_url.as_deref();
	info!(target = "aws-mfa-sso", profile = chain.sso_profile(), start_url = start_url.unwrap_or(""), "checking cached session");

	if args.force {
		report_cleared(&ctx.cache_manager().clear(start_url));
	} else if let Some(record) = ctx.inspector().find_valid(start_url) {
		debug!(target = "aws-mfa-sso", expires_at = %record.expires_at, "cached session is valid");
		println!("{}", "Already logged in with valid AWS SSO credentials".green());
		println!("{}", "Use --force to re-authenticate".yellow());
		return Ok(());
	}

	let mut device = DeviceAuthCommand::new(ctx.aws_cli.clone())
		.profile(chain.sso_profile())
		.use_device_code(args.use_device_code)
		.spawn()?;
	let url = device.authorization_url().await?;
	println!("{}", url.cyan());

	let browser = ChromeSession::launch(LaunchOptions {
		executable: args.browser_path.clone(),
		headless: !args.headed,
		..Default::default()
	})
	.await?;

	let cookies = ctx.cookie_store();
	let prompt = TerminalPrompt::new();
	let options = LoginOptions::default().with_timeout(Duration::from_secs(args.timeout));
	let outcome = LoginOrchestrator::new(&cookies, &prompt)
		.with_options(options)
		.run(browser, &url)
		.await?;

	match outcome.path {
		SignInPath::AlreadyAuthenticated => info!(target = "aws-mfa-sso", "signed in with stored portal session"),
		SignInPath::SignedIn => info!(target = "aws-mfa-sso", cookie_saved = outcome.cookie_saved, "signed in with credentials"),
	}

	device.finish().await;
	Ok(())
}

fn report_cleared(report: &ClearReport) {
	if report.records_removed > 0 {
		println!("{}", "Cleared existing SSO credentials".yellow());
	}
	if report.cookie_removed {
		println!("{}", "Cleared browser cookies".yellow());
	}
	if report.failures > 0 {
		println!("{}", format!("{} file(s) could not be removed", report.failures).yellow());
	}
}
