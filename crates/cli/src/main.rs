use clap::Parser;
use mfa_sso_cli::{cli::Cli, commands, context::CommandContext, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let result = match CommandContext::new(cli.profile, cli.aws_cli, cli.config_file) {
		Ok(ctx) => commands::dispatch(cli.command, cli.login, &ctx).await,
		Err(err) => Err(err),
	};

	if let Err(err) = result {
		error!(target = "aws-mfa-sso", error = %err, "command failed");
		std::process::exit(1);
	}
}
