use tracing_subscriber::EnvFilter;

const QUIET: &str = "warn,mfa_sso=info,mfa_sso_cli=info";
const DEBUG: &str = "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,tungstenite=warn,tokio_tungstenite=warn";

/// Sends log output to stderr; stdout carries `credential-process` JSON.
pub fn init_logging(verbose: u8) {
	let filter = match verbose {
		0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(QUIET)),
		1 => EnvFilter::new("info"),
		_ => EnvFilter::new(DEBUG),
	};

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}
