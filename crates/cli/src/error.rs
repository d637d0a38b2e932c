use thiserror::Error;

#[derive(Debug, Error)]
pub enum SsoError {
	#[error(transparent)]
	Login(#[from] mfa_sso::Error),

	#[error("Browser launch failed: {0}")]
	BrowserLaunch(String),

	#[error("{0}")]
	Context(String),

	#[error("aws sso login: {0}")]
	DeviceAuth(String),

	#[error("Failed to assume role: {0}")]
	AssumeRole(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SsoError>;
