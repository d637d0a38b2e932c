//! Error types for the browser runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Browser launch failed: {0}")]
	Launch(String),

	#[error("DevTools endpoint unavailable: {0}")]
	Endpoint(String),

	#[error("Protocol error: {0}")]
	Protocol(String),

	#[error("Navigation to {url} failed: {reason}")]
	Navigation { url: String, reason: String },

	#[error("Script evaluation failed: {0}")]
	Evaluation(String),

	#[error("Element not found: {0}")]
	ElementNotFound(String),

	#[error("DevTools connection closed")]
	ChannelClosed,

	#[error("WebSocket error: {0}")]
	WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
