use async_trait::async_trait;

use crate::Result;

/// Collects input from the person at the terminal.
#[async_trait]
pub trait Prompt: Send + Sync {
	/// Reads one visible line, without the trailing newline.
	async fn read_line(&self, label: &str) -> Result<String>;

	/// Reads one line without echoing it.
	async fn read_hidden(&self, label: &str) -> Result<String>;
}
