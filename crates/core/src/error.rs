//! Error types for the login core.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::orchestrator::Step;

#[derive(Debug, Error)]
pub enum Error {
	/// The ceremony ran past its overall deadline.
	#[error("Timeout: {step} step did not finish within {}s", after.as_secs())]
	DeadlineExceeded { step: Step, after: Duration },

	#[error("{step} step failed: {message}")]
	Ceremony { step: Step, message: String },

	#[error("Browser error: {0}")]
	Browser(String),

	#[error("Prompt error: {0}")]
	Prompt(String),

	#[error("Failed to write {}: {source}", path.display())]
	Persist {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Attributes a collaborator failure to the ceremony step it happened in.
	///
	/// Deadline and persistence errors already carry their own context and
	/// pass through unchanged.
	pub fn at_step(self, step: Step) -> Self {
		match self {
			Self::DeadlineExceeded { .. } | Self::Ceremony { .. } | Self::Persist { .. } => self,
			other => Self::Ceremony {
				step,
				message: other.to_string(),
			},
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
