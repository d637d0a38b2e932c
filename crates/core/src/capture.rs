//! Extraction of the device authorization URL from `aws sso login` output.

use std::sync::LazyLock;

use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, trace};

static AUTHORIZATION_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^https.*user_code=([A-Z]{4}-?){2}").expect("authorization URL pattern is valid"));

/// Returns `true` for the line carrying the verification URL with its user code.
pub fn is_authorization_url(line: &str) -> bool {
	AUTHORIZATION_URL.is_match(line)
}

/// Reads one line without its terminator, replacing invalid UTF-8.
///
/// Returns `None` at end of stream or on a read error.
async fn next_line<R>(reader: &mut BufReader<R>) -> Option<String>
where
	R: AsyncRead + Unpin,
{
	let mut buf = Vec::new();
	match reader.read_until(b'\n', &mut buf).await {
		Ok(0) => None,
		Ok(_) => {
			let line = String::from_utf8_lossy(&buf);
			Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
		}
		Err(e) => {
			debug!("device authorization output unreadable: {}", e);
			None
		}
	}
}

/// Reads lines until one is the authorization URL.
pub async fn capture_authorization_url<R>(reader: &mut BufReader<R>) -> Option<String>
where
	R: AsyncRead + Unpin,
{
	while let Some(line) = next_line(reader).await {
		if is_authorization_url(&line) {
			return Some(line);
		}
		trace!(%line, "device authorization output");
	}
	None
}

/// Scans `reader` on a background task and delivers the URL once.
///
/// After delivery the task keeps draining `reader` until it closes so the
/// writing process never blocks on a full pipe.
pub fn spawn_url_capture<R>(reader: R) -> oneshot::Receiver<Option<String>>
where
	R: AsyncRead + Unpin + Send + 'static,
{
	let (tx, rx) = oneshot::channel();

	tokio::spawn(async move {
		let mut reader = BufReader::new(reader);
		let found = capture_authorization_url(&mut reader).await;
		let delivered = found.is_some();
		if tx.send(found).is_err() {
			debug!("authorization URL receiver dropped");
		}
		if delivered {
			while let Some(line) = next_line(&mut reader).await {
				trace!(%line, "device authorization output");
			}
		}
	});

	rx
}
