//! DevTools HTTP endpoint probing and page target discovery.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// `/json/version` response subset from Chrome DevTools Protocol.
#[derive(Debug, Deserialize)]
pub struct CdpVersionInfo {
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: String,
	#[serde(rename = "Browser")]
	pub browser: Option<String>,
}

/// One entry of `/json/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
	pub id: String,
	#[serde(rename = "type")]
	pub target_type: String,
	#[serde(default)]
	pub url: String,
	#[serde(default)]
	pub web_socket_debugger_url: Option<String>,
}

fn client() -> Result<reqwest::Client> {
	reqwest::Client::builder()
		.timeout(Duration::from_millis(400))
		.build()
		.map_err(|e| Error::Endpoint(format!("Failed to create HTTP client: {}", e)))
}

/// Resolves CDP version metadata from `/json/version` on `port`.
pub async fn fetch_cdp_endpoint(port: u16) -> Result<CdpVersionInfo> {
	let client = client()?;
	let url = format!("http://127.0.0.1:{}/json/version", port);

	let response = client
		.get(&url)
		.send()
		.await
		.map_err(|e| Error::Endpoint(format!("Failed to connect to port {}: {}", port, e)))?;

	if !response.status().is_success() {
		return Err(Error::Endpoint(format!("unexpected status {} from {}", response.status(), url)));
	}

	response
		.json()
		.await
		.map_err(|e| Error::Endpoint(format!("Failed to parse CDP response: {}", e)))
}

/// Returns the WebSocket URL of a page target, opening a blank tab when none exists.
pub async fn page_target(port: u16) -> Result<String> {
	let client = client()?;
	let targets: Vec<TargetInfo> = client.get(format!("http://127.0.0.1:{}/json/list", port)).send().await?.json().await?;

	if let Some(url) = first_page_socket(&targets) {
		return Ok(url);
	}

	let created: TargetInfo = client
		.put(format!("http://127.0.0.1:{}/json/new?about:blank", port))
		.send()
		.await?
		.json()
		.await?;

	created
		.web_socket_debugger_url
		.ok_or_else(|| Error::Endpoint(format!("New target {} did not expose a debugger URL", created.id)))
}

fn first_page_socket(targets: &[TargetInfo]) -> Option<String> {
	targets
		.iter()
		.filter(|target| target.target_type == "page")
		.find_map(|target| target.web_socket_debugger_url.clone())
}
