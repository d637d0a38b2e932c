//! JSON-RPC connection to a Chrome DevTools target.
//!
//! This module implements request/response correlation on top of a
//! WebSocket. It handles:
//! - Generating unique request IDs
//! - Correlating responses with pending requests
//! - Distinguishing events from responses
//!
//! # Message Flow
//!
//! 1. Caller invokes [`CdpConnection::send`] with a method and params
//! 2. Connection generates a unique ID and creates a oneshot channel
//! 3. Request is serialized and written to the socket
//! 4. Caller awaits the oneshot receiver
//! 5. The reader task receives the response and completes the channel by ID
//!
//! Events carry no `id` and are only traced; the ceremony polls page state
//! instead of subscribing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace};

use crate::error::{Error, Result};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Callbacks = Arc<Mutex<HashMap<u32, oneshot::Sender<Result<Value>>>>>;

/// CDP command sent to the browser.
///
/// ```json
/// { "id": 7, "method": "Page.navigate", "params": { "url": "https://example.com" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
	pub id: u32,
	pub method: String,
	pub params: Value,
}

/// CDP command result.
///
/// ```json
/// { "id": 7, "error": { "code": -32000, "message": "Cannot navigate to invalid URL" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
	pub id: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
	pub code: i64,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
}

/// Unsolicited notification such as `Page.loadEventFired`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
	pub method: String,
	#[serde(default)]
	pub params: Value,
}

/// Messages with an `id` are responses; everything else is an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
	Response(Response),
	Event(Event),
}

/// Connection to a single DevTools target.
///
/// Multiple requests may be in flight; a background task owns the read half
/// of the socket and completes pending requests as responses arrive.
pub struct CdpConnection {
	last_id: AtomicU32,
	callbacks: Callbacks,
	sink: tokio::sync::Mutex<SplitSink<Socket, WsMessage>>,
	reader: JoinHandle<()>,
}

impl CdpConnection {
	/// Opens a WebSocket to `url` and starts the reader task.
	pub async fn connect(url: &str) -> Result<Self> {
		let (socket, _) = tokio_tungstenite::connect_async(url).await?;
		let (sink, mut stream) = socket.split();
		let callbacks: Callbacks = Arc::new(Mutex::new(HashMap::new()));

		let reader_callbacks = Arc::clone(&callbacks);
		let reader = tokio::spawn(async move {
			while let Some(frame) = stream.next().await {
				let text = match frame {
					Ok(WsMessage::Text(text)) => text,
					Ok(WsMessage::Close(_)) => break,
					Ok(_) => continue,
					Err(e) => {
						debug!("DevTools socket error: {}", e);
						break;
					}
				};

				handle_frame(&reader_callbacks, &text);
			}

			debug!("DevTools message loop ended");
			// Dropping the senders wakes every waiter with ChannelClosed.
			reader_callbacks.lock().clear();
		});

		Ok(Self {
			last_id: AtomicU32::new(0),
			callbacks,
			sink: tokio::sync::Mutex::new(sink),
			reader,
		})
	}

	/// Sends `method` and awaits its result.
	pub async fn send(&self, method: &str, params: Value) -> Result<Value> {
		let id = self.last_id.fetch_add(1, Ordering::SeqCst);
		let (tx, rx) = oneshot::channel();
		self.callbacks.lock().insert(id, tx);

		let request = Request {
			id,
			method: method.to_string(),
			params,
		};
		let payload = serde_json::to_string(&request)?;
		trace!(id, %method, "sending DevTools command");

		if let Err(e) = self.sink.lock().await.send(WsMessage::Text(payload.into())).await {
			self.callbacks.lock().remove(&id);
			return Err(e.into());
		}

		match rx.await {
			Ok(Err(Error::Protocol(message))) => Err(Error::Protocol(format!("{}: {}", method, message))),
			Ok(result) => result,
			Err(_) => Err(Error::ChannelClosed),
		}
	}
}

impl Drop for CdpConnection {
	fn drop(&mut self) {
		self.reader.abort();
	}
}

/// Completes the pending request a response belongs to.
fn dispatch(callbacks: &Callbacks, message: Message) -> Result<()> {
	match message {
		Message::Response(response) => {
			let callback = callbacks
				.lock()
				.remove(&response.id)
				.ok_or_else(|| Error::Protocol(format!("Cannot find request to respond: id={}", response.id)))?;

			let result = match response.error {
				Some(payload) => Err(parse_protocol_error(payload)),
				None => Ok(response.result.unwrap_or(Value::Null)),
			};

			// Receiver may have been dropped by a caller that gave up waiting.
			let _ = callback.send(result);
			Ok(())
		}
		Message::Event(event) => {
			trace!(method = %event.method, "DevTools event");
			Ok(())
		}
	}
}

fn parse_protocol_error(payload: ErrorPayload) -> Error {
	match payload.data {
		Some(data) => Error::Protocol(format!("{} ({}; code {})", payload.message, data, payload.code)),
		None => Error::Protocol(format!("{} (code {})", payload.message, payload.code)),
	}
}

/// Parses and dispatches one text frame.
///
/// Frames can carry cookie values, so an unparsable frame is logged by length only.
fn handle_frame(callbacks: &Callbacks, text: &str) {
	match serde_json::from_str::<Message>(text) {
		Ok(message) => {
			if let Err(e) = dispatch(callbacks, message) {
				error!("Error dispatching message: {}", e);
			}
		}
		Err(e) => error!(len = text.len(), "Failed to parse message: {}", e),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn callbacks() -> Callbacks {
		Arc::new(Mutex::new(HashMap::new()))
	}

	#[tokio::test]
	async fn dispatch_response_success() {
		let callbacks = callbacks();
		let (tx, rx) = oneshot::channel();
		callbacks.lock().insert(3, tx);

		dispatch(
			&callbacks,
			Message::Response(Response {
				id: 3,
				result: Some(json!({"frameId": "F1"})),
				error: None,
			}),
		)
		.unwrap();

		let result = rx.await.unwrap().unwrap();
		assert_eq!(result["frameId"], "F1");
		assert!(callbacks.lock().is_empty());
	}

	#[tokio::test]
	async fn dispatch_response_error() {
		let callbacks = callbacks();
		let (tx, rx) = oneshot::channel();
		callbacks.lock().insert(0, tx);

		dispatch(
			&callbacks,
			Message::Response(Response {
				id: 0,
				result: None,
				error: Some(ErrorPayload {
					code: -32000,
					message: "Cannot navigate to invalid URL".to_string(),
					data: None,
				}),
			}),
		)
		.unwrap();

		match rx.await.unwrap() {
			Err(Error::Protocol(msg)) => assert!(msg.contains("Cannot navigate to invalid URL")),
			other => panic!("Expected Protocol error, got {:?}", other),
		}
	}

	#[test]
	fn dispatch_unknown_id_is_an_error() {
		let callbacks = callbacks();
		let result = dispatch(
			&callbacks,
			Message::Response(Response {
				id: 999,
				result: Some(Value::Null),
				error: None,
			}),
		);
		match result {
			Err(Error::Protocol(msg)) => assert!(msg.contains("Cannot find request")),
			other => panic!("Expected Protocol error, got {:?}", other),
		}
	}

	#[test]
	fn message_deserialization_distinguishes_events() {
		let response: Message = serde_json::from_str(r#"{"id": 42, "result": {}}"#).unwrap();
		assert!(matches!(response, Message::Response(Response { id: 42, .. })));

		let event: Message = serde_json::from_str(r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.5}}"#).unwrap();
		match event {
			Message::Event(event) => assert_eq!(event.method, "Page.loadEventFired"),
			_ => panic!("Expected Event"),
		}
	}

	#[derive(Clone, Default)]
	struct Captured(Arc<Mutex<Vec<u8>>>);

	impl std::io::Write for Captured {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			self.0.lock().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn unparsable_frame_is_logged_without_its_contents() {
		let captured = Captured::default();
		let writer = captured.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();

		let frame = r#"{"id": "not-a-number", "result": {"cookies": [{"name": "x-amz-sso_authn", "value": "s3cret"}]}}"#;
		tracing::subscriber::with_default(subscriber, || handle_frame(&callbacks(), frame));

		let logged = String::from_utf8(captured.0.lock().clone()).unwrap();
		assert!(logged.contains("Failed to parse message"), "{logged}");
		assert!(logged.contains(&format!("len={}", frame.len())), "{logged}");
		assert!(!logged.contains("s3cret"), "{logged}");
	}
}
