//! Page-level operations over a DevTools connection.

use mfa_sso_protocol::{Cookie, Locator};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::connection::CdpConnection;
use crate::error::{Error, Result};
use crate::js;

#[derive(Debug, Deserialize)]
struct Point {
	x: f64,
	y: f64,
}

#[derive(Debug, Deserialize)]
struct CookieList {
	cookies: Vec<Cookie>,
}

/// A single browser tab driven over CDP.
pub struct ChromePage {
	conn: CdpConnection,
}

impl ChromePage {
	pub fn new(conn: CdpConnection) -> Self {
		Self { conn }
	}

	/// Enables the domains the page operations rely on.
	pub async fn enable(&self) -> Result<()> {
		self.conn.send("Page.enable", json!({})).await?;
		self.conn.send("Network.enable", json!({})).await?;
		Ok(())
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		let result = self.conn.send("Page.navigate", json!({ "url": url })).await.map_err(|e| Error::Navigation {
			url: url.to_string(),
			reason: e.to_string(),
		})?;

		match result.get("errorText").and_then(Value::as_str) {
			Some(reason) if !reason.is_empty() => Err(Error::Navigation {
				url: url.to_string(),
				reason: reason.to_string(),
			}),
			_ => Ok(()),
		}
	}

	/// Evaluates `expression` and returns its value by JSON.
	pub async fn evaluate(&self, expression: &str) -> Result<Value> {
		let result = self
			.conn
			.send(
				"Runtime.evaluate",
				json!({
					"expression": expression,
					"returnByValue": true,
					"awaitPromise": true,
				}),
			)
			.await?;

		if let Some(details) = result.get("exceptionDetails") {
			let text = details
				.pointer("/exception/description")
				.or_else(|| details.get("text"))
				.and_then(Value::as_str)
				.unwrap_or("uncaught exception");
			return Err(Error::Evaluation(text.to_string()));
		}

		Ok(result.pointer("/result/value").cloned().unwrap_or(Value::Null))
	}

	async fn evaluate_bool(&self, expression: &str) -> Result<bool> {
		Ok(self.evaluate(expression).await?.as_bool().unwrap_or(false))
	}

	pub async fn is_present(&self, locator: &Locator) -> Result<bool> {
		self.evaluate_bool(&js::present_js(locator)).await
	}

	pub async fn is_enabled(&self, locator: &Locator) -> Result<bool> {
		self.evaluate_bool(&js::enabled_js(locator)).await
	}

	pub async fn is_loaded(&self, locator: &Locator) -> Result<bool> {
		self.evaluate_bool(&js::loaded_js(locator)).await
	}

	/// Clicks the centre of the element with a real mouse press.
	pub async fn click(&self, locator: &Locator) -> Result<()> {
		let value = self.evaluate(&js::center_js(locator)).await?;
		if value.is_null() {
			return Err(Error::ElementNotFound(locator.to_string()));
		}
		let point: Point = serde_json::from_value(value)?;
		debug!(%locator, x = point.x, y = point.y, "click");

		self.mouse_event("mouseMoved", &point, 0).await?;
		self.mouse_event("mousePressed", &point, 1).await?;
		self.mouse_event("mouseReleased", &point, 1).await
	}

	async fn mouse_event(&self, kind: &str, point: &Point, click_count: u32) -> Result<()> {
		self.conn
			.send(
				"Input.dispatchMouseEvent",
				json!({
					"type": kind,
					"x": point.x,
					"y": point.y,
					"button": "left",
					"clickCount": click_count,
				}),
			)
			.await
			.map(|_| ())
	}

	async fn focus(&self, locator: &Locator) -> Result<()> {
		if self.evaluate_bool(&js::focus_js(locator)).await? {
			Ok(())
		} else {
			Err(Error::ElementNotFound(locator.to_string()))
		}
	}

	/// Focuses the element and inserts `text` as if typed.
	pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
		self.focus(locator).await?;
		self.conn.send("Input.insertText", json!({ "text": text })).await.map(|_| ())
	}

	/// Focuses the element and presses Enter.
	pub async fn press_enter(&self, locator: &Locator) -> Result<()> {
		self.focus(locator).await?;
		for kind in ["keyDown", "keyUp"] {
			let mut params = json!({
				"type": kind,
				"key": "Enter",
				"code": "Enter",
				"windowsVirtualKeyCode": 13,
				"nativeVirtualKeyCode": 13,
			});
			if kind == "keyDown" {
				params["text"] = json!("\r");
			}
			self.conn.send("Input.dispatchKeyEvent", params).await?;
		}
		Ok(())
	}

	pub async fn cookies(&self) -> Result<Vec<Cookie>> {
		let result = self.conn.send("Network.getAllCookies", json!({})).await?;
		let list: CookieList = serde_json::from_value(result)?;
		Ok(list.cookies)
	}

	pub async fn set_cookies(&self, cookies: &[Cookie]) -> Result<()> {
		let params: Vec<Value> = cookies.iter().map(Cookie::to_cookie_param).collect();
		self.conn.send("Network.setCookies", json!({ "cookies": params })).await.map(|_| ())
	}

	/// Asks the browser process to exit.
	pub async fn close_browser(&self) -> Result<()> {
		self.conn.send("Browser.close", json!({})).await.map(|_| ())
	}
}
