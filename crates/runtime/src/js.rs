//! JavaScript snippets evaluated in the page to resolve [`Locator`]s.

use mfa_sso_protocol::Locator;

/// Encodes `value` as a JavaScript string literal.
fn literal(value: &str) -> String {
	serde_json::Value::String(value.to_string()).to_string()
}

/// Expression evaluating to the located element or `null`.
pub fn element_expr(locator: &Locator) -> String {
	match locator {
		Locator::Css { selector } => format!("document.querySelector({})", literal(selector)),
		Locator::Text { tag, pattern } => format!(
			"(() => {{ const re = new RegExp({}); return Array.from(document.querySelectorAll({})).find((el) => re.test(el.innerText || el.textContent || '')) || null; }})()",
			literal(pattern),
			literal(tag)
		),
	}
}

fn with_element(locator: &Locator, body: &str) -> String {
	format!("(() => {{ const el = {}; {} }})()", element_expr(locator), body)
}

pub fn present_js(locator: &Locator) -> String {
	with_element(locator, "return el !== null;")
}

pub fn enabled_js(locator: &Locator) -> String {
	with_element(
		locator,
		"return el !== null && !el.disabled && el.getAttribute('aria-disabled') !== 'true';",
	)
}

pub fn loaded_js(locator: &Locator) -> String {
	with_element(locator, "return el !== null && document.readyState === 'complete';")
}

/// Scrolls the element into view and returns its centre as `{x, y}`, or `null`.
pub fn center_js(locator: &Locator) -> String {
	with_element(
		locator,
		"if (el === null) return null; \
		 el.scrollIntoView({ block: 'center', inline: 'center' }); \
		 const r = el.getBoundingClientRect(); \
		 return { x: r.left + r.width / 2, y: r.top + r.height / 2 };",
	)
}

/// Focuses the element and returns whether it was found.
pub fn focus_js(locator: &Locator) -> String {
	with_element(locator, "if (el === null) return false; el.focus(); return true;")
}
