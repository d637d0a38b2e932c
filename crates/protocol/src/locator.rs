//! Element locators used by the login ceremony.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a page element.
///
/// `Text` matches the first `tag` element whose rendered text matches the
/// regular expression `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Locator {
	Css { selector: Cow<'static, str> },
	Text { tag: Cow<'static, str>, pattern: Cow<'static, str> },
}

impl Locator {
	pub const fn css(selector: &'static str) -> Self {
		Self::Css {
			selector: Cow::Borrowed(selector),
		}
	}

	pub const fn text(tag: &'static str, pattern: &'static str) -> Self {
		Self::Text {
			tag: Cow::Borrowed(tag),
			pattern: Cow::Borrowed(pattern),
		}
	}
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Css { selector } => f.write_str(selector),
			Self::Text { tag, pattern } => write!(f, "{tag} /{pattern}/"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_is_readable_in_logs() {
		assert_eq!(Locator::css("#awsui-input-0").to_string(), "#awsui-input-0");
		assert_eq!(Locator::text("button", "Next").to_string(), "button /Next/");
	}
}
