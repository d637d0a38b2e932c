use std::fmt;

use serde::Serialize;

/// A stage of the login ceremony, in the order the pages appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
	Start,
	Authorize,
	/// Waiting to learn whether the portal still recognises the session.
	Branch,
	SignIn,
	ConfirmCode,
	DeviceApproval,
	Approved,
	Persist,
}

impl Step {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Start => "start",
			Self::Authorize => "authorize",
			Self::Branch => "sign-in detection",
			Self::SignIn => "sign-in",
			Self::ConfirmCode => "code confirmation",
			Self::DeviceApproval => "device approval",
			Self::Approved => "approval confirmation",
			Self::Persist => "cookie persistence",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
