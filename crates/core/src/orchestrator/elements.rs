//! Elements of the IAM Identity Center device authorization pages.

use mfa_sso_protocol::Locator;

pub const NEXT_BUTTON: Locator = Locator::text("button", "Next");
pub const ALLOW_BUTTON: Locator = Locator::text("button", "Allow");
pub const USERNAME_INPUT: Locator = Locator::css("#awsui-input-0");
pub const PASSWORD_INPUT: Locator = Locator::css("#awsui-input-1");
pub const MFA_INPUT: Locator = Locator::css("#awsui-input-2");
pub const CONFIRM_BUTTON: Locator = Locator::text("button", "Confirm and continue");
pub const APPROVED_BANNER: Locator = Locator::text("div", "Request approved");
