/// Number of MFA code entries accepted before the ceremony gives up.
pub const MFA_ATTEMPTS: usize = 3;

/// Normalises a typed MFA code to its six digits.
///
/// Surrounding and embedded whitespace is ignored (`"123 456"` is accepted).
pub fn normalize_mfa_code(raw: &str) -> Option<String> {
	let code: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
	(code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())).then_some(code)
}
