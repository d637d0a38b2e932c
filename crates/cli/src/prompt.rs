//! Terminal prompts for credentials and MFA codes.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use colored::Colorize;
use mfa_sso::{Error, Prompt};

/// Prompts on stderr and reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Prompt for TerminalPrompt {
	async fn read_line(&self, label: &str) -> mfa_sso::Result<String> {
		let label = label.to_string();
		tokio::task::spawn_blocking(move || ask(&label, false))
			.await
			.map_err(|e| Error::Prompt(e.to_string()))?
	}

	async fn read_hidden(&self, label: &str) -> mfa_sso::Result<String> {
		let label = label.to_string();
		tokio::task::spawn_blocking(move || ask(&label, true))
			.await
			.map_err(|e| Error::Prompt(e.to_string()))?
	}
}

fn ask(label: &str, hidden: bool) -> mfa_sso::Result<String> {
	let mut stderr = io::stderr();
	write!(stderr, "{}", label.yellow())?;
	stderr.flush()?;

	let mut line = String::new();
	let read = {
		let _echo = if hidden { EchoGuard::disable() } else { None };
		io::stdin().lock().read_line(&mut line)
	};
	if hidden {
		writeln!(stderr)?;
	}

	if read? == 0 {
		return Err(Error::Prompt("stdin closed".into()));
	}
	Ok(strip_newline(&line).to_string())
}

fn strip_newline(line: &str) -> &str {
	line.trim_end_matches(['\n', '\r'])
}

/// Turns terminal echo off until dropped.
#[cfg(unix)]
struct EchoGuard {
	fd: libc::c_int,
	original: libc::termios,
}

#[cfg(unix)]
impl EchoGuard {
	/// Returns `None` when stdin is not a terminal.
	fn disable() -> Option<Self> {
		let fd = libc::STDIN_FILENO;
		// SAFETY: `termios` is plain data; tcgetattr fills it before it is read.
		unsafe {
			if libc::isatty(fd) != 1 {
				return None;
			}
			let mut original: libc::termios = std::mem::zeroed();
			if libc::tcgetattr(fd, &mut original) != 0 {
				return None;
			}
			let mut silent = original;
			silent.c_lflag &= !libc::ECHO;
			if libc::tcsetattr(fd, libc::TCSANOW, &silent) != 0 {
				return None;
			}
			Some(Self { fd, original })
		}
	}
}

#[cfg(unix)]
impl Drop for EchoGuard {
	fn drop(&mut self) {
		// SAFETY: restores the settings captured in `disable` on the same descriptor.
		unsafe {
			libc::tcsetattr(self.fd, libc::TCSANOW, &self.original);
		}
	}
}

#[cfg(not(unix))]
struct EchoGuard;

#[cfg(not(unix))]
impl EchoGuard {
	fn disable() -> Option<Self> {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn newline_variants_are_stripped() {
		assert_eq!(strip_newline("alice\n"), "alice");
		assert_eq!(strip_newline("alice\r\n"), "alice");
		assert_eq!(strip_newline(" pass word \n"), " pass word ");
	}
}
