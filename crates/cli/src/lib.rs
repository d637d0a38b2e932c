pub mod browser;
pub mod cli;
pub mod commands;
pub mod context;
pub mod device_auth;
pub mod error;
pub mod logging;
pub mod prompt;
