mod session;

pub use session::ChromeSession;
