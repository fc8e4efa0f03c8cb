//! SMTP recipient probing: opens one session per MX host and records the
//! reply code and round-trip latency for a decoy, the real address, and an
//! optional second decoy.

mod options;
mod probe;
mod session;
mod types;
mod util;

pub use options::ProbeOptions;
pub use probe::probe;
pub use types::{ProbeRecord, ProbeSession, SmtpReply};
