#![forbid(unsafe_code)]
//! mailprobe_lib — SMTP recipient-probing deliverability verifier and
//! name+domain email finder.

pub mod bulk;
pub mod config;
pub mod finder;
pub mod mx;
pub mod pattern;
pub mod scoring;
pub mod smtp;
pub mod timing;
pub mod validator;
pub mod verifier;

pub use bulk::verify_bulk;
pub use config::Config;
pub use finder::find_email;
pub use mx::{Error as MxError, MxCache, MxRecord, MxStatus, Provider, check_mx, classify_provider};
pub use pattern::{clean_domain, generate_patterns};
pub use scoring::{ScoreInput, ScoreOutput, Status};
pub use smtp::{ProbeOptions, ProbeRecord, ProbeSession, probe};
pub use timing::{TimingAnalysis, analyze};
pub use validator::{
    EmailError, NormalizedEmail, ValidationMode, ValidationReport, normalize_email, validate_email,
};
pub use verifier::{VerificationResult, matches_syntax, verify_email};
