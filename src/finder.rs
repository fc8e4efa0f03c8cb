//! Sequential "first-deliverable-wins" lookup over a ranked pattern list.

use std::panic::{self, AssertUnwindSafe};

use crate::config::Config;
use crate::mx::MxCache;
use crate::pattern::generate_patterns;
use crate::verifier;

/// Tries each candidate generated for `full_name`@`domain` in order and
/// returns the first one the verifier marks deliverable.
///
/// `domain` must already be cleaned (see [`crate::pattern::clean_domain`]);
/// the HTTP adapter is responsible for that validation and its 400 response.
/// A panic inside a single verification is logged and treated as "try the
/// next pattern", matching the bulk verifier's exception handling but
/// without surfacing an error record, since the finder's contract only ever
/// returns an address or `None`.
pub fn find_email(full_name: &str, domain: &str, config: &Config, cache: &MxCache) -> Option<String> {
    let patterns = generate_patterns(full_name, domain);

    for candidate in patterns {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            verifier::verify_email(&candidate, config, cache)
        }));

        match outcome {
            Ok(result) if result.deliverable && result.status == "valid" => {
                return Some(candidate);
            }
            Ok(_) => continue,
            Err(_) => {
                tracing::warn!(candidate = %candidate, "verifier panicked, skipping pattern");
                continue;
            }
        }
    }

    None
}
