//! Bounded-concurrency verification across many addresses, preserving input
//! order in the output.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::sync::mpsc;

use crate::config::Config;
use crate::mx::MxCache;
use crate::verifier::{self, VerificationResult};

/// Verifies every address in `emails` through a worker pool of at most
/// `max_workers` threads, returning one result per surviving input in its
/// original order.
///
/// Empty strings and addresses failing the syntax regex are dropped before
/// dispatch, per the pre-filter the bulk contract specifies; everything else
/// gets a [`VerificationResult`], including addresses whose worker panicked
/// (mapped to a `Status:"error"` record rather than aborting the batch).
///
/// `cache` is shared read-through-write across all workers, exactly as the
/// single verifier's `cache` parameter is — the bulk call does not own a
/// private cache of its own.
pub fn verify_bulk(
    emails: &[String],
    max_workers: usize,
    config: &Config,
    cache: &MxCache,
) -> Vec<VerificationResult> {
    let candidates: Vec<(usize, String)> = emails
        .iter()
        .enumerate()
        .filter(|(_, email)| {
            let trimmed = email.trim();
            !trimmed.is_empty() && verifier::matches_syntax(trimmed)
        })
        .map(|(index, email)| (index, email.trim().to_string()))
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    let worker_count = max_workers.max(1).min(candidates.len());

    let (tx, rx) = mpsc::channel::<(usize, VerificationResult)>();
    let work = Mutex::new(candidates.into_iter());

    std::thread::scope(|scope| {
        for _ in 0..worker_count {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || {
                loop {
                    let next = { work.lock().expect("bulk worker queue poisoned").next() };
                    let Some((index, email)) = next else {
                        break;
                    };
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        verifier::verify_email(&email, config, cache)
                    }))
                    .unwrap_or_else(|payload| {
                        VerificationResult::exception(&email, panic_message(&payload))
                    });
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);
    });

    let mut ordered: Vec<(usize, VerificationResult)> = rx.into_iter().collect();
    ordered.sort_by_key(|(index, _)| *index);
    ordered.into_iter().map(|(_, result)| result).collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_malformed_inputs_are_pre_filtered() {
        let emails = vec![
            "".to_string(),
            "   ".to_string(),
            "not-an-email".to_string(),
            "not-an-email".to_string(),
        ];
        let config = Config::default();
        let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
        let results = verify_bulk(&emails, 4, &config, &cache);
        assert!(results.is_empty());
    }

    #[test]
    fn bad_syntax_addresses_skip_network_io() {
        let emails = vec!["not-an-email".to_string(), "also-bad".to_string()];
        let config = Config::default();
        let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
        // "also-bad" fails the syntax regex too, so both are pre-filtered
        // and no worker is ever spawned.
        let results = verify_bulk(&emails, 4, &config, &cache);
        assert!(results.is_empty());
    }
}
