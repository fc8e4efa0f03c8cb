//! TTL-bounded, process-local cache in front of [`check_mx`](super::check_mx).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{Error, MxRecord, MxStatus, resolver};

struct CacheEntry {
    inserted_at: Instant,
    records: Vec<MxRecord>,
}

/// Caches MX lookups for `ttl`, keyed by lowercased domain.
///
/// A present entry older than `ttl` is treated as absent and a fresh lookup
/// is issued on the next read (lazy eviction); there is no background sweep
/// and no cross-process sharing. `dns_timeout`/`dns_lifetime` bound every
/// cache-miss lookup, as configured.
pub struct MxCache {
    ttl: Duration,
    dns_timeout: Duration,
    dns_lifetime: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MxCache {
    pub fn new(ttl: Duration, dns_timeout: Duration, dns_lifetime: Duration) -> Self {
        Self {
            ttl,
            dns_timeout,
            dns_lifetime,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `domain`, consulting the cache first.
    ///
    /// Empty results (`NoRecords`) are cached too, per the TTL, since a
    /// negative answer is as expensive to obtain as a positive one.
    pub fn resolve(&self, domain: &str) -> Result<MxStatus, Error> {
        let key = domain.trim().to_ascii_lowercase();

        {
            let mut entries = self.entries.lock().expect("mx cache poisoned");
            if let Some(entry) = entries.get(&key) {
                if entry.inserted_at.elapsed() < self.ttl {
                    return Ok(to_status(entry.records.clone()));
                }
                entries.remove(&key);
            }
        }

        let status = resolver::check_mx(domain, self.dns_timeout, self.dns_lifetime)?;

        let mut entries = self.entries.lock().expect("mx cache poisoned");
        entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                records: status.records().to_vec(),
            },
        );

        Ok(status)
    }
}

fn to_status(records: Vec<MxRecord>) -> MxStatus {
    if records.is_empty() {
        MxStatus::NoRecords
    } else {
        MxStatus::Records(records)
    }
}
