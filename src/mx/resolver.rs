use std::time::Duration;

use trust_dns_resolver::{Resolver, error::ResolveError, system_conf::read_system_conf};

use super::{Error, MxRecord, MxStatus};

/// Lookup MX records for `domain` using the system resolver, bounding each
/// query by `dns_timeout` and the overall attempt budget by `dns_lifetime`.
///
/// The domain is normalized via IDNA before querying DNS. The resulting
/// [`MxStatus`] contains the sorted list of records (ascending preference).
pub fn check_mx(domain: &str, dns_timeout: Duration, dns_lifetime: Duration) -> Result<MxStatus, Error> {
    let ascii = normalize_domain(domain)?;
    let (resolver_config, mut opts) = read_system_conf().map_err(Error::resolver_init)?;
    opts.timeout = dns_timeout;
    opts.attempts = attempts_for(dns_timeout, dns_lifetime);
    let resolver = Resolver::new(resolver_config, opts).map_err(Error::resolver_init)?;
    resolve_with(&resolver, &ascii)
}

/// Number of query attempts that fit `dns_lifetime` at `dns_timeout` each,
/// at least one.
pub(crate) fn attempts_for(dns_timeout: Duration, dns_lifetime: Duration) -> usize {
    if dns_timeout.is_zero() {
        return 1;
    }
    let attempts = (dns_lifetime.as_secs_f64() / dns_timeout.as_secs_f64()).floor() as usize;
    attempts.max(1)
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx,
{
    let mut records = resolver.lookup_mx(ascii_domain).map_err(Error::lookup)?;

    records.sort();
    records.dedup();

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}
