use rand::{Rng, distributions::Alphanumeric};

/// Generates the local-part of a decoy address: 8 lowercase alphanumerics
/// drawn uniformly at random.
///
/// Collisions between concurrent probes are acceptable with high
/// probability of non-collision, not guaranteed; the RNG need not be
/// cryptographically secure.
pub(crate) fn random_local_part() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
