//! Builds an ordered list of candidate local-parts from a human name, and
//! cleans a domain for use by the finder.

use std::collections::HashSet;

/// Removes non-letter/whitespace characters, lowercases, and splits on
/// whitespace into tokens.
fn clean_name(name: &str) -> Vec<String> {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    filtered
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Lowercases, drops a leading `@`, strips any character outside
/// `[a-z0-9.-]`, and requires at least one `.` to remain. `None` if the
/// cleaned domain has no dot.
pub fn clean_domain(domain: &str) -> Option<String> {
    let lowered = domain.trim().to_lowercase();
    let without_at = lowered.strip_prefix('@').unwrap_or(&lowered);
    let cleaned: String = without_at
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect();
    if cleaned.contains('.') {
        Some(cleaned)
    } else {
        None
    }
}

/// Generates the canonical 8-pattern candidate list for `full_name`@`domain`,
/// skipping any entry whose required token is empty and deduplicating while
/// preserving first-occurrence order.
///
/// `domain` is expected to already be cleaned (see [`clean_domain`]).
pub fn generate_patterns(full_name: &str, domain: &str) -> Vec<String> {
    let tokens = clean_name(full_name);
    let Some(first) = tokens.first() else {
        return Vec::new();
    };

    let last = if tokens.len() > 1 {
        tokens.last().cloned().unwrap_or_default()
    } else {
        String::new()
    };
    let fi = first.chars().next().map(String::from).unwrap_or_default();
    let li = last.chars().next().map(String::from).unwrap_or_default();

    let mut candidates = Vec::with_capacity(8);
    candidates.push(format!("{first}@{domain}"));
    if !last.is_empty() {
        candidates.push(format!("{last}@{domain}"));
    }
    if !fi.is_empty() && !last.is_empty() {
        candidates.push(format!("{fi}.{last}@{domain}"));
    }
    if !last.is_empty() {
        candidates.push(format!("{first}.{last}@{domain}"));
    }
    if !li.is_empty() {
        candidates.push(format!("{first}.{li}@{domain}"));
    }
    if !last.is_empty() {
        candidates.push(format!("{first}{last}@{domain}"));
        candidates.push(format!("{last}{first}@{domain}"));
    }
    if !fi.is_empty() && !li.is_empty() {
        candidates.push(format!("{fi}{li}@{domain}"));
    }

    let mut seen = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.clone()));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_extra_whitespace_do_not_change_the_result() {
        let a = generate_patterns("John Doe", "x.com");
        let b = generate_patterns("  John   Doe!!", "x.com");
        assert_eq!(a, b);
    }

    #[test]
    fn full_canonical_order_for_a_two_token_name() {
        let patterns = generate_patterns("Jane Doe", "acme.com");
        assert_eq!(
            patterns,
            vec![
                "jane@acme.com",
                "doe@acme.com",
                "j.doe@acme.com",
                "jane.doe@acme.com",
                "jane.d@acme.com",
                "janedoe@acme.com",
                "doejane@acme.com",
                "jd@acme.com",
            ]
        );
    }

    #[test]
    fn single_token_name_omits_last_name_patterns() {
        let patterns = generate_patterns("Madonna", "x.com");
        assert_eq!(patterns, vec!["madonna@x.com"]);
    }

    #[test]
    fn empty_name_produces_no_patterns() {
        assert!(generate_patterns("", "x.com").is_empty());
        assert!(generate_patterns("!!!", "x.com").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_stripped_like_other_punctuation() {
        let patterns = generate_patterns("José Ñoño", "x.com");
        assert!(patterns.iter().all(|p| p.is_ascii()));
    }

    #[test]
    fn clean_domain_normalizes_and_rejects_without_dot() {
        assert_eq!(clean_domain("@X.COM "), Some("x.com".to_string()));
        assert_eq!(clean_domain("x.com"), Some("x.com".to_string()));
        assert_eq!(clean_domain("nodot"), None);
    }
}
