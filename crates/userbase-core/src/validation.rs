//! Email address validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest accepted address, e.g. `a@b`.
pub const MIN_ADDRESS_LEN: usize = 3;

/// Longest accepted address.
pub const MAX_ADDRESS_LEN: usize = 256;

// Local part of 1-64 atext/dot characters, then dot-separated DNS labels of
// 1-63 alphanumerics or hyphens that neither start nor end with a hyphen.
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]{1,64}@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("address pattern is a valid regex")
});

/// Checks a candidate identifier against a conservative email grammar.
///
/// Pure and deterministic: no DNS lookups or store access.
#[must_use]
pub fn is_valid_address(candidate: &str) -> bool {
    let len = candidate.len();
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
        return false;
    }
    ADDRESS_PATTERN.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        assert!(is_valid_address("user@example.com"));
        assert!(is_valid_address("first.last@mail.example.co.uk"));
        assert!(is_valid_address("user+tag@example.com"));
        assert!(is_valid_address("a@b"));
        assert!(is_valid_address("o'brien@example-domain.org"));
        assert!(is_valid_address("{weird}|~^`@x9.io"));
    }

    #[test]
    fn test_rejects_out_of_range_lengths() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("a@"));
        assert!(!is_valid_address("ab"));

        let label = "a".repeat(60);
        let long = format!("user@{label}.{label}.{label}.{label}.{label}");
        assert!(long.len() > MAX_ADDRESS_LEN);
        assert!(!is_valid_address(&long));
    }

    #[test]
    fn test_length_boundaries() {
        let local = "l".repeat(64);
        let label = "d".repeat(63);
        let at_256 = format!("{local}@{label}.{label}.{}.{}", "d".repeat(61), "e");
        assert_eq!(at_256.len(), 256);
        assert!(is_valid_address(&at_256));

        let at_257 = format!("{at_256}e");
        assert_eq!(at_257.len(), 257);
        assert!(!is_valid_address(&at_257));
    }

    #[test]
    fn test_rejects_missing_or_empty_parts() {
        assert!(!is_valid_address("userexample.com"));
        assert!(!is_valid_address("@example.com"));
        assert!(!is_valid_address("user@"));
        assert!(!is_valid_address("user@@example.com"));
    }

    #[test]
    fn test_local_part_limits() {
        let ok = format!("{}@example.com", "a".repeat(64));
        assert!(is_valid_address(&ok));

        let too_long = format!("{}@example.com", "a".repeat(65));
        assert!(!is_valid_address(&too_long));

        assert!(!is_valid_address("us er@example.com"));
        assert!(!is_valid_address("us\"er@example.com"));
    }

    #[test]
    fn test_domain_label_rules() {
        assert!(!is_valid_address("user@-example.com"));
        assert!(!is_valid_address("user@example-.com"));
        assert!(!is_valid_address("user@example..com"));
        assert!(!is_valid_address("user@example.com."));
        assert!(!is_valid_address("user@exa_mple.com"));

        let label_63 = "a".repeat(63);
        assert!(is_valid_address(&format!("user@{label_63}.com")));

        let label_64 = "a".repeat(64);
        assert!(!is_valid_address(&format!("user@{label_64}.com")));
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(!is_valid_address("usér@example.com"));
        assert!(!is_valid_address("user@exämple.com"));
    }
}
