use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 8;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a cuid-style record identifier: a `c` prefix, the current time
/// in epoch milliseconds, and an 8-character lowercase alphanumeric suffix.
///
/// Practically unique within one import run (the timestamp narrows collisions
/// to a single millisecond, the suffix covers the rest). Not globally unique
/// and not cryptographically secure; identifiers are regenerated on every
/// re-import.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let millis = Utc::now().timestamp_millis();

    let mut id = String::with_capacity(1 + 13 + SUFFIX_LEN);
    id.push('c');
    id.push_str(&millis.to_string());
    for _ in 0..SUFFIX_LEN {
        let idx = rng.random_range(0..SUFFIX_ALPHABET.len());
        id.push(SUFFIX_ALPHABET[idx] as char);
    }
    id
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_id_has_prefix_and_suffix_shape() {
        let id = generate_id();
        assert!(id.starts_with('c'));
        assert_eq!(id.len(), 1 + 13 + SUFFIX_LEN);

        let suffix = &id[id.len() - SUFFIX_LEN..];
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        );
    }

    #[test]
    fn timestamp_component_parses_as_millis() {
        let id = generate_id();
        let millis: i64 = id[1..id.len() - SUFFIX_LEN].parse().unwrap();
        assert!(millis > 1_600_000_000_000);
    }

    #[test]
    fn ten_thousand_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_id()));
        }
    }
}
