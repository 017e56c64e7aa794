//! Identifier and timestamp helpers shared by all entity factories.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Returns a fresh top-level record id (hyphenated UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns a fresh sub-item id such as `item_3f2a...`.
///
/// Sub-items (checklist items, beats, locations) only need uniqueness
/// inside their parent record, the prefix keeps them readable in dumps.
pub fn generate_prefixed_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clocks set before 1970 collapse to `0` instead of failing.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{generate_id, generate_prefixed_id, now_epoch_ms};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn generated_ids_are_unique_uuids() {
        let ids: HashSet<String> = (0..256).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 256);
        for id in &ids {
            assert!(Uuid::parse_str(id).is_ok());
        }
    }

    #[test]
    fn prefixed_ids_keep_prefix() {
        let id = generate_prefixed_id("beat");
        assert!(id.starts_with("beat_"));
        assert_eq!(id.len(), "beat_".len() + 32);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
