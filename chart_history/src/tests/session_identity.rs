// @file: chart_history/src/tests/session_identity.rs
// @description: Session token format and uniqueness.
// @author: LAS.

#[cfg(test)]
mod session_identity_tests {
    use crate::core::session::{SessionId, SessionPair};
    use std::collections::HashSet;

    #[test]
    fn test_token_format() {
        let id = SessionId::generate("qs");
        let (prefix, suffix) = id.as_str().split_once('_').unwrap();

        assert_eq!(prefix, "qs");
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_no_collisions_in_10k_generations() {
        let ids: HashSet<SessionId> = (0..10_000).map(|_| SessionId::generate("cs")).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_pair_uses_channel_prefixes() {
        let pair = SessionPair::new();

        assert!(pair.quote.as_str().starts_with("qs_"));
        assert!(pair.chart.as_str().starts_with("cs_"));
        assert_ne!(pair, SessionPair::new());
    }
}
