use pluton_types::{NetId, PlayerId};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── PlayerId ──────────────────────────────────────────────────────

#[test]
fn player_id_display_is_decimal() {
    let id = PlayerId::new(76561198000000001);
    assert_eq!(id.to_string(), "76561198000000001");
}

#[test]
fn player_id_parse_trims_whitespace() {
    let id = PlayerId::parse(" 42 ").unwrap();
    assert_eq!(id.as_u64(), 42);
}

#[test]
fn player_id_from_str_invalid() {
    assert!(PlayerId::from_str("alice").is_err());
    assert!(PlayerId::from_str("").is_err());
    assert!(PlayerId::from_str("-1").is_err());
}

#[test]
fn player_id_serde_is_transparent() {
    let id = PlayerId::new(7);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "7");
}

#[test]
fn player_id_hash_eq() {
    let mut set = HashSet::new();
    set.insert(PlayerId::new(1));
    set.insert(PlayerId::from(1));
    assert_eq!(set.len(), 1);
}

// ── NetId ─────────────────────────────────────────────────────────

#[test]
fn net_id_display() {
    assert_eq!(NetId::new(12).to_string(), "#12");
}

proptest! {
    #[test]
    fn player_id_display_parse_agree(raw in any::<u64>()) {
        let id = PlayerId::new(raw);
        prop_assert_eq!(PlayerId::parse(&id.to_string()).unwrap(), id);
    }
}
