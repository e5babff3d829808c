use pluton_engine::{DataStore, MemoryStore, categories};
use pluton_entity::{OfflinePlayer, Player};
use pluton_hooks::{HookConfig, HookDispatcher, PresenceRegistry};
use pluton_sim::SimPlayer;
use pluton_types::{PlayerId, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

const ALICE: u64 = 76561198000000001;

fn server() -> HookDispatcher {
    HookDispatcher::new(HookConfig::default(), Box::new(MemoryStore::new()))
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn disconnect_inserts_fresh_record() {
    let mut registry = PresenceRegistry::new();
    let store = MemoryStore::new();
    let native = SimPlayer::new(ALICE, "Alice").at(Vec3::new(5.0, 0.0, 5.0));
    native.set_connection_time(40.0);

    let record = registry.on_disconnect(&Player::new(&native), &store).clone();

    assert_eq!(record.name, "Alice");
    assert_eq!(record.location, Vec3::new(5.0, 0.0, 5.0));
    assert_eq!(record.total_time_online, 40.0);
    assert!(registry.contains(PlayerId::new(ALICE)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn connect_removes_and_returns_record() {
    let mut registry = PresenceRegistry::new();
    let store = MemoryStore::new();
    let native = SimPlayer::new(ALICE, "Alice");
    registry.on_disconnect(&Player::new(&native), &store);

    let previous = registry.on_connect(PlayerId::new(ALICE));

    assert_eq!(previous.map(|r| r.name), Some("Alice".to_string()));
    assert!(registry.is_empty());
    assert!(registry.on_connect(PlayerId::new(ALICE)).is_none());
}

#[test]
fn persisted_snapshot_keeps_accumulating() {
    let mut registry = PresenceRegistry::new();
    let mut store = MemoryStore::new();
    let native = SimPlayer::new(ALICE, "Alice");
    native.set_connection_time(100.0);
    registry.on_disconnect(&Player::new(&native), &store);
    assert_eq!(registry.persist(&mut store).unwrap(), 1);

    let mut restarted = PresenceRegistry::new();
    native.set_name("Alicia");
    native.set_connection_time(50.0);
    let record = restarted.on_disconnect(&Player::new(&native), &store);

    assert_eq!(record.name, "Alicia");
    assert_eq!(record.total_time_online, 150.0);
}

#[test]
fn malformed_snapshot_is_replaced() {
    let mut registry = PresenceRegistry::new();
    let mut store = MemoryStore::new();
    store
        .set(categories::OFFLINE_PLAYERS, &ALICE.to_string(), json!("garbage"))
        .unwrap();
    let native = SimPlayer::new(ALICE, "Alice");
    native.set_connection_time(10.0);

    let record = registry.on_disconnect(&Player::new(&native), &store);

    assert_eq!(record.total_time_online, 10.0);
}

#[test]
fn persist_writes_every_record() {
    let mut registry = PresenceRegistry::new();
    let mut store = MemoryStore::new();
    let a = SimPlayer::new(1, "Alice");
    let b = SimPlayer::new(2, "Bob");
    registry.on_disconnect(&Player::new(&a), &store);
    registry.on_disconnect(&Player::new(&b), &store);

    registry.persist(&mut store).unwrap();

    assert_eq!(store.keys(categories::OFFLINE_PLAYERS), vec!["1", "2"]);
    let value = store.get(categories::OFFLINE_PLAYERS, "2").unwrap().unwrap();
    assert_eq!(OfflinePlayer::from_value(value).unwrap().name, "Bob");
}

// ── Through the dispatcher ───────────────────────────────────────

#[test]
fn connect_disconnect_connect_tracks_presence() {
    let mut hooks = server();
    let native = SimPlayer::new(ALICE, "Alice");
    let id = PlayerId::new(ALICE);

    hooks.player_connected(&native);
    assert!(!hooks.presence().contains(id));

    hooks.player_disconnected(&native);
    assert!(hooks.presence().contains(id));

    hooks.player_connected(&native);
    assert!(!hooks.presence().contains(id));

    native.walk_to(Vec3::new(300.0, 0.0, -40.0));
    native.set_name("Alicia");
    hooks.player_disconnected(&native);

    let record = hooks.presence().get(id).unwrap();
    assert_eq!(record.name, "Alicia");
    assert_eq!(record.location, Vec3::new(300.0, 0.0, -40.0));
}

fn total_online(hooks: &HookDispatcher) -> f32 {
    hooks
        .presence()
        .get(PlayerId::new(ALICE))
        .unwrap()
        .total_time_online
}

#[test]
fn time_online_accumulates_across_sessions() {
    let mut hooks = server();
    let native = SimPlayer::new(ALICE, "Alice");

    native.set_connection_time(5.0);
    hooks.player_disconnected(&native);
    hooks.persist_presence().unwrap();
    assert_eq!(total_online(&hooks), 5.0);

    hooks.player_connected(&native);
    native.set_connection_time(7.0);
    hooks.player_disconnected(&native);
    assert_eq!(total_online(&hooks), 12.0);

    hooks.player_connected(&native);
    native.set_connection_time(3.0);
    hooks.player_disconnected(&native);
    assert_eq!(total_online(&hooks), 15.0);
}

#[test]
fn reconnect_saves_the_pending_record() {
    let mut hooks = server();
    let native = SimPlayer::new(ALICE, "Alice");
    native.set_connection_time(5.0);
    hooks.player_disconnected(&native);

    hooks.player_connected(&native);

    let value = hooks
        .store()
        .get(categories::OFFLINE_PLAYERS, &ALICE.to_string())
        .unwrap()
        .unwrap();
    assert_eq!(OfflinePlayer::from_value(value).unwrap().total_time_online, 5.0);
}

#[test]
fn repeated_disconnect_counts_the_session_once() {
    let mut hooks = server();
    let native = SimPlayer::new(ALICE, "Alice");
    native.set_connection_time(5.0);

    hooks.player_disconnected(&native);
    native.set_name("Alicia");
    hooks.player_disconnected(&native);

    assert_eq!(total_online(&hooks), 5.0);
    assert_eq!(
        hooks.presence().get(PlayerId::new(ALICE)).unwrap().name,
        "Alicia"
    );
}

#[test]
fn registry_updates_before_subscribers_run() {
    let mut hooks = server();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    hooks.bus_mut().on_player_disconnected(move |e| {
        log.borrow_mut().push((e.player.id(), e.record.name.clone()));
        Ok(())
    });
    let log = Rc::clone(&seen);
    hooks.bus_mut().on_player_connected(move |e| {
        let previous = e.previous.as_ref().map(|r| r.name.clone()).unwrap_or_default();
        log.borrow_mut().push((e.player.id(), previous));
        Ok(())
    });

    let native = SimPlayer::new(ALICE, "Alice");
    hooks.player_disconnected(&native);
    hooks.player_connected(&native);

    let id = PlayerId::new(ALICE);
    assert_eq!(
        *seen.borrow(),
        vec![(id, "Alice".to_string()), (id, "Alice".to_string())]
    );
}

#[test]
fn dispatcher_persists_presence() {
    let mut hooks = server();
    hooks.player_disconnected(&SimPlayer::new(ALICE, "Alice"));

    assert_eq!(hooks.persist_presence().unwrap(), 1);
    assert!(
        hooks
            .store()
            .contains(categories::OFFLINE_PLAYERS, &ALICE.to_string())
            .unwrap()
    );
}

proptest! {
    #[test]
    fn membership_matches_disconnected_state(events in prop::collection::vec((0u64..4, any::<bool>()), 0..40)) {
        let mut hooks = server();
        let players: Vec<SimPlayer> = (0..4).map(|i| SimPlayer::new(i, "p")).collect();
        let mut disconnected = [false; 4];

        for (who, connect) in events {
            let native = &players[who as usize];
            if connect {
                hooks.player_connected(native);
                disconnected[who as usize] = false;
            } else {
                hooks.player_disconnected(native);
                disconnected[who as usize] = true;
            }
        }

        for (i, expected) in disconnected.iter().enumerate() {
            prop_assert_eq!(hooks.presence().contains(PlayerId::new(i as u64)), *expected);
        }
        prop_assert_eq!(hooks.presence().len(), disconnected.iter().filter(|d| **d).count());
    }
}
