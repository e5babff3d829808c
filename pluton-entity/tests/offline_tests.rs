use pluton_entity::{Npc, OfflinePlayer, Player, Resource};
use pluton_sim::{AnimalCall, SimAnimal, SimPlayer, SimResource};
use pluton_types::{NetId, PlayerId, Vec3};
use pretty_assertions::assert_eq;

#[test]
fn record_captures_live_state() {
    let native = SimPlayer::new(9, "Alice")
        .at(Vec3::new(4.0, 1.0, -2.0))
        .with_ip("192.168.0.9")
        .admin();
    native.set_connection_time(120.0);

    let record = OfflinePlayer::from_player(&Player::new(&native));

    assert_eq!(record.id, PlayerId::new(9));
    assert_eq!(record.name, "Alice");
    assert_eq!(record.ip, "192.168.0.9");
    assert_eq!(record.location, Vec3::new(4.0, 1.0, -2.0));
    assert!(record.admin);
    assert_eq!(record.total_time_online, 120.0);
}

#[test]
fn update_refreshes_fields_and_accumulates_time() {
    let native = SimPlayer::new(9, "Alice");
    native.set_connection_time(60.0);
    let mut record = OfflinePlayer::from_player(&Player::new(&native));

    native.set_name("Alicia");
    native.walk_to(Vec3::new(7.0, 0.0, 7.0));
    native.set_connection_time(30.0);
    record.update(&Player::new(&native));

    assert_eq!(record.name, "Alicia");
    assert_eq!(record.location, Vec3::new(7.0, 0.0, 7.0));
    assert_eq!(record.total_time_online, 90.0);
}

#[test]
fn record_value_roundtrip() {
    let native = SimPlayer::new(9, "Alice");
    let record = OfflinePlayer::from_player(&Player::new(&native));

    let value = record.to_value().unwrap();
    assert_eq!(OfflinePlayer::from_value(value).unwrap(), record);
}

#[test]
fn malformed_value_is_an_error() {
    assert!(OfflinePlayer::from_value(serde_json::json!({"id": "x"})).is_err());
}

// ── Npc / Resource views ─────────────────────────────────────────

#[test]
fn npc_view_passes_through() {
    let animal = SimAnimal::new(3, "wolf", 80.0).at(Vec3::new(1.0, 0.0, 1.0));
    let npc = Npc::new(&animal);

    npc.set_health(20.0);

    assert_eq!(npc.id(), NetId::new(3));
    assert_eq!(npc.name(), "wolf");
    assert_eq!(npc.health(), 20.0);
    assert_eq!(npc.location(), Vec3::new(1.0, 0.0, 1.0));
    assert_eq!(npc, Npc::new(&animal));
}

#[test]
fn npc_kill_runs_engine_death() {
    let animal = SimAnimal::new(3, "bear", 300.0);
    Npc::new(&animal).kill();

    assert_eq!(animal.death_count(), 1);
    assert!(matches!(animal.journal().last(), Some(AnimalCall::Die(_))));
}

#[test]
fn resource_view_reads_live_health() {
    let node = SimResource::new(11, "tree", 50.0);
    let view = Resource::new(&node);
    assert_eq!(view.health(), 50.0);

    pluton_engine::NativeResource::set_health(&node, 10.0);

    assert_eq!(view.health(), 10.0);
    assert_eq!(view.name(), "tree");
}

#[test]
fn refresh_leaves_time_online_alone() {
    let native = SimPlayer::new(9, "Alice");
    native.set_connection_time(60.0);
    let mut record = OfflinePlayer::from_player(&Player::new(&native));

    native.set_name("Alicia");
    record.refresh(&Player::new(&native));

    assert_eq!(record.name, "Alicia");
    assert_eq!(record.total_time_online, 60.0);
}
