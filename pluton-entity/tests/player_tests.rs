use pluton_engine::{DataStore, MemoryStore, PermissionList, UserList, categories};
use pluton_entity::{DEFAULT_MESSAGE_NAME, Player, PlayerStats};
use pluton_sim::{PlayerCall, SimPlayer, SimWorld};
use pluton_types::{DamageType, Initiator, PlayerId, UserGroup, Vec3};
use pretty_assertions::assert_eq;
use serde_json::json;

const ALICE: u64 = 76561198000000001;
const BOB: u64 = 76561198000000002;

fn world() -> SimWorld {
    let mut world = SimWorld::new().with_ground(12.5);
    world.add_player(SimPlayer::new(ALICE, "Alice").with_ip("10.0.0.1"));
    world.add_player(SimPlayer::new(BOB, "bob").with_ip("10.0.0.2"));
    world
}

// ── Views ────────────────────────────────────────────────────────

#[test]
fn getters_read_live_state() {
    let native = SimPlayer::new(ALICE, "Alice").with_health(80.0);
    let player = Player::new(&native);
    assert_eq!(player.health(), 80.0);

    native.set_name("Alicia");
    native.walk_to(Vec3::new(1.0, 2.0, 3.0));

    assert_eq!(player.name(), "Alicia");
    assert_eq!(player.location(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!((player.x(), player.y(), player.z()), (1.0, 2.0, 3.0));
}

#[test]
fn setters_write_through() {
    let native = SimPlayer::new(ALICE, "Alice");
    let player = Player::new(&native);

    player.set_health(42.0);
    player.set_y(9.0);

    assert_eq!(native.journal(), vec![
        PlayerCall::SetHealth(42.0),
        PlayerCall::SetPosition(Vec3::new(0.0, 9.0, 0.0)),
    ]);
    assert_eq!(Player::new(&native).health(), 42.0);
}

#[test]
fn wrappers_over_same_entity_are_equal() {
    let native = SimPlayer::new(ALICE, "Alice");
    let first = Player::new(&native);
    native.set_name("renamed");
    let second = Player::new(&native);

    assert_eq!(first, second);
    assert_eq!(first.id(), PlayerId::new(ALICE));
    assert_eq!(first.steam_id(), ALICE.to_string());
}

#[test]
fn wrappers_over_different_entities_differ() {
    let a = SimPlayer::new(ALICE, "Alice");
    let b = SimPlayer::new(BOB, "Alice");
    assert_ne!(Player::new(&a), Player::new(&b));
}

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn find_by_name_id_and_address() {
    let world = world();

    assert_eq!(Player::find(&world, "Alice").unwrap().id(), PlayerId::new(ALICE));
    assert_eq!(Player::find(&world, &BOB.to_string()).unwrap().name(), "bob");
    assert_eq!(Player::find(&world, "10.0.0.2").unwrap().id(), PlayerId::new(BOB));
}

#[test]
fn find_falls_back_to_case_insensitive_name() {
    let world = world();
    assert_eq!(Player::find(&world, "BOB").unwrap().id(), PlayerId::new(BOB));
}

#[test]
fn find_miss_is_none() {
    let world = world();
    assert!(Player::find(&world, "carol").is_none());
    assert!(Player::find_by_game_id(&world, PlayerId::new(3)).is_none());
}

#[test]
fn find_by_steam_id_rejects_garbage() {
    let world = world();
    assert!(Player::find_by_steam_id(&world, "not-a-number").is_none());
    assert!(Player::find_by_steam_id(&world, &ALICE.to_string()).is_some());
}

#[test]
fn offline_players_are_not_found() {
    let world = world();
    world.player(PlayerId::new(BOB)).unwrap().set_online(false);
    assert!(Player::find_by_game_id(&world, PlayerId::new(BOB)).is_none());
}

// ── Moderation ──────────────────────────────────────────────────

#[test]
fn ban_sets_group_saves_and_kicks() {
    let native = SimPlayer::new(ALICE, "Alice");
    let mut users = UserList::in_memory();

    Player::new(&native).ban(&mut users, "aimbot");

    assert!(users.is(PlayerId::new(ALICE), UserGroup::Banned));
    assert_eq!(users.get(PlayerId::new(ALICE)).unwrap().reason, "aimbot");
    assert_eq!(users.save_count(), 1);
    assert_eq!(native.journal(), vec![PlayerCall::Kick("Banned!".into())]);
}

#[test]
fn group_changes_set_auth_level() {
    let native = SimPlayer::new(ALICE, "Alice");
    let player = Player::new(&native);
    let mut users = UserList::in_memory();

    player.make_moderator(&mut users, "helper");
    assert!(player.is_moderator(&users));
    player.make_owner(&mut users, "promoted");
    assert!(player.is_owner(&users));
    assert!(!player.is_moderator(&users));
    player.make_none(&mut users, "demoted");

    assert_eq!(native.journal(), vec![
        PlayerCall::SetAuthLevel(1),
        PlayerCall::SetAuthLevel(2),
        PlayerCall::SetAuthLevel(0),
    ]);
    assert_eq!(users.save_count(), 3);
}

#[test]
fn kill_is_a_suicide_by_self() {
    let native = SimPlayer::new(ALICE, "Alice");
    Player::new(&native).kill();

    let info = native.take_pending_death().unwrap();
    assert_eq!(info.damage_type, DamageType::Suicide);
    assert_eq!(info.initiator, Some(Initiator::Player(PlayerId::new(ALICE))));
}

// ── Messaging ───────────────────────────────────────────────────

#[test]
fn message_uses_default_sender() {
    let native = SimPlayer::new(ALICE, "Alice");
    Player::new(&native).message("welcome");

    assert_eq!(native.console_commands(), vec![format!(
        "chat.add \"{}\" \"welcome\"",
        DEFAULT_MESSAGE_NAME
    )]);
}

#[test]
fn message_from_quotes_both_parts() {
    let native = SimPlayer::new(ALICE, "Alice");
    Player::new(&native).message_from("Admin \"Joe\"", "hi");

    assert_eq!(native.console_commands(), vec![
        r#"chat.add "Admin \"Joe\"" "hi""#.to_string()
    ]);
}

#[test]
fn console_message_is_echoed() {
    let native = SimPlayer::new(ALICE, "Alice");
    Player::new(&native).console_message("pong");
    assert_eq!(native.console_commands(), vec!["\"echo pong\"".to_string()]);
}

#[test]
fn look_point_defaults_to_origin() {
    let blind = SimPlayer::new(ALICE, "Alice");
    assert_eq!(Player::new(&blind).look_point(500.0), Vec3::ZERO);

    let seeing = SimPlayer::new(BOB, "bob").with_look_point(Vec3::new(5.0, 0.0, 5.0));
    assert_eq!(Player::new(&seeing).look_point(500.0), Vec3::new(5.0, 0.0, 5.0));
}

// ── Stats ───────────────────────────────────────────────────────

#[test]
fn with_stats_creates_missing_record() {
    let native = SimPlayer::new(ALICE, "Alice");
    let mut store = MemoryStore::new();

    let player = Player::with_stats(&native, &mut store);

    assert_eq!(player.stats(&store).unwrap(), Some(PlayerStats::default()));
}

#[test]
fn with_stats_keeps_existing_record() {
    let native = SimPlayer::new(ALICE, "Alice");
    let mut store = MemoryStore::new();
    let stats = PlayerStats {
        kills: 3,
        ..PlayerStats::default()
    };
    Player::new(&native).set_stats(&mut store, &stats).unwrap();

    let player = Player::with_stats(&native, &mut store);

    assert_eq!(player.stats(&store).unwrap(), Some(stats));
}

#[test]
fn malformed_stats_leave_wrapper_usable() {
    let native = SimPlayer::new(ALICE, "Alice");
    let mut store = MemoryStore::new();
    store
        .set(categories::PLAYER_STATS, &ALICE.to_string(), json!("garbage"))
        .unwrap();

    let player = Player::with_stats(&native, &mut store);

    assert_eq!(player.name(), "Alice");
    player.message("still works");
    assert_eq!(native.console_commands().len(), 1);
    assert!(player.stats(&store).is_err());
}

#[test]
fn ground_teleport_uses_terrain_height() {
    let world = world();
    let player = Player::find(&world, "Alice").unwrap();

    player.ground_teleport(&world, 10.0, 20.0);

    assert_eq!(player.location(), Vec3::new(10.0, 12.5, 20.0));
}
