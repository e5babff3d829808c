use pluton_hooks::HookConfig;
use pluton_host::{ReplayError, Scenario, replay};
use pluton_types::Realm;
use pretty_assertions::assert_eq;
use std::path::Path;

fn scenario(json: &str) -> Scenario {
    Scenario::from_json(json).unwrap()
}

const SKIRMISH: &str = r#"{
  "players": [
    { "id": 1, "name": "Alice", "items": ["rock"] },
    { "id": 2, "name": "Bob", "health": 40.0 }
  ],
  "animals": [{ "id": 100, "name": "wolf", "health": 60.0 }],
  "resources": [{ "id": 200, "name": "tree", "health": 30.0 }],
  "steps": [
    { "hook": "player_connected", "player": 1 },
    { "hook": "chat", "player": 1, "text": "hi" },
    { "hook": "gathering", "resource": 200, "hit": { "damage_amount": 12.0, "damage_type": "slash" } },
    { "hook": "npc_hurt", "animal": 100, "hit": { "damage_amount": 25.0, "damage_type": "bullet" } },
    { "hook": "npc_hurt", "animal": 100, "hit": { "damage_amount": 40.0, "damage_type": "bullet" } },
    { "hook": "player_hurt", "player": 2, "hit": { "damage_amount": 15.0, "damage_type": "stab" } },
    { "hook": "player_hurt", "player": 2, "hit": { "damage_amount": 30.0, "damage_type": "stab" } },
    { "hook": "player_disconnected", "player": 1 }
  ]
}"#;

// ── Replay ───────────────────────────────────────────────────────

#[test]
fn replay_reports_every_event_in_order() {
    let report = replay(HookConfig::default(), &scenario(SKIRMISH)).unwrap();

    assert_eq!(
        report.events,
        vec![
            "connected Alice (1)",
            "chat Alice: hi",
            "gather tree -12",
            "npc_hurt wolf -25",
            "npc_died wolf",
            "player_hurt Bob -15",
            "player_hurt Bob -30",
            "player_died Bob Stab",
            "disconnected Alice (1) online=0s",
        ]
    );
    assert_eq!(report.steps, 8);
    assert_eq!(report.hooks, 10);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.delivered, 9);
    assert_eq!(report.faulted, 0);
    assert_eq!(report.offline, 1);
}

#[test]
fn client_realm_replay_publishes_nothing() {
    let report = replay(HookConfig::for_realm(Realm::Client), &scenario(SKIRMISH)).unwrap();

    assert!(report.events.is_empty());
    assert_eq!(report.hooks, 8);
    assert_eq!(report.skipped, 8);
    assert_eq!(report.offline, 0);
}

#[test]
fn kill_step_reports_suicide() {
    let report = replay(
        HookConfig::default(),
        &scenario(
            r#"{
              "players": [{ "id": 1, "name": "Alice" }],
              "steps": [{ "hook": "kill", "player": 1 }]
            }"#,
        ),
    )
    .unwrap();

    assert_eq!(report.events, vec!["player_died Alice Suicide"]);
}

#[test]
fn long_teleport_goes_through_an_anchor() {
    let report = replay(
        HookConfig::default(),
        &scenario(
            r#"{
              "players": [{ "id": 1, "name": "Alice" }],
              "steps": [
                { "hook": "teleport", "player": 1, "to": { "x": 1500.0, "y": 4.0, "z": 1500.0 } }
              ]
            }"#,
        ),
    )
    .unwrap();

    assert_eq!(report.events.len(), 1);
    assert!(report.events[0].starts_with("teleport Alice via Some"));
    assert!(report.events[0].contains("-2000.0"));
}

#[test]
fn unknown_player_is_an_error() {
    let err = replay(
        HookConfig::default(),
        &scenario(r#"{ "steps": [{ "hook": "player_connected", "player": 9 }] }"#),
    )
    .unwrap_err();

    assert!(matches!(err, ReplayError::UnknownPlayer { step: 0, id: 9 }));
}

// ── Scenario files ───────────────────────────────────────────────

#[test]
fn bundled_scenario_replays() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/skirmish.json");
    let scenario = Scenario::read(&path).unwrap();

    let report = replay(HookConfig::default(), &scenario).unwrap();

    assert_eq!(report.steps, scenario.steps.len());
    assert_eq!(report.faulted, 0);
    assert_eq!(report.offline, 1);
}

#[test]
fn malformed_scenario_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "steps": [{ "hook": "fly" }] }"#).unwrap();

    assert!(matches!(
        Scenario::read(&path),
        Err(ReplayError::Scenario(_))
    ));
}
