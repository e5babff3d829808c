use pluton_hooks::{DEFAULT_CHAT_MAX_LENGTH, HookConfig, HookError};
use pluton_types::Realm;
use pretty_assertions::assert_eq;

fn load_config_from_str(contents: &str) -> HookConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pluton.toml");
    std::fs::write(&path, contents).unwrap();
    HookConfig::load_from(&path)
}

#[test]
fn defaults_are_server_with_chat_on() {
    let config = HookConfig::default();
    assert_eq!(config.realm(), Realm::Server);
    assert!(config.chat.enabled);
    assert!(config.chat.server_log);
    assert_eq!(config.chat.max_length, DEFAULT_CHAT_MAX_LENGTH);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = HookConfig::load_from(&dir.path().join("nonexistent.toml"));
    assert_eq!(config, HookConfig::default());
}

#[test]
fn full_file_is_read() {
    let config = load_config_from_str(
        r#"
[server]
realm = "client"

[chat]
enabled = false
server_log = false
max_length = 64
"#,
    );

    assert_eq!(config.realm(), Realm::Client);
    assert!(!config.chat.enabled);
    assert!(!config.chat.server_log);
    assert_eq!(config.chat.max_length, 64);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = load_config_from_str(
        r#"
[chat]
max_length = 32
"#,
    );

    assert_eq!(config.realm(), Realm::Server);
    assert!(config.chat.enabled);
    assert_eq!(config.chat.max_length, 32);
}

#[test]
fn invalid_file_falls_back_to_defaults() {
    let config = load_config_from_str("[server]\nrealm = \"moon\"\n");
    assert_eq!(config, HookConfig::default());
}

#[test]
fn strict_parse_reports_errors() {
    let err = HookConfig::from_toml_str("[chat]\nmax_length = \"long\"\n").unwrap_err();
    assert!(matches!(err, HookError::ConfigParse(_)));
}

#[test]
fn strict_read_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = HookConfig::read(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, HookError::ConfigRead(_)));
}
