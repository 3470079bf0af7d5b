//! Loading and saving game configuration files.

use minotaur::{GameConfig, GameVariant, MinotaurError, Session};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");

    let mut config = GameConfig::for_variant(GameVariant::Minotaur, 55);
    config.combat.enemy_health_override = Some(4);
    config.timers.auto_reset_delay_ms = 2_500;
    config.save(&path).unwrap();

    let loaded = GameConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(Session::new(loaded).is_ok());
}

#[test]
fn test_missing_sections_use_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");

    let mut value = serde_json::to_value(GameConfig::amazing_maze(3)).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("combat");
    object.remove("timers");
    fs::write(&path, value.to_string()).unwrap();

    let loaded = GameConfig::load(&path).unwrap();
    assert_eq!(loaded.timers.auto_reset_delay_ms, 10_000);
    assert_eq!(loaded.timers.defeat_fallback_delay_ms, 1_000);
    assert_eq!(loaded.combat.enemy_health_override, None);
}

#[test]
fn test_malformed_json_is_a_serde_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"maze\": ").unwrap();

    assert!(matches!(
        GameConfig::load(&path),
        Err(MinotaurError::Serde(_))
    ));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("invalid.json");

    let mut config = GameConfig::minotaur(1);
    config.encounters.base_probability = 1.5;
    config.save(&path).unwrap();

    assert!(matches!(
        GameConfig::load(&path),
        Err(MinotaurError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = GameConfig::load(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(MinotaurError::Io(_))));
}
