use std::path::PathBuf;
use std::time::Duration;

use archery::config::Config;
use archery::error::GameError;

#[test]
fn defaults() {
    let c = Config::default();
    assert_eq!(c.fps, 60);
    assert!(c.sound_effects);
    assert!(c.music);
    assert_eq!(c.tile_map, None);
    assert_eq!(c.seed, None);
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let c = Config::from_toml_str("fps = 30\nmusic = false\nseed = 9\ntile_map = \"field.map\"\n")
        .unwrap();
    assert_eq!(c.fps, 30);
    assert!(!c.music);
    assert!(c.sound_effects);
    assert_eq!(c.seed, Some(9));
    assert_eq!(c.tile_map, Some(PathBuf::from("field.map")));
}

#[test]
fn malformed_file_is_rejected() {
    assert!(Config::from_toml_str("fps = \"fast\"").is_err());
    assert!(Config::from_toml_str("fps = ").is_err());
}

#[test]
fn frame_duration_follows_fps() {
    let c = Config::default();
    let d = c.frame_duration();
    assert!(d > Duration::from_micros(16_600) && d < Duration::from_micros(16_700));

    let zero = Config { fps: 0, ..Config::default() };
    assert_eq!(zero.frame_duration(), Duration::from_secs(1));
}

#[test]
fn missing_file_loads_defaults() {
    let c = Config::load_from(std::path::Path::new("/definitely/not/here.toml")).unwrap();
    assert_eq!(c, Config::default());
}

#[test]
fn bad_file_reports_its_path() {
    let path = std::env::temp_dir().join(format!("archery-bad-{}.toml", std::process::id()));
    std::fs::write(&path, "music = maybe").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    match err {
        GameError::Config { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}
