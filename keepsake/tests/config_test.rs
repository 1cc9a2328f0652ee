use keepsake::AppConfig;
use std::fs;
use tempfile::TempDir;

/// Test: Load a full config file from disk
#[test]
fn test_load_explicit_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(
        &path,
        "cache:\n  capacity: 8\nlayout:\n  target_row_height: 180\nranking:\n  limit: 3\n",
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(config.cache.capacity, 8);
    assert_eq!(config.layout.target_row_height, 180.0);
    assert_eq!(config.ranking.limit, Some(3));
    assert_eq!(config.planner().unwrap().target_row_height(), 180.0);
}

/// Test: An explicit path that does not exist is an error, not a fallback
#[test]
fn test_missing_explicit_file() {
    let tmp = TempDir::new().unwrap();
    let err = AppConfig::load(Some(&tmp.path().join("nope.yaml"))).unwrap_err();
    assert!(err.to_string().contains("nope.yaml"));
}

/// Test: Malformed and out-of-range files are rejected
#[test]
fn test_invalid_files() {
    let tmp = TempDir::new().unwrap();

    let bad_yaml = tmp.path().join("bad.yaml");
    fs::write(&bad_yaml, "cache: [unclosed").unwrap();
    assert!(AppConfig::from_file(&bad_yaml).is_err());

    let zero = tmp.path().join("zero.yaml");
    fs::write(&zero, "cache:\n  capacity: 0\n").unwrap();
    assert!(AppConfig::from_file(&zero).is_err());
}

/// Test: Command line flags win over file values
#[test]
fn test_flags_override_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "cache:\n  capacity: 8\nranking:\n  limit: 3\n").unwrap();

    let config = AppConfig::from_file(&path)
        .unwrap()
        .with_overrides(Some(2), Some(300.0), None);

    assert_eq!(config.cache.capacity, 2);
    assert_eq!(config.layout.target_row_height, 300.0);
    assert_eq!(config.ranking.limit, Some(3));
}

/// Test: Input files round through normalization
#[test]
fn test_load_input_files() {
    let tmp = TempDir::new().unwrap();

    let events = tmp.path().join("events.json");
    fs::write(
        &events,
        r#"[{"id": "e1", "title": "Shower", "recipientName": "Ana", "occasion": "Baby Shower",
             "likes": 4, "createdAt": 1710000000000}]"#,
    )
    .unwrap();
    let loaded = keepsake::input::load_events(&events).unwrap();
    assert_eq!(loaded[0].likes, 4);

    let photos = tmp.path().join("photos.json");
    fs::write(&photos, r#"[{"url": "a.jpg", "aspectRatio": 0}, {"url": "b.jpg", "aspectRatio": 1.5}]"#).unwrap();
    let loaded = keepsake::input::load_photos(&photos).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!((loaded[0].aspect_ratio - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(loaded[1].aspect_ratio, 1.5);
}
