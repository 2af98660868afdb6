use ontoaxioms::util::{read_file, write_graph_to_file};
use ontoaxioms::{init_logging, ErrorPolicy, MappingConfig, Profile};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_read_file() {
    let graph = read_file(Path::new("fixtures/pizza.ttl")).unwrap();
    assert!(!graph.is_empty());
    assert!(read_file(Path::new("fixtures/missing.ttl")).is_err());
}

#[test]
fn test_write_graph_round_trip() {
    let graph = read_file(Path::new("fixtures/pizza.ttl")).unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("pizza.nt");
    write_graph_to_file(&graph, &out).unwrap();
    let back = read_file(&out).unwrap();
    assert_eq!(back.len(), graph.len());
    assert_ne!(back.scope(), graph.scope());
}

#[test]
fn test_config_save_and_load() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("mapping.json");
    let config = MappingConfig::builder()
        .profile(Profile::El)
        .load_annotation_axioms(false)
        .error_policy(ErrorPolicy::Skip)
        .build()
        .unwrap();
    config.save_to_file(&file).unwrap();
    let loaded = MappingConfig::from_file(&file).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("mapping.json");
    std::fs::write(&file, r#"{ "profile": "ql" }"#).unwrap();
    let loaded = MappingConfig::from_file(&file).unwrap();
    assert_eq!(loaded.profile, Profile::Ql);
    assert!(loaded.allow_read_declarations);
    assert_eq!(loaded.error_policy, ErrorPolicy::Fail);
}

#[test]
fn test_init_logging_twice() {
    init_logging();
    init_logging();
}
