use harvester::{HarvestConfig, HarvestError, PlanningMode, Point, SelectionStrategy};

#[test]
fn defaults_are_valid_and_match_the_field() {
    let config = HarvestConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.planner.cluster_radius, 1.5);
    assert_eq!(config.planner.distance_bias, 0.5);
    assert_eq!(config.planner.interpolation_density, 20);
    assert_eq!(config.planner.capture_half_width, config.field.capture_half_width());
}

#[test]
fn shipped_config_parses() {
    let config = HarvestConfig::from_yaml_str(include_str!("../config/harvest.yaml")).unwrap();
    assert_eq!(config.planner.selection, SelectionStrategy::BestScore);
    assert_eq!(config.planner.max_two_opt_sweeps, None);
    assert_eq!(config.session.mode, PlanningMode::LocalCluster);
    assert_eq!(config.session.start_position, Some(Point::new(1.0, 4.05)));
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let yaml = "planner:\n  cluster_radius: 2.0\n  selection: nearest\nsession:\n  mode: full_sweep\n";
    let config = HarvestConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.planner.cluster_radius, 2.0);
    assert_eq!(config.planner.selection, SelectionStrategy::Nearest);
    assert_eq!(config.planner.distance_bias, 0.5);
    assert_eq!(config.session.mode, PlanningMode::FullSweep);
    assert_eq!(config.field, HarvestConfig::default().field);
}

#[test]
fn invalid_values_are_rejected_at_load() {
    let err = HarvestConfig::from_yaml_str("planner:\n  distance_bias: 0.0\n").unwrap_err();
    assert!(matches!(err, HarvestError::InvalidParameter(_)));

    let err = HarvestConfig::from_yaml_str("planner:\n  interpolation_density: 0\n").unwrap_err();
    assert!(matches!(err, HarvestError::InvalidParameter(_)));
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = HarvestConfig::from_yaml_str("planner: [not, a, map]").unwrap_err();
    assert!(matches!(err, HarvestError::ConfigError(_)));
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = HarvestConfig::from_yaml_file("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, HarvestError::ConfigError(_)));
}

#[test]
fn pruning_width_must_match_the_intake() {
    let err = HarvestConfig::from_yaml_str("planner:\n  capture_half_width: 1.0\n").unwrap_err();
    assert!(matches!(err, HarvestError::InvalidParameter(_)));

    let yaml = "planner:\n  capture_half_width: 0.6\nfield:\n  intake_width: 1.2\n";
    let config = HarvestConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.planner.capture_half_width, config.field.capture_half_width());
}

#[test]
fn nan_collection_margin_is_rejected() {
    let err = HarvestConfig::from_yaml_str("session:\n  collection_margin: .nan\n").unwrap_err();
    assert!(matches!(err, HarvestError::InvalidParameter(_)));
}
