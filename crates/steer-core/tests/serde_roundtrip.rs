use steer_core::{ErrorInfo, SchemaVersion, SteerError, CARD_SCHEMA};

#[test]
fn error_round_trip_json() {
    let err = SteerError::MissingKey(
        ErrorInfo::new("missing-key", "parameter is required").with_context("key", "integrator"),
    );
    let json = serde_json::to_string_pretty(&err).expect("serialize");
    assert!(json.contains("\"family\": \"MissingKey\""));
    let decoded: SteerError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn schema_compatibility_follows_major() {
    assert_eq!(SchemaVersion::default(), CARD_SCHEMA);
    assert!(CARD_SCHEMA.is_compatible_with(&SchemaVersion::new(1, 4, 2)));
    assert!(!CARD_SCHEMA.is_compatible_with(&SchemaVersion::new(2, 0, 0)));
}
