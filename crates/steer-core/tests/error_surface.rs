use steer_core::errors::{ErrorInfo, SteerError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("key", "process")
        .with_context("reason", "example")
}

#[test]
fn invalid_argument_surface() {
    let err = SteerError::InvalidArgument(sample_info("not-an-object", "expected a table"));
    assert_eq!(err.info().code, "not-an-object");
    assert!(err.info().context.contains_key("key"));
    assert!(err.to_string().starts_with("invalid argument: expected a table"));
}

#[test]
fn missing_key_surface() {
    let err = SteerError::MissingKey(sample_info("missing-key", "no such parameter"));
    assert_eq!(err.info().code, "missing-key");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn serde_surface_with_hint() {
    let err = SteerError::Serde(
        ErrorInfo::new("schema-mismatch", "unsupported card schema").with_hint("re-export the card"),
    );
    assert_eq!(err.info().hint.as_deref(), Some("re-export the card"));
    assert_eq!(
        err.to_string(),
        "serde error: unsupported card schema (code: schema-mismatch) | hint: re-export the card"
    );
}

#[test]
fn serde_shorthand_picks_family() {
    assert!(matches!(
        SteerError::serde("decode-json", "eof"),
        SteerError::Serde(info) if info.message == "eof"
    ));
}
