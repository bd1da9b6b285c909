use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(FilError::load("x").to_string().contains("load error:"));
    assert!(
        FilError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FilError::config("x").to_string().contains("config error:"));
    assert!(
        FilError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: FilError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, FilError::Serde(_)));
}
