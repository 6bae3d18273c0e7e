use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::content("x").to_string().contains("content error:"));
    assert!(ReelError::surface("x").to_string().contains("surface error:"));
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReelError::Serde(_)));
}
