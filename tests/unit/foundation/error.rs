use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SnowError::data_unavailable("x")
            .to_string()
            .contains("data unavailable:")
    );
    assert!(
        SnowError::asset_missing("x")
            .to_string()
            .contains("asset missing:")
    );
    assert!(
        SnowError::sink_write("x")
            .to_string()
            .contains("sink write failure:")
    );
    assert!(
        SnowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SnowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
