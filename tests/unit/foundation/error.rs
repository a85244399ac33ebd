use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PartyError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PartyError::storage("x")
            .to_string()
            .contains("storage error:")
    );
    assert!(
        PartyError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk on fire");
    let err = PartyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk on fire"));
}
