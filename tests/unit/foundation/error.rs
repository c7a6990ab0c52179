use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PolytraceError::source_unreadable("x")
            .to_string()
            .contains("source unreadable:")
    );
    assert!(
        PolytraceError::render_backend("x")
            .to_string()
            .contains("render backend error:")
    );
    assert!(
        PolytraceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PolytraceError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PolytraceError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        PolytraceError::EmptyDrawing
            .to_string()
            .contains("empty drawing")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PolytraceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
