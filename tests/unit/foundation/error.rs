use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TrackArtError::empty_track("x")
            .to_string()
            .contains("empty track:")
    );
    assert!(
        TrackArtError::invalid_config("x")
            .to_string()
            .contains("invalid config:")
    );
    assert!(
        TrackArtError::snapshot("x")
            .to_string()
            .contains("map snapshot error:")
    );
    assert_eq!(
        TrackArtError::dimension_mismatch((4, 3), (2, 1)).to_string(),
        "dimension mismatch: 4x3 vs 2x1"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TrackArtError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn stage_wraps_once_and_root_peels() {
    let err = TrackArtError::snapshot("renderer exited")
        .at_stage(RenderStage::Snapshot)
        .at_stage(RenderStage::Draw);
    assert_eq!(err.stage(), Some(RenderStage::Snapshot));
    assert!(err.to_string().starts_with("snapshot stage failed:"));
    assert!(matches!(err.root(), TrackArtError::Snapshot(msg) if msg == "renderer exited"));
}

#[test]
fn unstaged_root_is_self() {
    let err = TrackArtError::empty_track("nothing");
    assert_eq!(err.stage(), None);
    assert!(matches!(err.root(), TrackArtError::EmptyTrack(_)));
}

#[test]
fn every_stage_has_a_lowercase_name() {
    let names: Vec<String> = [
        RenderStage::Validate,
        RenderStage::Trim,
        RenderStage::Snapshot,
        RenderStage::Resize,
        RenderStage::Blend,
        RenderStage::Draw,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(
        names,
        ["validate", "trim", "snapshot", "resize", "blend", "draw"]
    );
}
