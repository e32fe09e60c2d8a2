use super::*;

#[test]
fn padding_is_at_least_four_digits() {
    let layout = FrameLayout::new("out", 150);
    assert_eq!(layout.digits(), 4);
    assert_eq!(
        layout.path_for(FrameIndex(7)),
        Path::new("out").join("frame_0007.png")
    );
    assert_eq!(
        layout.ffmpeg_pattern(),
        Path::new("out").join("frame_%04d.png")
    );
}

#[test]
fn padding_grows_with_total_frames() {
    let layout = FrameLayout::new("out", 123_456);
    assert_eq!(layout.digits(), 6);
    assert_eq!(
        layout.path_for(FrameIndex(42)),
        Path::new("out").join("frame_000042.png")
    );
    assert_eq!(FrameLayout::new("out", 9_999).digits(), 4);
    assert_eq!(FrameLayout::new("out", 10_000).digits(), 5);
}

#[test]
fn parse_index_accepts_only_sequence_files() {
    let layout = FrameLayout::new("out", 150);
    assert_eq!(layout.parse_index("frame_0012.png"), Some(12));
    assert_eq!(layout.parse_index("frame_12345.png"), Some(12345));
    assert_eq!(layout.parse_index("frame_0012.jpg"), None);
    assert_eq!(layout.parse_index("frame_.png"), None);
    assert_eq!(layout.parse_index("frame_00a2.png"), None);
    assert_eq!(layout.parse_index("imback.mp4"), None);
}

#[test]
fn contiguity_check_reports_gaps_and_overruns() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 5);
    for i in [1, 2, 4, 5] {
        std::fs::write(layout.path_for(FrameIndex(i)), b"x").unwrap();
    }
    assert_eq!(layout.missing_frames(5), vec![FrameIndex(3)]);
    assert!(layout.verify_contiguous(5).is_err());

    std::fs::write(layout.path_for(FrameIndex(3)), b"x").unwrap();
    layout.verify_contiguous(5).unwrap();
    assert!(layout.verify_contiguous(4).is_err());
}

#[test]
fn prune_removes_only_frames_past_total() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 3);
    for i in 1..=5 {
        std::fs::write(layout.path_for(FrameIndex(i)), b"x").unwrap();
    }
    std::fs::write(dir.path().join("imback.mp4"), b"video").unwrap();

    assert_eq!(layout.prune_beyond(3).unwrap(), 2);
    layout.verify_contiguous(3).unwrap();
    assert!(dir.path().join("imback.mp4").exists());
}
