use super::*;

fn seed_frames(layout: &FrameLayout, count: u64) {
    for i in 1..=count {
        let bytes = format!("frame-{i}").into_bytes();
        std::fs::write(layout.path_for(FrameIndex(i)), bytes).unwrap();
    }
}

#[test]
fn pads_with_byte_identical_copies_of_last_frame() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    seed_frames(&layout, 70);

    assert_eq!(extend(&layout, FrameIndex(70), 150).unwrap(), 80);

    let last = std::fs::read(layout.path_for(FrameIndex(70))).unwrap();
    for i in 71..=150 {
        assert_eq!(std::fs::read(layout.path_for(FrameIndex(i))).unwrap(), last);
    }
    for i in 1..=70 {
        assert_eq!(
            std::fs::read(layout.path_for(FrameIndex(i))).unwrap(),
            format!("frame-{i}").into_bytes()
        );
    }
    layout.verify_contiguous(150).unwrap();
}

#[test]
fn rerunning_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 20);
    seed_frames(&layout, 10);

    extend(&layout, FrameIndex(10), 20).unwrap();
    let first: Vec<Vec<u8>> = (1..=20)
        .map(|i| std::fs::read(layout.path_for(FrameIndex(i))).unwrap())
        .collect();
    extend(&layout, FrameIndex(10), 20).unwrap();
    let second: Vec<Vec<u8>> = (1..=20)
        .map(|i| std::fs::read(layout.path_for(FrameIndex(i))).unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn missing_source_is_an_extension_error() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    seed_frames(&layout, 69);

    let err = extend(&layout, FrameIndex(70), 150).unwrap_err();
    assert!(matches!(err, RevealError::Extension { .. }));
    assert!(!layout.path_for(FrameIndex(71)).exists());
}

#[test]
fn target_equal_to_last_is_a_no_op_and_shorter_target_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 5);
    seed_frames(&layout, 5);
    assert_eq!(extend(&layout, FrameIndex(5), 5).unwrap(), 0);
    assert!(matches!(
        extend(&layout, FrameIndex(5), 4),
        Err(RevealError::Validation(_))
    ));
}
