//! Storyboard reconciliation tests.

use reelsmith_core::ModelVariant;
use reelsmith_error::StoryboardErrorKind;
use reelsmith_storyboard::{parse_preview, Storyboard, StoryboardView};

fn board_with(target: u32, durations: &[u32]) -> anyhow::Result<Storyboard> {
    let mut board = Storyboard::new(target)?;
    let first = board.segments()[0].id;
    board.set_duration(first, durations[0])?;
    for &duration in &durations[1..] {
        let id = board.add_segment()?;
        board.set_duration(id, duration)?;
    }
    let ids: Vec<u32> = board.segments().iter().map(|s| s.id).collect();
    for (index, id) in ids.into_iter().enumerate() {
        board.set_description(id, format!("scene {}", index + 1))?;
    }
    Ok(board)
}

fn durations(board: &Storyboard) -> Vec<u32> {
    board.segments().iter().map(|s| s.duration).collect()
}

#[test]
fn preview_of_two_segments() -> anyhow::Result<()> {
    let mut board = Storyboard::new(10)?;
    let first = board.segments()[0].id;
    board.set_duration(first, 4)?;
    board.set_description(first, "A")?;
    let second = board.add_segment()?;
    assert_eq!(board.segment(second).map(|s| s.duration), Some(5));
    board.set_duration(second, 6)?;
    board.set_description(second, "B")?;

    let preview = board.enter_preview()?.to_string();
    let a = preview.find("[0s-4s] A").expect("first tag");
    let b = preview.find("[4s-10s] B").expect("second tag");
    assert!(a < b);
    Ok(())
}

#[test]
fn shrinking_target_drops_trailing_segment() -> anyhow::Result<()> {
    let mut board = board_with(15, &[5, 5, 5])?;
    board.set_target(10)?;
    assert_eq!(durations(&board), vec![5, 5]);
    assert_eq!(*board.target(), 10);
    Ok(())
}

#[test]
fn shrinking_target_truncates_straddling_segment() -> anyhow::Result<()> {
    let mut board = board_with(15, &[4, 8, 3])?;
    board.set_target(10)?;
    assert_eq!(durations(&board), vec![4, 6]);
    Ok(())
}

#[test]
fn growing_target_keeps_segments() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 6])?;
    board.set_target(15)?;
    assert_eq!(durations(&board), vec![4, 6]);
    assert_eq!(board.remaining(), 5);
    Ok(())
}

#[test]
fn shrink_result_is_never_empty() -> anyhow::Result<()> {
    for target in 1..=25 {
        for new_target in 1..=25 {
            let mut board = Storyboard::new(target)?;
            let first = board.segments()[0].id;
            board.set_duration(first, 1)?;
            while board.add_segment().is_ok() {}
            assert_eq!(board.total(), target);
            board.set_target(new_target)?;
            assert!(!board.segments().is_empty());
            assert!(board.total() > 0);
            assert!(board.total() <= new_target);
        }
    }
    Ok(())
}

#[test]
fn edits_never_exceed_target() -> anyhow::Result<()> {
    let mut board = Storyboard::new(25)?;
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let ids: Vec<u32> = board.segments().iter().map(|s| s.id).collect();
        match seed % 4 {
            0 => {
                let _ = board.add_segment();
            }
            1 if ids.len() > 1 => {
                board.remove_segment(ids[(seed as usize / 7) % ids.len()])?;
            }
            _ => {
                let id = ids[(seed as usize / 3) % ids.len()];
                board.set_duration(id, (seed >> 8) % 40)?;
            }
        }
        assert!(board.total() <= *board.target(), "total {}", board.total());
        assert!(board.segments().iter().all(|s| s.duration >= 1));
    }
    Ok(())
}

#[test]
fn duration_is_clamped_to_remaining_time() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 6])?;
    let first = board.segments()[0].id;
    assert_eq!(board.max_duration_for(first)?, 4);
    assert_eq!(board.set_duration(first, 9)?, 4);
    assert_eq!(board.set_duration(first, 0)?, 1);
    Ok(())
}

#[test]
fn add_rejected_when_full() -> anyhow::Result<()> {
    let mut board = Storyboard::new(10)?;
    let err = board.add_segment().unwrap_err();
    assert_eq!(err.kind, StoryboardErrorKind::Full(10));
    Ok(())
}

#[test]
fn new_segment_takes_what_is_left() -> anyhow::Result<()> {
    let mut board = Storyboard::new(10)?;
    let first = board.segments()[0].id;
    board.set_duration(first, 8)?;
    let id = board.add_segment()?;
    assert_eq!(board.segment(id).map(|s| s.duration), Some(2));
    Ok(())
}

#[test]
fn preview_requires_exact_total() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 3])?;
    let err = board.enter_preview().unwrap_err();
    assert_eq!(
        err.kind,
        StoryboardErrorKind::DurationMismatch { total: 7, target: 10 }
    );
    assert_eq!(board.view(), &StoryboardView::Edit);
    Ok(())
}

#[test]
fn preview_requires_descriptions() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 6])?;
    let second = board.segments()[1].id;
    board.set_description(second, "   ")?;
    let err = board.enter_preview().unwrap_err();
    assert_eq!(err.kind, StoryboardErrorKind::BlankSegment(2));
    Ok(())
}

#[test]
fn preview_boundaries_are_contiguous() -> anyhow::Result<()> {
    let mut board = board_with(25, &[3, 7, 1, 9, 5])?;
    let expected = board.timeline();
    assert_eq!(expected, vec![(0, 3), (3, 10), (10, 11), (11, 20), (20, 25)]);

    let preview = board.enter_preview()?.to_string();
    let parsed: Vec<(u32, u32)> = parse_preview(&preview)
        .iter()
        .map(|line| (line.start, line.end))
        .collect();
    assert_eq!(parsed, expected);
    Ok(())
}

#[test]
fn edit_view_is_locked_while_previewing() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 6])?;
    board.enter_preview()?;
    let err = board.add_segment().unwrap_err();
    assert_eq!(err.kind, StoryboardErrorKind::WrongView("edit"));

    board.back_to_edit();
    assert!(board.preview_text().is_none());
    let first = board.segments()[0].id;
    board.set_description(first, "changed")?;
    Ok(())
}

#[test]
fn finalize_collapses_separators() -> anyhow::Result<()> {
    let mut board = board_with(10, &[4, 6])?;
    board.enter_preview()?;
    board.edit_preview("[0s-4s] A dawn street\n\n\n   [4s-10s] B  \n\n")?;
    assert_eq!(board.finalize()?, "[0s-4s] A dawn street\n[4s-10s] B");
    Ok(())
}

#[test]
fn finalize_rejects_blank_preview() -> anyhow::Result<()> {
    let mut board = board_with(10, &[10])?;
    board.enter_preview()?;
    board.edit_preview(" \n ")?;
    assert_eq!(
        board.finalize().unwrap_err().kind,
        StoryboardErrorKind::EmptyPreview
    );
    Ok(())
}

#[test]
fn finalize_requires_preview() -> anyhow::Result<()> {
    let board = Storyboard::new(10)?;
    assert!(board.finalize().is_err());
    Ok(())
}

#[test]
fn target_change_in_preview_returns_to_edit() -> anyhow::Result<()> {
    let mut board = board_with(15, &[5, 5, 5])?;
    board.enter_preview()?;
    board.select(ModelVariant::Sora2, 10)?;
    assert_eq!(board.view(), &StoryboardView::Edit);
    assert_eq!(durations(&board), vec![5, 5]);
    Ok(())
}

#[test]
fn model_selection_checks_duration() {
    let err = Storyboard::for_model(ModelVariant::Sora2, 25).unwrap_err();
    assert!(matches!(
        err.kind,
        StoryboardErrorKind::UnsupportedDuration { seconds: 25, .. }
    ));
    assert!(Storyboard::for_model(ModelVariant::Sora2Pro, 25).is_ok());
}

#[test]
fn last_segment_cannot_be_removed() -> anyhow::Result<()> {
    let mut board = Storyboard::new(10)?;
    let only = board.segments()[0].id;
    assert_eq!(
        board.remove_segment(only).unwrap_err().kind,
        StoryboardErrorKind::LastSegment
    );
    Ok(())
}

#[test]
fn zero_target_is_rejected() {
    assert!(Storyboard::new(0).is_err());
}
