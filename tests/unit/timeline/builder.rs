use super::*;

fn fps() -> Fps {
    Fps::STANDARD
}

#[test]
fn three_five_second_scenes() {
    let t = build_timeline([("a", 5.0), ("b", 5.0), ("c", 5.0)], None, None, fps()).unwrap();
    assert_eq!(t.frame_pairs(), vec![(0, 150), (150, 300), (300, 450)]);
    assert_eq!(t.total_frames(), 450);
}

#[test]
fn windows_are_contiguous_after_opening() {
    let durations = [1.25, 0.7, 3.33, 2.0, 0.04, 9.99];
    let ids = ["a", "b", "c", "d", "e", "f"];
    let t = build_timeline(
        ids.iter().copied().zip(durations.iter().copied()),
        Some(2.0),
        Some(1.5),
        fps(),
    )
    .unwrap();

    assert_eq!(t.windows[0].start_frame, 60);
    assert_eq!(t.opening_frames(), 60);
    for pair in t.windows.windows(2) {
        assert_eq!(pair[0].end_frame, pair[1].start_frame);
        assert!(pair[0].start_frame < pair[0].end_frame);
    }
    let ending = t.ending.unwrap();
    assert_eq!(ending.start.0, t.windows.last().unwrap().end_frame);
    assert_eq!(ending.len_frames(), 45);
    assert_eq!(t.total_frames(), ending.end.0);
}

#[test]
fn tiny_positive_duration_still_gets_a_frame() {
    let t = build_timeline([("a", 0.001)], None, None, fps()).unwrap();
    assert_eq!(t.frame_pairs(), vec![(0, 1)]);
}

#[test]
fn rejects_non_positive_durations() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = build_timeline([("a", 1.0), ("b", bad)], None, None, fps()).unwrap_err();
        match err {
            StoryError::InvalidDuration { scene, .. } => assert_eq!(scene, "b"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn rejects_bad_opening_duration() {
    let err = build_timeline([("a", 1.0)], Some(0.0), None, fps()).unwrap_err();
    assert!(matches!(err, StoryError::InvalidDuration { scene, .. } if scene == "opening"));
}

#[test]
fn locate_finds_every_segment() {
    let t = build_timeline([("a", 1.0), ("b", 1.0)], Some(1.0), Some(1.0), fps()).unwrap();
    assert_eq!(t.locate(FrameIndex(0)), Some(Segment::Opening));
    assert_eq!(t.locate(FrameIndex(29)), Some(Segment::Opening));
    assert_eq!(t.locate(FrameIndex(30)), Some(Segment::Scene { index: 0 }));
    assert_eq!(t.locate(FrameIndex(59)), Some(Segment::Scene { index: 0 }));
    assert_eq!(t.locate(FrameIndex(60)), Some(Segment::Scene { index: 1 }));
    assert_eq!(t.locate(FrameIndex(90)), Some(Segment::Ending));
    assert_eq!(t.locate(FrameIndex(119)), Some(Segment::Ending));
    assert_eq!(t.locate(FrameIndex(120)), None);
}

#[test]
fn empty_scene_list_is_only_cards() {
    let t = build_timeline(std::iter::empty(), Some(1.0), None, fps()).unwrap();
    assert!(t.windows.is_empty());
    assert_eq!(t.total_frames(), 30);
    let none = build_timeline(std::iter::empty(), None, None, fps()).unwrap();
    assert_eq!(none.total_frames(), 0);
    assert_eq!(none.locate(FrameIndex(0)), None);
}

#[test]
fn for_project_uses_opening_and_ending() {
    use crate::scene::model::{EndingConfig, OpeningConfig, Scene};

    let mut project = Project::new(vec![Scene::new("x", 2.0, "hi")]);
    project.opening = Some(OpeningConfig {
        duration_seconds: 1.0,
        title: "T".to_owned(),
        subtitle: None,
        background_ref: None,
    });
    project.ending = Some(EndingConfig {
        duration_seconds: 0.5,
        message: "bye".to_owned(),
        background_ref: None,
    });
    let t = Timeline::for_project(&project).unwrap();
    assert_eq!(t.frame_pairs(), vec![(30, 90)]);
    assert_eq!(t.total_frames(), 105);
    assert_eq!(t.window_for("x").unwrap().len_frames(), 60);
    assert!(t.window_for("y").is_none());
}
