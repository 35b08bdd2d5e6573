use super::*;
use crate::scene::model::Scene;

fn store() -> ProjectStore {
    ProjectStore::new(Project::new(vec![
        Scene::new("a", 5.0, "alpha"),
        Scene::new("b", 5.0, "beta"),
        Scene::new("c", 5.0, "gamma"),
    ]))
    .unwrap()
}

fn entry(id: &str, secs: f64) -> TimesheetEntry {
    TimesheetEntry {
        id: id.to_owned(),
        measured_duration_seconds: secs,
        audio_ref: format!("{id}.wav"),
    }
}

#[test]
fn stale_commit_is_rejected_and_state_untouched() {
    let store = store();
    let snap = store.snapshot().unwrap();
    let stale = reconcile(&snap.project, &[entry("a", 1.7)]).unwrap();

    store.apply_timesheet(&[entry("b", 2.7)]).unwrap();
    let before = store.snapshot().unwrap();

    let err = store.commit(snap.revision, stale).unwrap_err();
    assert!(matches!(
        err,
        StoryError::ReconciliationConflict {
            expected: 0,
            actual: 1
        }
    ));
    assert_eq!(store.snapshot().unwrap(), before);
}

#[test]
fn apply_bumps_revision_and_rebuilds_timeline() {
    let store = store();
    let out = store.apply_timesheet(&[entry("a", 1.7)]).unwrap();
    assert_eq!(out.revision, 1);
    assert_eq!(out.changed, vec!["a".to_owned()]);
    let snap = store.snapshot().unwrap();
    assert_eq!(
        snap.timeline.frame_pairs(),
        vec![(0, 60), (60, 210), (210, 360)]
    );
}

#[test]
fn failed_reconciliation_leaves_revision_alone() {
    let store = store();
    assert!(store.apply_timesheet(&[entry("zzz", 1.0)]).is_err());
    assert_eq!(store.revision().unwrap(), 0);
}

#[test]
fn concurrent_timesheets_are_all_applied() {
    let store = store();
    let sheets = [
        vec![entry("a", 0.7)],
        vec![entry("b", 1.7)],
        vec![entry("c", 2.7)],
        vec![entry("a", 0.7), entry("c", 2.7)],
    ];
    std::thread::scope(|s| {
        for sheet in &sheets {
            let store = &store;
            s.spawn(move || store.apply_timesheet(sheet).unwrap());
        }
    });

    let snap = store.snapshot().unwrap();
    assert_eq!(snap.revision, 4);
    assert_eq!(
        snap.timeline.frame_pairs(),
        vec![(0, 30), (30, 90), (90, 180)]
    );
    for scene in &snap.project.scenes {
        assert!(scene.narration_audio_ref.is_some());
    }
}

#[test]
fn background_images_do_not_touch_timeline() {
    let store = store();
    let before = store.snapshot().unwrap();
    let images = BTreeMap::from([
        ("b".to_owned(), "img/b.png".to_owned()),
        ("nope".to_owned(), "img/x.png".to_owned()),
    ]);
    let rev = store.set_background_images(&images).unwrap();
    assert_eq!(rev, 1);
    let after = store.snapshot().unwrap();
    assert_eq!(after.timeline, before.timeline);
    assert_eq!(
        after.project.scenes[1].background_image_ref.as_deref(),
        Some("img/b.png")
    );
    assert_eq!(store.set_background_images(&BTreeMap::new()).unwrap(), 1);
}

#[test]
fn new_rejects_invalid_durations() {
    let err = ProjectStore::new(Project::new(vec![Scene::new("a", -2.0, "x")])).unwrap_err();
    assert!(matches!(err, StoryError::InvalidDuration { .. }));
}
