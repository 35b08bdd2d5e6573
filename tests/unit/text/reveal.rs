use super::*;

fn scene_text(text: &str, mode: TextDisplayMode, frames: u64) -> SceneText {
    SceneText::new(
        text,
        &BTreeSet::new(),
        mode,
        frames,
        &EngineConfig::default(),
        Fps::STANDARD,
    )
}

fn forty_words() -> String {
    (0..40).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn instant_shows_everything() {
    let t = scene_text("hello there world", TextDisplayMode::Instant, 90);
    for f in [0, 45, 89] {
        let r = t.at(f);
        assert_eq!(r.units.len(), 3);
        assert!(r.units.iter().all(|u| u.opacity == 1.0 && u.scale == 1.0));
        assert!(r.caret.is_none());
    }
}

#[test]
fn typewriter_forty_units_in_ninety_frames() {
    let t = scene_text(&forty_words(), TextDisplayMode::SyncTypewriter, 90);
    let s = t.schedule().copied().unwrap();
    assert_eq!(s.frames_per_unit, 2);
    assert_eq!(s.start_frame(0), 3);
    assert_eq!(s.start_frame(39), 3 + 78);
    assert!(s.start_frame(39) <= 81);
}

#[test]
fn typewriter_last_start_never_passes_reveal_fraction() {
    let cfg = EngineConfig::default();
    for frames in 1..200u64 {
        for n in 1..120usize {
            let s = TypewriterSchedule::new(n, frames, &cfg, Fps::STANDARD);
            let limit = (0.9 * frames as f64).floor() as u64;
            assert!(s.start_frame(n - 1) <= limit, "n={n} frames={frames}");
            for i in 1..n {
                assert!(s.start_frame(i) >= s.start_frame(i - 1));
            }
        }
    }
}

#[test]
fn typewriter_units_fade_in_after_start() {
    let t = scene_text(&forty_words(), TextDisplayMode::SyncTypewriter, 90);
    assert_eq!(t.at(2).units[0].opacity, 0.0);
    let o3 = t.at(3).units[0].opacity;
    let o4 = t.at(4).units[0].opacity;
    assert!(o3 > 0.0 && o3 < o4 && o4 < 1.0);
    assert_eq!(t.at(5).units[0].opacity, 1.0);
    assert_eq!(t.at(5).units[2].opacity, 0.0);
}

#[test]
fn caret_follows_last_revealed_unit_then_disappears() {
    let t = scene_text(&forty_words(), TextDisplayMode::SyncTypewriter, 90);
    let c = t.at(0).caret.unwrap();
    assert_eq!(c.after_unit, None);
    assert!(c.visible);

    assert_eq!(t.at(7).caret.unwrap().after_unit, Some(2));
    assert!(!t.at(20).caret.unwrap().visible);

    let done = t.at(89);
    assert!(done.caret.is_none());
    assert!(done.units.iter().all(|u| u.opacity == 1.0));
}

#[test]
fn bounce_chunks_start_staggered() {
    let t = scene_text("one two three", TextDisplayMode::WordBounce, 150);
    let r = t.at(0);
    assert!(r.is_blank());
    assert_eq!(r.units[0].scale, 0.0);
    assert_eq!(r.units[0].translate_y_px, -40.0);

    let r = t.at(4);
    assert_eq!(r.units[0].opacity, 0.8);
    assert_eq!(r.units[1].opacity, 0.0);
    assert_eq!(r.units[2].opacity, 0.0);
    assert!(t.at(8).units[2].opacity > 0.0);
}

#[test]
fn bounce_overshoots_then_settles() {
    let t = scene_text("one", TextDisplayMode::WordBounce, 300);
    let peak = (0..30).map(|f| t.at(f).units[0].scale).fold(0.0, f64::max);
    assert!(peak > 1.3 && peak < 1.5, "peak {peak}");

    let settled = &t.at(150).units[0];
    assert!((settled.scale - 1.0).abs() < 0.01);
    assert!(settled.translate_y_px.abs() < 0.5);
    assert!(settled.rotation_deg.abs() < 0.2);
}

#[test]
fn emphasized_chunks_glow() {
    let emphasis = BTreeSet::from(["two".to_owned()]);
    let cfg = EngineConfig::default();
    let t = SceneText::new(
        "one two three",
        &emphasis,
        TextDisplayMode::WordBounce,
        150,
        &cfg,
        Fps::STANDARD,
    );
    let r = t.at(60);
    assert_eq!(r.units[1].glow_px, EMPHASIS_GLOW_PX);
    assert_eq!(r.units[1].color, EMPHASIS_COLOR);
    assert_eq!(r.units[1].weight, EMPHASIS_WEIGHT);
    assert_eq!(r.units[0].glow_px, 0.0);
    assert_eq!(r.units[0].weight, REGULAR_WEIGHT);

    let instant = SceneText::new(
        "one two three",
        &emphasis,
        TextDisplayMode::Instant,
        150,
        &cfg,
        Fps::STANDARD,
    );
    let u = &instant.at(0).units[1];
    assert_eq!(u.color, EMPHASIS_COLOR);
    assert_eq!(u.glow_px, 0.0);
}

#[test]
fn empty_text_degrades_to_nothing_in_every_mode() {
    for mode in [
        TextDisplayMode::Instant,
        TextDisplayMode::SyncTypewriter,
        TextDisplayMode::WordBounce,
    ] {
        let t = scene_text("", mode, 90);
        assert!(t.is_empty());
        for f in [0, 10, 89, 500] {
            let r = t.at(f);
            assert!(r.units.is_empty());
            assert!(r.caret.is_none());
            assert!(r.is_blank());
        }
    }
}

#[test]
fn sampling_order_does_not_matter() {
    let t = scene_text(&forty_words(), TextDisplayMode::SyncTypewriter, 90);
    let forward: Vec<_> = (0..90).map(|f| t.at(f)).collect();
    for f in (0..90).rev() {
        assert_eq!(t.at(f), forward[f as usize]);
    }
}
