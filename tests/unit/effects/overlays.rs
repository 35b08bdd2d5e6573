use super::*;

#[test]
fn missing_emotion_is_neutral() {
    assert_eq!(tint_for(None), tint_for(Some(Emotion::Neutral)));
    assert_ne!(tint_for(Some(Emotion::Happy)), tint_for(Some(Emotion::Sad)));
}

#[test]
fn tint_is_translucent() {
    let t = tint_for(Some(Emotion::Excited));
    assert!(t.top.a < 255 && t.bottom.a < 255);
    assert!(t.top.a < t.bottom.a);
}

#[test]
fn sweep_loops_over_its_period() {
    let fps = Fps::STANDARD;
    let start = light_sweep(0, fps);
    assert_eq!(start.center_x_pct, -20.0);
    assert_eq!(start.intensity, 0.0);
    assert_eq!(light_sweep(240, fps), start);

    let mid = light_sweep(120, fps);
    assert!((mid.center_x_pct - 50.0).abs() < 1e-9);
    assert!((mid.intensity - SWEEP_PEAK).abs() < 1e-9);
}

#[test]
fn vignette_is_fixed() {
    let a = scene_overlays(None, 0, Fps::STANDARD);
    let b = scene_overlays(Some(Emotion::Calm), 999, Fps::STANDARD);
    assert_eq!(a.vignette, b.vignette);
}
