use super::*;

fn still() -> EngineConfig {
    EngineConfig {
        pan_jitter_pct: 0.0,
        ..EngineConfig::default()
    }
}

#[test]
fn patterns_cycle_every_six_scenes() {
    assert_eq!(pattern_for(0).0, 0);
    assert_eq!(pattern_for(5).0, 5);
    assert_eq!(pattern_for(6).0, 0);
    assert_eq!(pattern_for(13).1, PATTERNS[1]);
}

#[test]
fn first_frame_uses_pattern_start() {
    let t = background_transform(1, 0, 150, 7, &still());
    assert_eq!(t.pattern_index, 1);
    assert_eq!(t.pan_x_pct, -3.0);
    assert_eq!(t.pan_y_pct, 0.0);
    // sin(0) == 0, so no breathing yet
    assert_eq!(t.scale, 1.15);
}

#[test]
fn zoom_reaches_pattern_end_with_breathing() {
    let cfg = still();
    let t = background_transform(0, 150, 150, 7, &cfg);
    let breathing = 1.0 + 0.02 * (150.0f64 * 0.015).sin();
    assert!((t.scale - 1.15 * breathing).abs() < 1e-12);
}

#[test]
fn breathing_keeps_held_pattern_moving() {
    let cfg = still();
    let a = background_transform(2, 40, 300, 7, &cfg).scale;
    let b = background_transform(2, 41, 300, 7, &cfg).scale;
    assert_ne!(a, b);
}

#[test]
fn jitter_is_bounded_and_seeded() {
    let cfg = EngineConfig::default();
    for f in 0..300 {
        let t = background_transform(0, f, 300, 42, &cfg);
        assert!(t.pan_x_pct.abs() <= cfg.pan_jitter_pct + 1e-9);
        assert_eq!(t, background_transform(0, f, 300, 42, &cfg));
    }
    let differs =
        (0..300).any(|f| background_transform(0, f, 300, 1, &cfg) != background_transform(0, f, 300, 2, &cfg));
    assert!(differs);
}

#[test]
fn affine_maps_center_by_pan() {
    let t = BackgroundTransform {
        pattern_index: 0,
        pan_x_pct: 10.0,
        pan_y_pct: -10.0,
        scale: 2.0,
    };
    let canvas = Canvas {
        width: 1000,
        height: 500,
    };
    let p = t.affine(canvas) * kurbo::Point::new(500.0, 250.0);
    assert!((p.x - 600.0).abs() < 1e-9);
    assert!((p.y - 200.0).abs() < 1e-9);
}
