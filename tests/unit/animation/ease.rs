use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::CSS_EASE,
    Ease::MATERIAL,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::MATERIAL.apply(-3.0), 0.0);
    assert_eq!(Ease::MATERIAL.apply(3.0), 1.0);
}

#[test]
fn linear_bezier_is_identity() {
    let curve = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
    for i in 0..=10 {
        let x = f64::from(i) / 10.0;
        assert!((curve.solve(x) - x).abs() < 1e-5);
    }
}

#[test]
fn material_curve_front_loads_progress() {
    // (0.4, 0, 0.2, 1) is steeper out than in; halfway input is well past halfway output.
    let mid = CubicBezier::MATERIAL.solve(0.5);
    assert!(mid > 0.7 && mid < 0.85, "mid={mid}");
}

#[test]
fn css_ease_matches_reference_value() {
    // Browsers report ~0.8024 for ease at 50%.
    let v = CubicBezier::EASE.solve(0.5);
    assert!((v - 0.8024).abs() < 1e-3, "v={v}");
}
