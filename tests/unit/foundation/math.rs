use super::*;

#[test]
fn fnv_is_stable_for_known_input() {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_seed_changes_output() {
    let mut a = Fnv1a64::new(1);
    let mut b = Fnv1a64::new(2);
    a.write_u64(42);
    b.write_u64(42);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn interpolate_clamps_both_ends() {
    assert_eq!(interpolate_clamped(-5.0, [0.0, 10.0], [1.0, 2.0]), 1.0);
    assert_eq!(interpolate_clamped(15.0, [0.0, 10.0], [1.0, 2.0]), 2.0);
    assert!((interpolate_clamped(5.0, [0.0, 10.0], [1.0, 2.0]) - 1.5).abs() < 1e-12);
}

#[test]
fn interpolate_degenerate_input_is_a_step() {
    assert_eq!(interpolate_clamped(0.0, [3.0, 3.0], [0.0, 1.0]), 0.0);
    assert_eq!(interpolate_clamped(3.0, [3.0, 3.0], [0.0, 1.0]), 1.0);
}

#[test]
fn window_progress_hits_endpoints() {
    assert_eq!(window_progress(0, 10), 0.0);
    assert_eq!(window_progress(9, 10), 1.0);
    assert_eq!(window_progress(20, 10), 1.0);
    assert_eq!(window_progress(0, 1), 1.0);
    assert_eq!(window_progress(0, 0), 1.0);
}
