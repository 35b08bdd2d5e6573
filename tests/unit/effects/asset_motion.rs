use super::*;
use crate::foundation::core::Rgba8;
use crate::scene::model::{AssetKind, AssetPosition, ShapeKind};

fn asset(kind: AssetAnimation, delay: f64) -> Asset {
    Asset {
        kind: AssetKind::Shape {
            shape: ShapeKind::Ellipse,
            color: Rgba8::WHITE,
        },
        position: AssetPosition {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        },
        animation_kind: kind,
        animation_delay_seconds: delay,
        animation_duration_seconds: 0.5,
        opacity: 0.8,
        z_index: 0,
    }
}

#[test]
fn static_asset_rests_at_its_opacity() {
    let m = asset_motion(&asset(AssetAnimation::None, 1.0), 0, Fps::STANDARD);
    assert_eq!(m.opacity, 0.8);
    assert_eq!(m.scale, 1.0);
}

#[test]
fn hidden_before_delay() {
    let a = asset(AssetAnimation::FadeIn, 1.0);
    assert_eq!(asset_motion(&a, 29, Fps::STANDARD).opacity, 0.0);
    assert_eq!(asset_motion(&a, 30, Fps::STANDARD).opacity, 0.0);
    assert!(asset_motion(&a, 35, Fps::STANDARD).opacity > 0.0);
    assert_eq!(asset_motion(&a, 45, Fps::STANDARD).opacity, 0.8);
}

#[test]
fn slide_up_settles_in_place() {
    let a = asset(AssetAnimation::SlideUp, 0.0);
    assert_eq!(asset_motion(&a, 0, Fps::STANDARD).translate_y_pct, 10.0);
    assert_eq!(asset_motion(&a, 15, Fps::STANDARD).translate_y_pct, 0.0);
}

#[test]
fn zoom_in_grows_from_half() {
    let a = asset(AssetAnimation::ZoomIn, 0.0);
    assert_eq!(asset_motion(&a, 0, Fps::STANDARD).scale, 0.5);
    assert_eq!(asset_motion(&a, 30, Fps::STANDARD).scale, 1.0);
}

#[test]
fn bounce_overshoots() {
    let a = asset(AssetAnimation::Bounce, 0.0);
    let peak = (0..30)
        .map(|f| asset_motion(&a, f, Fps::STANDARD).scale)
        .fold(0.0, f64::max);
    assert!(peak > 1.3, "peak {peak}");
}

#[test]
fn pulse_and_float_loop_after_entry() {
    let pulse = asset(AssetAnimation::Pulse, 0.0);
    assert_eq!(asset_motion(&pulse, 15, Fps::STANDARD).scale, 1.0);
    let s = asset_motion(&pulse, 15 + 11, Fps::STANDARD).scale;
    assert!(s > 1.0 && s <= 1.05);

    let float = asset(AssetAnimation::Float, 0.0);
    let y = asset_motion(&float, 15 + 22, Fps::STANDARD).translate_y_pct;
    assert!(y < 0.0 && y >= -1.5);
}
