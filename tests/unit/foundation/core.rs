use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn empty_range_contains_nothing() {
    let r = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.len_frames(), 0);
    assert!(!r.contains(FrameIndex(4)));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap().as_f64(), 30000.0 / 1001.0);
}

#[test]
fn fps_round_handles_inexact_products() {
    let fps = Fps::STANDARD;
    assert_eq!(fps.secs_to_frames_round(7.6), 228);
    assert_eq!(fps.secs_to_frames_round(7.3 + 0.3), 228);
    assert_eq!(fps.secs_to_frames_round(5.0), 150);
}

#[test]
fn fps_scales_thirty_fps_constants() {
    assert_eq!(Fps::STANDARD.scale_from_30(15), 15);
    assert_eq!(Fps::new(60, 1).unwrap().scale_from_30(15), 30);
    assert_eq!(Fps::new(24, 1).unwrap().scale_from_30(12), 10);
    assert_eq!(Fps::new(1, 1).unwrap().scale_from_30(12), 1);
}

#[test]
fn aspect_ratio_resolutions() {
    assert_eq!(
        AspectRatio::Landscape16x9.canvas(),
        Canvas {
            width: 1920,
            height: 1080
        }
    );
    assert_eq!(
        AspectRatio::Portrait9x16.canvas(),
        Canvas {
            width: 1080,
            height: 1920
        }
    );
    let json = serde_json::to_string(&AspectRatio::Portrait9x16).unwrap();
    assert_eq!(json, "\"9:16\"");
}

#[test]
fn scale_alpha_clamps_factor() {
    let c = Rgba8::rgb(10, 20, 30);
    assert_eq!(c.scale_alpha(0.5).a, 128);
    assert_eq!(c.scale_alpha(2.0).a, 255);
    assert_eq!(c.scale_alpha(-1.0).a, 0);
}
