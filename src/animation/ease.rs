/// A CSS-style cubic-bezier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    /// First control point x, in `[0, 1]`.
    pub x1: f64,
    /// First control point y.
    pub y1: f64,
    /// Second control point x, in `[0, 1]`.
    pub x2: f64,
    /// Second control point y.
    pub y2: f64,
}

impl CubicBezier {
    /// CSS `ease`.
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    /// Material "standard" curve, used for Ken-Burns progress.
    pub const MATERIAL: Self = Self::new(0.4, 0.0, 0.2, 1.0);

    /// Build a curve. `x1`/`x2` are clamped into `[0, 1]` when sampled.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Sample the curve's y value for input progress `x`.
    pub fn solve(self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let x1 = self.x1.clamp(0.0, 1.0);
        let x2 = self.x2.clamp(0.0, 1.0);

        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * self.y1;
        let by = 3.0 * (self.y2 - self.y1) - cy;
        let ay = 1.0 - cy - by;

        let sample_x = |t: f64| ((ax * t + bx) * t + cx) * t;
        let sample_dx = |t: f64| (3.0 * ax * t + 2.0 * bx) * t + cx;
        let sample_y = |t: f64| ((ay * t + by) * t + cy) * t;

        // Newton first, bisection when the slope is too flat.
        let mut t = x;
        for _ in 0..8 {
            let err = sample_x(t) - x;
            if err.abs() < 1e-7 {
                return sample_y(t);
            }
            let d = sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        t = x;
        for _ in 0..64 {
            let v = sample_x(t);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        sample_y(t)
    }
}

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Arbitrary cubic-bezier timing curve.
    Bezier(CubicBezier),
}

impl Ease {
    /// Shorthand for [`CubicBezier::EASE`].
    pub const CSS_EASE: Self = Self::Bezier(CubicBezier::EASE);
    /// Shorthand for [`CubicBezier::MATERIAL`].
    pub const MATERIAL: Self = Self::Bezier(CubicBezier::MATERIAL);

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Bezier(curve) => curve.solve(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
