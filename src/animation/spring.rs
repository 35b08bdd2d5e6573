use crate::foundation::core::Fps;

/// Physical parameters of a damped harmonic spring released from rest at `0` towards `1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass (`> 0`).
    pub mass: f64,
    /// Spring stiffness `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
}

impl SpringConfig {
    /// Low damping, high stiffness: peaks at ~1.4 before settling.
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 7.5,
    };

    /// Damping ratio `zeta = c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(self) -> f64 {
        let km = (self.stiffness * self.mass).max(1e-9);
        self.damping.max(0.0) / (2.0 * km.sqrt())
    }

    /// Spring position at `frame` frames after release.
    ///
    /// Closed-form, so any frame can be sampled without stepping through earlier ones.
    pub fn sample(self, frame: f64, fps: Fps) -> f64 {
        if frame <= 0.0 {
            return 0.0;
        }
        let t = frame / fps.as_f64();
        let m = self.mass.max(1e-9);
        let omega0 = (self.stiffness.max(0.0) / m).sqrt();
        if omega0 <= 0.0 {
            return 0.0;
        }
        let zeta = self.damping_ratio();

        if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega0 * t).exp();
            1.0 - decay * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
        } else if (zeta - 1.0).abs() < 1e-9 {
            1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
        } else {
            let s = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - s);
            let r2 = -omega0 * (zeta + s);
            let c2 = r1 / (r2 - r1);
            let c1 = -1.0 - c2;
            1.0 + c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::BOUNCY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
