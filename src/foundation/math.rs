#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `x` from `[in0, in1]` onto `[out0, out1]`, clamping at both ends.
pub(crate) fn interpolate_clamped(x: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    let span = input[1] - input[0];
    if span.abs() < f64::EPSILON {
        return if x < input[0] { output[0] } else { output[1] };
    }
    let t = ((x - input[0]) / span).clamp(0.0, 1.0);
    lerp(output[0], output[1], t)
}

/// Normalized progress of `frame` through a window of `len` frames.
///
/// The last frame of the window maps to `1.0`; single-frame windows are always complete.
pub(crate) fn window_progress(frame: u64, len: u64) -> f64 {
    let denom = len.saturating_sub(1);
    if denom == 0 {
        1.0
    } else {
        (frame.min(denom) as f64) / (denom as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
