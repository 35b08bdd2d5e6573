use crate::foundation::error::{StoryError, StoryResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Frame number on the composition axis, counted from 0 at the start of the opening card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames `start..end`; `end` is not part of the range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Range `start..end`; fails when `end` comes before `start`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> StoryResult<Self> {
        if end < start {
            return Err(StoryError::validation(format!(
                "frame range {}..{} ends before it starts",
                start.0, end.0
            )));
        }
        Ok(Self { start, end })
    }

    /// Frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// No frames covered.
    pub fn is_empty(self) -> bool {
        self.len_frames() == 0
    }

    /// `start <= f < end`.
    pub fn contains(self, f: FrameIndex) -> bool {
        (self.start..self.end).contains(&f)
    }
}

/// Frame rate as the fraction `num / den` frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames.
    pub num: u32,
    /// Seconds; never zero.
    pub den: u32,
}

impl Fps {
    /// 30 frames per second, the rate of every narrated video.
    pub const STANDARD: Self = Self { num: 30, den: 1 };

    /// Frame rate `num / den`; both parts must be positive.
    pub fn new(num: u32, den: u32) -> StoryResult<Self> {
        if num == 0 || den == 0 {
            return Err(StoryError::validation(format!(
                "frame rate {num}/{den} must have a positive numerator and denominator"
            )));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Nearest whole number of frames in `secs`.
    ///
    /// Durations such as `7.6s` do not multiply out exactly in binary floating point; rounding keeps
    /// `7.6 * 30` at `228` instead of `227`.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// Scale a frame count authored at 30fps to this frame rate (rounded, at least 1).
    pub fn scale_from_30(self, frames_at_30: u64) -> u64 {
        let secs = frames_at_30 as f64 / 30.0;
        self.secs_to_frames_round(secs).max(1)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Pixel size of the rendered video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Horizontal pixels.
    pub width: u32,
    /// Vertical pixels.
    pub height: u32,
}

/// Output aspect ratio of a project.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AspectRatio {
    /// 16:9 landscape.
    #[default]
    #[serde(rename = "16:9")]
    Landscape16x9,
    /// 9:16 portrait.
    #[serde(rename = "9:16")]
    Portrait9x16,
}

impl AspectRatio {
    /// Output resolution for this aspect ratio.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Landscape16x9 => Canvas {
                width: 1920,
                height: 1080,
            },
            Self::Portrait9x16 => Canvas {
                width: 1080,
                height: 1920,
            },
        }
    }

    /// Return `true` for the portrait layout.
    pub fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait9x16)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Opacity, 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha multiplied by `factor` in `[0, 1]`.
    pub fn scale_alpha(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
