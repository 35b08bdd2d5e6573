use std::io::Write;

use crate::{
    audio::directives::AudioDirective,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{StoryError, StoryResult},
    render::tree::VisualTree,
};

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Rendered range.
    pub range: FrameRange,
    /// Directives overlapping `range`, for the host's audio track.
    pub audio: Vec<AudioDirective>,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested render range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StoryResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &VisualTree) -> StoryResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> StoryResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, VisualTree)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, VisualTree)] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StoryResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &VisualTree) -> StoryResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StoryResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes the sink config, then one JSON document per frame, each on its own line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap a writer. Buffering is the caller's choice.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> StoryResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out
            .write_all(b"\n")
            .map_err(|e| StoryError::Other(anyhow::Error::new(e).context("write frame line")))
    }
}

impl<W: Write + Send> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> StoryResult<()> {
        self.write_line(&cfg)
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &VisualTree) -> StoryResult<()> {
        self.write_line(frame)
    }

    fn end(&mut self) -> StoryResult<()> {
        self.out
            .flush()
            .map_err(|e| StoryError::Other(anyhow::Error::new(e).context("flush frame sink")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
