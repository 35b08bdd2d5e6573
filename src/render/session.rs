use std::collections::HashMap;
use std::sync::mpsc;

use rayon::prelude::*;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{StoryError, StoryResult},
    render::fingerprint::fingerprint_tree,
    render::frame::Renderer,
    render::sink::{FrameSink, SinkConfig},
    render::tree::VisualTree,
};

/// Options controlling [`RenderSession`] range rendering behavior.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Frames handed to the pool per batch.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Bounded channel capacity between render workers and the sink thread.
    pub channel_capacity: usize,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            channel_capacity: 4,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames delivered to the sink.
    pub frames_delivered: u64,
    /// Frames that look exactly like the frame before them.
    pub frames_static: u64,
}

const SINK_GONE: &str = "sink thread is not accepting frames";

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    tree: Box<VisualTree>,
}

/// Renders frame ranges into a [`FrameSink`].
///
/// Frames are pure functions of the renderer state, so workers may finish in any order; a sink
/// thread reorders them and delivers strictly by frame index.
#[derive(Debug)]
pub struct RenderSession {
    renderer: Renderer,
    opts: RenderOpts,
}

impl RenderSession {
    /// Wrap a renderer.
    pub fn new(renderer: Renderer, opts: RenderOpts) -> Self {
        Self { renderer, opts }
    }

    /// Underlying renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render one frame.
    pub fn render_frame(&self, frame: FrameIndex) -> StoryResult<VisualTree> {
        self.renderer.render(frame)
    }

    /// The whole composition as a range.
    pub fn full_range(&self) -> FrameRange {
        self.renderer.timeline().range()
    }

    /// Render `range` into `sink`.
    ///
    /// The sink receives frames in strictly increasing frame index order. When `parallel` is
    /// enabled, out-of-order worker completion is reordered at the sink boundary (bounded channel
    /// backpressure).
    #[tracing::instrument(skip(self, sink), fields(parallel = self.opts.parallel))]
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> StoryResult<RenderStats> {
        if range.is_empty() {
            return Err(StoryError::validation(
                "render_range range must be non-empty",
            ));
        }
        if range.end.0 > self.renderer.total_frames() {
            return Err(StoryError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let cfg = SinkConfig {
            canvas: self.renderer.canvas(),
            fps: self.renderer.project().fps,
            range,
            audio: self
                .renderer
                .audio_plan()
                .directives
                .iter()
                .filter(|d| d.start_frame < range.end.0 && range.start.0 < d.end_frame)
                .cloned()
                .collect(),
        };

        let cap = self.opts.channel_capacity.max(1);
        let chunk_size = normalized_chunk_size(self.opts.chunk_size).min(range.len_frames());
        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        std::thread::scope(|scope| -> StoryResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let range_start = range.start.0;
            let range_end = range.end.0;
            let sink_ref: &mut dyn FrameSink = sink;

            let deliver = scope.spawn(move || -> StoryResult<RenderStats> {
                sink_ref.begin(cfg)?;

                let mut stats = RenderStats {
                    frames_total: range_end - range_start,
                    ..RenderStats::default()
                };
                let mut prev = None;
                let mut push = |idx: u64, tree: &VisualTree| -> StoryResult<()> {
                    let fp = fingerprint_tree(tree)?;
                    if prev == Some(fp) {
                        stats.frames_static += 1;
                    }
                    prev = Some(fp);
                    sink_ref.push_frame(FrameIndex(idx), tree)?;
                    stats.frames_delivered += 1;
                    Ok(())
                };

                let mut next = range_start;
                let mut pending = HashMap::<u64, Box<VisualTree>>::new();
                while next < range_end {
                    if let Some(tree) = pending.remove(&next) {
                        push(next, &tree)?;
                        next += 1;
                        continue;
                    }

                    let msg = rx.recv().map_err(|_| {
                        StoryError::evaluation("frame channel disconnected unexpectedly")
                    })?;
                    pending.insert(msg.idx.0, msg.tree);
                }

                sink_ref.end()?;
                Ok(stats)
            });

            let produce_res = match pool.as_ref() {
                Some(pool) => {
                    let mut chunk_start = range_start;
                    let mut res = Ok(());
                    while chunk_start < range_end && res.is_ok() {
                        let chunk_end = (chunk_start + chunk_size).min(range_end);
                        res = self.render_chunk_parallel(pool, &tx, chunk_start, chunk_end);
                        chunk_start = chunk_end;
                    }
                    res
                }
                None => (range_start..range_end).try_for_each(|f| self.render_and_send(&tx, f)),
            };

            drop(tx);
            let deliver_res = deliver
                .join()
                .map_err(|_| StoryError::evaluation("sink thread panicked"))?;

            // Either side failing disconnects the other; report the root cause.
            let stats = match (produce_res, deliver_res) {
                (Ok(()), deliver) => deliver?,
                (Err(StoryError::Evaluation(msg)), Err(sink_err)) if msg == SINK_GONE => {
                    return Err(sink_err);
                }
                (Err(e), _) => return Err(e),
            };
            tracing::debug!(
                frames = stats.frames_delivered,
                static_frames = stats.frames_static,
                "range rendered"
            );
            Ok(stats)
        })
    }

    fn render_and_send(&self, tx: &mpsc::SyncSender<FrameMsg>, f: u64) -> StoryResult<()> {
        let tree = self.renderer.render(FrameIndex(f))?;
        tx.send(FrameMsg {
            idx: FrameIndex(f),
            tree: Box::new(tree),
        })
        .map_err(|_| StoryError::evaluation(SINK_GONE))
    }

    fn render_chunk_parallel(
        &self,
        pool: &rayon::ThreadPool,
        tx: &mpsc::SyncSender<FrameMsg>,
        start: u64,
        end: u64,
    ) -> StoryResult<()> {
        pool.install(|| {
            (start..end).into_par_iter().try_for_each_init(
                || tx.clone(),
                |tx, f| self.render_and_send(tx, f),
            )
        })
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> StoryResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StoryError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
