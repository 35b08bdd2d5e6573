use smallvec::SmallVec;

use crate::{
    animation::noise::scene_seed,
    audio::directives::{AudioPlan, build_audio_plan},
    effects::asset_motion::asset_motion,
    effects::ken_burns::background_transform,
    effects::overlays::scene_overlays,
    effects::transitions::{TransitionKind, TransitionParams, transition_state},
    foundation::core::{Canvas, FrameIndex, Rect},
    foundation::error::{StoryError, StoryResult},
    foundation::math::window_progress,
    foundation::warning::{MediaKind, Warning},
    render::tree::{
        AssetLayer, BackgroundLayer, BackgroundSource, CenterTextLayer, Layer, NarrationLayer,
        SubtitleLayer, TitleCardLayer, VisualTree,
    },
    scene::model::{Asset, Project, Scene},
    text::reveal::SceneText,
    timeline::builder::{Segment, Timeline, TimelineWindow},
};

const CARD_FADE_FRAMES_AT_30: u64 = 15;

/// Everything about a scene that does not depend on the frame.
#[derive(Clone, Debug)]
struct ScenePlan {
    transition: TransitionParams,
    seed: u64,
    text: SceneText,
    background: BackgroundSource,
    // indices into `scene.assets`, stable-sorted by z-index
    asset_order: Vec<usize>,
    warnings: Vec<Warning>,
}

impl ScenePlan {
    fn new(project: &Project, index: usize, scene: &Scene, window: &TimelineWindow) -> Self {
        let scene_frames = window.len_frames();
        let kind = TransitionKind::for_scene(scene.transition, index);
        let text = SceneText::new(
            &scene.subtitle_text,
            &scene.emphasis_words,
            scene.text_display_mode,
            scene_frames,
            &project.engine,
            project.fps,
        );

        let mut warnings = Vec::new();
        if scene
            .background_image_ref
            .as_deref()
            .is_none_or(str::is_empty)
        {
            warnings.push(Warning::MissingMedia {
                scene_id: scene.id.clone(),
                media: MediaKind::BackgroundImage,
            });
        }
        if scene
            .narration_audio_ref
            .as_deref()
            .is_none_or(str::is_empty)
        {
            warnings.push(Warning::MissingMedia {
                scene_id: scene.id.clone(),
                media: MediaKind::NarrationAudio,
            });
        }
        if text.is_empty() {
            warnings.push(Warning::EmptyText {
                scene_id: scene.id.clone(),
            });
        }

        let mut asset_order: Vec<usize> = (0..scene.assets.len()).collect();
        asset_order.sort_by_key(|&i| scene.assets[i].z_index);

        Self {
            transition: TransitionParams {
                kind,
                scene_frames,
                aspect_ratio: project.aspect_ratio,
                fps: project.fps,
                symmetric_fade_in: project.engine.symmetric_fade_in,
            },
            seed: scene_seed(&scene.subtitle_text),
            text,
            background: BackgroundSource::image_or_neutral(scene.background_image_ref.as_deref()),
            asset_order,
            warnings,
        }
    }
}

/// Pure frame renderer over one immutable project state.
///
/// All per-scene preparation (segmentation, transition choice, seeds, audio plan) happens in
/// [`Renderer::new`]; [`Renderer::render`] only reads, so frames may be rendered in any order and
/// from any number of threads.
#[derive(Clone, Debug)]
pub struct Renderer {
    project: Project,
    timeline: Timeline,
    canvas: Canvas,
    scenes: Vec<ScenePlan>,
    audio: AudioPlan,
}

impl Renderer {
    /// Validate `project` and build its timeline.
    pub fn new(project: Project) -> StoryResult<Self> {
        project.validate()?;
        let timeline = Timeline::for_project(&project)?;
        Self::with_timeline(project, timeline)
    }

    /// Use an already built timeline, e.g. from a [`crate::ProjectSnapshot`].
    pub fn with_timeline(project: Project, timeline: Timeline) -> StoryResult<Self> {
        if timeline.windows.len() != project.scenes.len() {
            return Err(StoryError::validation(format!(
                "timeline has {} windows for {} scenes",
                timeline.windows.len(),
                project.scenes.len()
            )));
        }
        if let Some((scene, window)) = project
            .scenes
            .iter()
            .zip(&timeline.windows)
            .find(|(s, w)| s.id != w.scene_id)
        {
            return Err(StoryError::validation(format!(
                "timeline window '{}' does not match scene '{}'",
                window.scene_id, scene.id
            )));
        }

        let scenes = project
            .scenes
            .iter()
            .zip(&timeline.windows)
            .enumerate()
            .map(|(i, (scene, window))| ScenePlan::new(&project, i, scene, window))
            .collect();
        let audio = build_audio_plan(&project, &timeline);
        Ok(Self {
            canvas: project.aspect_ratio.canvas(),
            project,
            timeline,
            scenes,
            audio,
        })
    }

    /// Project being rendered.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Timeline the renderer resolves frames against.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Composition length in frames.
    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Audio directives of the whole composition.
    pub fn audio_plan(&self) -> &AudioPlan {
        &self.audio
    }

    /// Non-fatal conditions of every scene.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.scenes.iter().flat_map(|s| s.warnings.iter())
    }

    /// Render the visual tree of absolute `frame`.
    pub fn render(&self, frame: FrameIndex) -> StoryResult<VisualTree> {
        let total_frames = self.total_frames();
        let segment = self.timeline.locate(frame).ok_or_else(|| {
            StoryError::evaluation(format!(
                "frame {} is outside the composition (0..{total_frames})",
                frame.0
            ))
        })?;

        let mut tree = VisualTree {
            frame,
            canvas: self.canvas,
            fps: self.project.fps,
            total_frames,
            segment,
            scene_id: None,
            local_frame: 0,
            segment_frames: 0,
            transition: None,
            opacity: 1.0,
            layers: Vec::new(),
            audio: self.audio.active_at(frame).cloned().collect::<SmallVec<_>>(),
            warnings: Vec::new(),
        };

        match segment {
            Segment::Opening => self.fill_opening(&mut tree),
            Segment::Ending => self.fill_ending(&mut tree),
            Segment::Scene { index } => self.fill_scene(&mut tree, index)?,
        }
        Ok(tree)
    }

    fn fill_scene(&self, tree: &mut VisualTree, index: usize) -> StoryResult<()> {
        let (Some(scene), Some(window), Some(plan)) = (
            self.project.scenes.get(index),
            self.timeline.windows.get(index),
            self.scenes.get(index),
        ) else {
            return Err(StoryError::evaluation(format!(
                "scene index {index} out of range"
            )));
        };
        let local = window.local_frame(tree.frame);
        let scene_frames = window.len_frames();
        let cfg = &self.project.engine;
        let fps = self.project.fps;

        let transition = transition_state(&plan.transition, local);
        let motion = background_transform(index, local, scene_frames, plan.seed, cfg);
        let overlays = scene_overlays(scene.emotion, local, fps);

        let mut layers = Vec::with_capacity(8 + scene.assets.len());
        layers.push(Layer::Background(BackgroundLayer {
            source: plan.background.clone(),
            transform: motion.affine(self.canvas),
            motion,
        }));
        layers.push(Layer::Tint(overlays.tint));
        layers.push(Layer::LightSweep(overlays.light));
        layers.push(Layer::Vignette(overlays.vignette));

        for &i in &plan.asset_order {
            let asset = &scene.assets[i];
            layers.push(Layer::Asset(AssetLayer {
                asset: asset.kind.clone(),
                rect: asset_rect(asset, self.canvas),
                z_index: asset.z_index,
                motion: asset_motion(asset, local, fps),
            }));
        }

        if !plan.text.is_empty() {
            let short_side = f64::from(self.canvas.width.min(self.canvas.height));
            layers.push(Layer::CenterText(CenterTextLayer {
                reveal: plan.text.at(local),
                font_size_px: short_side * 0.06,
                max_width_px: f64::from(self.canvas.width) * 0.8,
            }));
            layers.push(Layer::Subtitle(SubtitleLayer {
                text: scene.subtitle_text.trim().to_owned(),
                font_size_px: short_side * 0.037,
                bottom_margin_px: f64::from(self.canvas.height) * 0.06,
            }));
        }

        layers.push(Layer::Narration(NarrationLayer {
            speaker: scene.speaker.clone(),
            speaking: scene
                .narration_audio_ref
                .as_deref()
                .is_some_and(|r| !r.is_empty()),
        }));

        tree.scene_id = Some(scene.id.clone());
        tree.local_frame = local;
        tree.segment_frames = scene_frames;
        tree.opacity = transition.opacity;
        tree.transition = Some(transition);
        tree.layers = layers;
        tree.warnings = plan.warnings.clone();
        Ok(())
    }

    fn fill_opening(&self, tree: &mut VisualTree) {
        let (Some(range), Some(cfg)) = (self.timeline.opening, self.project.opening.as_ref())
        else {
            return;
        };
        let local = tree.frame.0 - range.start.0;
        let len = range.len_frames();
        self.fill_card(
            tree,
            local,
            len,
            TitleCardLayer {
                title: cfg.title.clone(),
                subtitle: cfg.subtitle.clone(),
                background: BackgroundSource::image_or_neutral(cfg.background_ref.as_deref()),
                opacity: 1.0,
                font_size_px: 0.0,
            },
        );
    }

    fn fill_ending(&self, tree: &mut VisualTree) {
        let (Some(range), Some(cfg)) = (self.timeline.ending, self.project.ending.as_ref()) else {
            return;
        };
        let local = tree.frame.0 - range.start.0;
        let len = range.len_frames();
        self.fill_card(
            tree,
            local,
            len,
            TitleCardLayer {
                title: cfg.message.clone(),
                subtitle: None,
                background: BackgroundSource::image_or_neutral(cfg.background_ref.as_deref()),
                opacity: 1.0,
                font_size_px: 0.0,
            },
        );
    }

    fn fill_card(&self, tree: &mut VisualTree, local: u64, len: u64, mut card: TitleCardLayer) {
        card.opacity = card_opacity(
            local,
            len,
            self.project.fps.scale_from_30(CARD_FADE_FRAMES_AT_30),
        );
        card.font_size_px = f64::from(self.canvas.width.min(self.canvas.height)) * 0.08;
        tree.local_frame = local;
        tree.segment_frames = len;
        tree.opacity = card.opacity;
        tree.layers = vec![Layer::TitleCard(card)];
    }
}

/// Fade in over the first `fade` frames and out over the last `fade`, clamped to half the card.
fn card_opacity(local: u64, len: u64, fade: u64) -> f64 {
    let fade = fade.min(len / 2);
    if fade == 0 {
        return 1.0;
    }
    if local < fade {
        return (local + 1) as f64 / fade as f64;
    }
    let tail_start = len - fade;
    if local >= tail_start {
        return 1.0 - window_progress(local - tail_start, fade);
    }
    1.0
}

fn asset_rect(asset: &Asset, canvas: Canvas) -> Rect {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let p = asset.position;
    Rect::new(
        p.x * w / 100.0,
        p.y * h / 100.0,
        (p.x + p.width) * w / 100.0,
        (p.y + p.height) * h / 100.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
