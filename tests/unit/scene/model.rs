use super::*;

fn three_scenes() -> Project {
    Project::new(vec![
        Scene::new("1", 5.0, "first"),
        Scene::new("2", 5.0, "second"),
        Scene::new("3", 5.0, "third"),
    ])
}

#[test]
fn json_roundtrip_keeps_camel_case_fields() {
    let mut project = three_scenes();
    project.scenes[0].assets.push(Asset {
        kind: AssetKind::Shape {
            shape: ShapeKind::Ellipse,
            color: Rgba8::rgb(255, 0, 0),
        },
        position: AssetPosition {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        },
        animation_kind: AssetAnimation::ZoomIn,
        animation_delay_seconds: 0.2,
        animation_duration_seconds: 0.4,
        opacity: 0.8,
        z_index: 2,
    });
    let s = serde_json::to_string(&project).unwrap();
    assert!(s.contains("\"durationSeconds\""));
    assert!(s.contains("\"type\":\"shape\""));
    assert!(s.contains("\"animationKind\":\"zoomIn\""));
    let de: Project = serde_json::from_str(&s).unwrap();
    assert_eq!(de, project);
}

#[test]
fn minimal_json_uses_defaults() {
    let de: Project = serde_json::from_str(
        r#"{ "scenes": [ { "id": "a", "durationSeconds": 2.0, "textDisplayMode": "word-bounce" } ] }"#,
    )
    .unwrap();
    assert_eq!(de.fps, Fps::STANDARD);
    assert_eq!(de.aspect_ratio, AspectRatio::Landscape16x9);
    assert_eq!(de.scenes[0].text_display_mode, TextDisplayMode::WordBounce);
    assert_eq!(de.engine, EngineConfig::default());
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut project = three_scenes();
    project.scenes[2].id = "1".to_owned();
    assert!(project.validate().is_err());
}

#[test]
fn validate_rejects_empty_id() {
    let mut project = three_scenes();
    project.scenes[1].id = "  ".to_owned();
    assert!(project.validate().is_err());
}

#[test]
fn validate_rejects_bad_fps() {
    let mut project = three_scenes();
    project.fps = Fps { num: 30, den: 0 };
    assert!(project.validate().is_err());
}

#[test]
fn sanitized_substitutes_fallback_duration() {
    let mut project = three_scenes();
    project.scenes[1].duration_seconds = 0.0;
    project.scenes[2].duration_seconds = f64::NAN;
    let (clean, warnings) = project.sanitized();
    assert_eq!(clean.scenes[1].duration_seconds, 3.0);
    assert_eq!(clean.scenes[2].duration_seconds, 3.0);
    assert_eq!(clean.scenes[0].duration_seconds, 5.0);
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].scene_id(), "2");
}

#[test]
fn sanitized_covers_opening_and_ending_cards() {
    let mut project = three_scenes();
    project.opening = Some(OpeningConfig {
        duration_seconds: -1.0,
        title: "Title".to_owned(),
        subtitle: None,
        background_ref: None,
    });
    project.ending = Some(EndingConfig {
        duration_seconds: f64::NAN,
        message: "bye".to_owned(),
        background_ref: None,
    });
    let (clean, warnings) = project.sanitized();
    assert_eq!(clean.opening.as_ref().unwrap().duration_seconds, 3.0);
    assert_eq!(clean.ending.as_ref().unwrap().duration_seconds, 3.0);
    let ids: Vec<&str> = warnings.iter().map(|w| w.scene_id()).collect();
    assert_eq!(ids, ["opening", "ending"]);
    assert!(crate::timeline::builder::Timeline::for_project(&clean).is_ok());
}

#[test]
fn descriptor_splits_prompt_from_reference() {
    let base = SceneDescriptor {
        duration_seconds: 4.0,
        voice_text: "hello".to_owned(),
        image_prompt_or_ref: "https://cdn.example.com/a.png".to_owned(),
        speaker: "narrator".to_owned(),
        emotion: Some(Emotion::Calm),
        transition: None,
        text_display_mode: None,
        assets: vec![],
    };
    let scene = base.clone().into_scene("s");
    assert_eq!(
        scene.background_image_ref.as_deref(),
        Some("https://cdn.example.com/a.png")
    );
    assert!(scene.image_prompt.is_none());
    assert_eq!(scene.speaker.as_deref(), Some("narrator"));
    assert_eq!(scene.text_display_mode, TextDisplayMode::Instant);

    let prompt = SceneDescriptor {
        image_prompt_or_ref: "a lighthouse at dusk, oil painting".to_owned(),
        ..base
    }
    .into_scene("s");
    assert!(prompt.background_image_ref.is_none());
    assert_eq!(
        prompt.image_prompt.as_deref(),
        Some("a lighthouse at dusk, oil painting")
    );
}

#[test]
fn from_descriptors_assigns_sequential_ids() {
    let d = SceneDescriptor {
        duration_seconds: 1.0,
        voice_text: "x".to_owned(),
        image_prompt_or_ref: String::new(),
        speaker: String::new(),
        emotion: None,
        transition: Some(TransitionKind::Wipe),
        text_display_mode: Some(TextDisplayMode::SyncTypewriter),
        assets: vec![],
    };
    let project = Project::from_descriptors(vec![d.clone(), d]);
    assert_eq!(project.scenes[0].id, "scene-1");
    assert_eq!(project.scenes[1].id, "scene-2");
    assert_eq!(project.scenes[1].transition, Some(TransitionKind::Wipe));
    assert!(project.scenes[0].speaker.is_none());
}

#[test]
fn render_request_overrides_output_settings() {
    let req = RenderRequest {
        project: three_scenes(),
        aspect_ratio: AspectRatio::Portrait9x16,
        fps: Fps::STANDARD,
    };
    let project = req.into_project();
    assert_eq!(project.aspect_ratio, AspectRatio::Portrait9x16);
}
