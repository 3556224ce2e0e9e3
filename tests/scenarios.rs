use videoml::{
    config::{Config, GeneratorConfig, Platform},
    resolve::{resolve, KnownDurations},
    ui::timeline_infos,
    validate::validate,
    DocumentBuilder, ScriptGenerator, VideoProject,
};

const HOLIDAY: &str = include_str!("../demos/holiday.json");
const INTRO: &str = include_str!("../demos/intro.json");

fn holiday_script() -> String {
    let project = VideoProject::from_json_str(HOLIDAY).unwrap();
    let resolved = resolve(&project).unwrap();
    ScriptGenerator::default().generate(&resolved).unwrap()
}

/// Asserts every line appears, in the given order
fn assert_in_order(script: &str, lines: &[&str]) {
    let mut from = 0;
    for line in lines {
        match script[from..].find(line) {
            Some(at) => from += at + line.len(),
            None => panic!("{:?} missing or out of order in:\n{}", line, script),
        }
    }
}

#[test]
fn demo_projects_validate_cleanly() {
    for source in [HOLIDAY, INTRO] {
        let project = VideoProject::from_json_str(source).unwrap();
        let diagnostics = validate(&project);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }
}

#[test]
fn holiday_script_structure() {
    let script = holiday_script();

    assert_in_order(
        &script,
        &[
            "import moviepy\n",
            "beach = moviepy.VideoFileClip(\"clips/beach.mp4\")\n",
            "hike = moviepy.VideoFileClip(\"clips/hike.mp4\")\n",
            "summit = hike.subclipped(70, 85)\n",
            "title = moviepy.TextClip(\n",
            "caption = moviepy.TextClip(\n",
            "music = moviepy.AudioFileClip(\"audio/theme.mp3\")\n",
            "chorus = music.subclipped(30, 45)\n",
            "timeline_element_1 = beach\n",
            "timeline_element_2 = summit.with_start(timeline_element_1.end)\n",
            "timeline_element_3 = title.with_start(timeline_element_1.start + 1).with_duration(4)\n",
            "timeline_element_4 = caption.with_start(timeline_element_2.start).with_duration(5)\n",
            "timeline_element_5 = music.with_start(timeline_element_1.start)\n",
            "timeline_element_6 = chorus.with_start(timeline_element_2.end - 5)\n",
            "final_video = moviepy.CompositeVideoClip([timeline_element_1, timeline_element_2, timeline_element_3, timeline_element_4], size=(1920, 1080))\n",
            "final_audio = moviepy.CompositeAudioClip([timeline_element_1.audio, timeline_element_2.audio, timeline_element_5, timeline_element_6])\n",
            "final_video.audio = final_audio\n",
            "final_video.write_videofile(\"holiday.mp4\")\n",
        ],
    );
    assert!(script.ends_with("final_video.write_videofile(\"holiday.mp4\")\n"));
}

#[test]
fn holiday_options_follow_precedence() {
    let script = holiday_script();

    // the local brightness of summit wins over the group value
    assert_eq!(script.matches("MultiplyColor(factor=1.2)").count(), 1);
    assert_eq!(script.matches("MultiplyColor(factor=1.5)").count(), 1);
    assert_eq!(script.matches("Painting(saturation=0.3, black=0.0)").count(), 2);
    assert_eq!(
        script.matches("MultiplyStereoVolume(left=0.6, right=0.6)").count(),
        2
    );

    // beach has a known 16:9 size, hike does not
    assert!(script.contains("beach = beach.resized((1920, 1080))\n"));
    assert!(!script.contains("if beach.size"));
    assert!(script.contains("if hike.size[0] / hike.size[1] == 16/9:\n"));
}

#[test]
fn holiday_text_clips() {
    let script = holiday_script();

    assert!(script.contains("    font_size=96,\n"));
    assert!(script.contains("def grouping("));
    assert!(script.contains("title_letters = find_letters(title.mask.get_frame(0))\n"));
    // subtitles are pinned below the center
    assert!(script.contains("caption = moviepy.TextClip(\n    text=\"The view from the top\",\n"));
    assert!(script.contains(").with_position((\"center\", 400))\n"));
}

#[test]
fn intro_text_is_aligned_from_its_size() {
    let project = VideoProject::from_json_str(INTRO).unwrap();
    let script = ScriptGenerator::default().generate(&resolve(&project).unwrap()).unwrap();

    assert!(script.contains(").with_position((\"center\", 880))\n"));
    assert!(script.contains("timeline_element_2 = welcome.with_start(2.5).with_duration(3)\n"));
    assert!(script.contains("def falling("));
    assert!(!script.contains("CompositeAudioClip"));
}

#[test]
fn windows_fonts_resolve_to_system_paths() {
    let project = VideoProject::from_json_str(INTRO).unwrap();
    let config = GeneratorConfig {
        platform: Platform::Windows,
        ..GeneratorConfig::default()
    };
    let script = ScriptGenerator::new(config).generate(&resolve(&project).unwrap()).unwrap();

    assert!(script.contains("font=\"C:/Windows/Fonts/Arial.ttf\",\n"));
}

#[test]
fn holiday_timeline_projection() {
    let project = VideoProject::from_json_str(HOLIDAY).unwrap();
    let resolved = resolve(&project).unwrap();
    let mut known = KnownDurations::new();
    known.insert("clips/beach.mp4".into(), 20.0);

    let infos = timeline_infos(&resolved, &known, 5.0).unwrap();
    let spans: Vec<(f64, f64)> = infos.iter().map(|i| (i.start_time, i.end_time)).collect();

    assert_eq!(
        spans,
        vec![
            (0.0, 20.0),
            (20.0, 35.0),
            (1.0, 5.0),
            (20.0, 25.0),
            (0.0, 0.0),
            (30.0, 45.0),
        ]
    );
    let layers: Vec<i32> = infos.iter().map(|i| i.layer).collect();
    assert_eq!(layers, vec![0, 0, 1, 1, 0, 0]);
}

#[test]
fn generation_is_deterministic_across_builders() {
    let project = VideoProject::from_json_str(HOLIDAY).unwrap();
    let resolved = resolve(&project).unwrap();

    let first = ScriptGenerator::default().generate(&resolved).unwrap();
    let second = ScriptGenerator::new(Config::default().generator).generate(&resolved).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn document_build_matches_direct_generation() {
    let project = VideoProject::from_json_str(HOLIDAY).unwrap();
    let builder = DocumentBuilder::new(GeneratorConfig::default());

    let change = builder.build("file:///demos/holiday.json", &project).await.unwrap();
    let content = change.content_value().unwrap();

    assert_eq!(content["$isValid"], true);
    assert_eq!(content["$pythonCode"], holiday_script());
    assert_eq!(content["$timelineElementInfos"].as_array().map(Vec::len), Some(6));
    assert!(change.diagnostics.is_empty());
}

#[test]
fn demo_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/videoml.toml");
    let config = Config::from_file(path).unwrap();

    config.validate().unwrap();
    assert_eq!(config, Config::default());
}
