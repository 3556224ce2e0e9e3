use tracing::debug;

use crate::{
    codegen::{python, ScriptWriter},
    config::GeneratorConfig,
    model::{
        AspectFit, Coordinate, Element, PixelSize, Transition, VideoOption, VideoProject,
    },
};

/// Frame size of a video element, following extracts back to their original
pub fn intrinsic_size(project: &VideoProject, element: &Element) -> Option<PixelSize> {
    let mut current = element;
    // bounded so that a source loop cannot spin forever
    for _ in 0..=project.elements.len() {
        match current {
            Element::Video(video) => return video.size,
            Element::VideoExtract(extract) => current = project.element(&extract.source)?,
            _ => return None,
        }
    }
    None
}

/// Load or cut one video element, fit it to the canvas and apply its options
pub fn compile_video(
    element: &Element,
    project: &VideoProject,
    config: &GeneratorConfig,
    writer: &mut ScriptWriter,
) {
    let (name, options) = match element {
        Element::Video(video) => {
            writer.comment("Load the video clip");
            writer.add_line(&format!(
                "{} = moviepy.VideoFileClip({})",
                video.name,
                python::string_literal(&video.path)
            ));
            (&video.name, &video.options)
        }
        Element::VideoExtract(extract) => {
            writer.comment("Extract a subclip from the video");
            writer.add_line(&format!(
                "{} = {}.subclipped({}, {})",
                extract.name,
                extract.source,
                python::number(extract.start.as_seconds()),
                python::number(extract.end.as_seconds())
            ));
            (&extract.name, &extract.options)
        }
        _ => return,
    };

    compile_fit(name, intrinsic_size(project, element), config, writer);

    for option in options {
        compile_video_option(name, option, options, config, writer);
    }
    writer.blank_line();
    debug!("Compiled video element {}", name);
}

/// Resize so the clip covers the canvas
///
/// With a known frame size the branch is chosen here; otherwise the script
/// compares the ratio at run time.
fn compile_fit(
    name: &str,
    size: Option<PixelSize>,
    config: &GeneratorConfig,
    writer: &mut ScriptWriter,
) {
    let canvas = config.canvas;
    let exact = format!("{n} = {n}.resized(({}, {}))", canvas.width, canvas.height, n = name);
    let fit_width = format!("{n} = {n}.resized(width={})", canvas.width, n = name);
    let fit_height = format!("{n} = {n}.resized(height={})", canvas.height, n = name);
    let center = format!("{n} = {n}.with_position((\"center\", \"center\"))", n = name);

    writer.comment("Resize the video clip");
    match size.map(|s| canvas.fit(s.width, s.height)) {
        Some(AspectFit::Exact) => writer.add_line(&exact),
        Some(AspectFit::FitWidth) => {
            writer.add_line(&fit_width);
            writer.add_line(&center);
        }
        Some(AspectFit::FitHeight) => {
            writer.add_line(&fit_height);
            writer.add_line(&center);
        }
        None => {
            let ratio = python::ratio(canvas.width, canvas.height);
            let clip_ratio = format!("{n}.size[0] / {n}.size[1]", n = name);
            writer.add_line(&format!("if {} == {}:", clip_ratio, ratio));
            writer.indent();
            writer.add_line(&exact);
            writer.dedent();
            writer.add_line("else:");
            writer.indent();
            writer.add_line(&format!("if {} > {}:", clip_ratio, ratio));
            writer.indent();
            writer.add_line(&fit_width);
            writer.dedent();
            writer.add_line("else:");
            writer.indent();
            writer.add_line(&fit_height);
            writer.dedent();
            writer.add_line(&center);
            writer.dedent();
        }
    }
}

/// Explicit size set by a size or resolution option
fn option_size(options: &[VideoOption]) -> Option<PixelSize> {
    options.iter().find_map(|option| match option {
        VideoOption::Size(size) => Some(*size),
        VideoOption::Resolution(preset) => Some(preset.size()),
        _ => None,
    })
}

fn apply_effect(name: &str, comment: &str, variable: &str, constructor: String, writer: &mut ScriptWriter) {
    writer.comment(comment);
    writer.add_line(&format!("{} = {}", variable, constructor));
    writer.add_line(&format!("{n} = {}.apply({n})", variable, n = name));
}

fn compile_video_option(
    name: &str,
    option: &VideoOption,
    options: &[VideoOption],
    config: &GeneratorConfig,
    writer: &mut ScriptWriter,
) {
    match option {
        VideoOption::Brightness(factor) => apply_effect(
            name,
            "Apply brightness effect",
            "multiply_effect",
            format!("moviepy.video.fx.MultiplyColor(factor={})", python::number(*factor)),
            writer,
        ),
        VideoOption::Scale(factor) => apply_effect(
            name,
            "Apply scale effect",
            "resize_effect",
            format!("moviepy.video.fx.Resize({})", python::number(*factor)),
            writer,
        ),
        VideoOption::Opacity(opacity) => {
            writer.comment("Apply opacity effect");
            writer.add_line(&format!(
                "{n} = {n}.with_opacity({})",
                python::number(*opacity),
                n = name
            ));
        }
        VideoOption::Contrast(contrast) => apply_effect(
            name,
            "Apply contrast effect",
            "lum_contrast_effect",
            format!(
                "moviepy.video.fx.LumContrast(lum=20, contrast={}, contrast_threshold=127)",
                python::number(*contrast)
            ),
            writer,
        ),
        VideoOption::Saturation(saturation) => apply_effect(
            name,
            "Apply saturation effect",
            "painting_effect",
            format!(
                "moviepy.video.fx.Painting(saturation={}, black=0.0)",
                python::number(*saturation)
            ),
            writer,
        ),
        VideoOption::Rotation(angle) => apply_effect(
            name,
            "Apply rotation effect",
            "rotate_effect",
            format!(
                "moviepy.video.fx.Rotate(angle={}, unit=\"deg\", resample=\"bicubic\", expand=True)",
                python::number(*angle)
            ),
            writer,
        ),
        VideoOption::Transition(Transition::FadeIn) => apply_effect(
            name,
            "Apply fade in effect",
            "fade_in",
            "moviepy.video.fx.CrossFadeIn(1)".to_string(),
            writer,
        ),
        VideoOption::Transition(Transition::FadeOut) => apply_effect(
            name,
            "Apply fade out effect",
            "fade_out",
            "moviepy.video.fx.CrossFadeOut(1)".to_string(),
            writer,
        ),
        VideoOption::Resolution(preset) => {
            writer.comment("Apply resolution effect");
            writer.add_line(&format!(
                "{n} = {n}.resized({})",
                python::size_tuple(preset.size()),
                n = name
            ));
        }
        VideoOption::Size(size) => {
            writer.comment("Apply size effect");
            writer.add_line(&format!("{n} = {n}.resized({})", python::size_tuple(*size), n = name));
        }
        VideoOption::Position(position) => {
            let placed = position.place(
                config.canvas,
                option_size(options),
                (Coordinate::Pixels(0), Coordinate::Pixels(0)),
            );
            writer.comment("Apply position effect");
            writer.add_line(&format!(
                "{n} = {n}.with_position({})",
                python::position_tuple(placed),
                n = name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AxisPosition, HorizontalAlign, Position, ResolutionPreset, VerticalAlign, VideoExtract,
        VideoOriginal,
    };

    fn original(size: Option<PixelSize>, options: Vec<VideoOption>) -> Element {
        Element::Video(VideoOriginal {
            name: "v1".into(),
            path: "a.mp4".into(),
            size,
            options,
        })
    }

    fn compile(element: &Element, project: &VideoProject) -> String {
        let mut writer = ScriptWriter::new();
        compile_video(element, project, &GeneratorConfig::default(), &mut writer);
        writer.into_output()
    }

    fn project(elements: Vec<Element>) -> VideoProject {
        VideoProject {
            output_name: "out".into(),
            elements,
            groups: vec![],
            timeline: vec![],
        }
    }

    #[test]
    fn test_exact_aspect_branch() {
        let element = original(Some(PixelSize { width: 1920, height: 1080 }), vec![]);
        let code = compile(&element, &project(vec![element.clone()]));

        assert!(code.starts_with("# Load the video clip\nv1 = moviepy.VideoFileClip(\"a.mp4\")\n"));
        assert!(code.contains("# Resize the video clip\nv1 = v1.resized((1920, 1080))\n"));
        assert!(!code.contains("if "));
    }

    #[test]
    fn test_wider_aspect_branch() {
        let element = original(Some(PixelSize { width: 3840, height: 1080 }), vec![]);
        let code = compile(&element, &project(vec![element.clone()]));

        assert!(code.contains("v1 = v1.resized(width=1920)\nv1 = v1.with_position((\"center\", \"center\"))\n"));
    }

    #[test]
    fn test_taller_aspect_branch() {
        let element = original(Some(PixelSize { width: 1080, height: 1920 }), vec![]);
        let code = compile(&element, &project(vec![element.clone()]));

        assert!(code.contains("v1 = v1.resized(height=1080)\nv1 = v1.with_position((\"center\", \"center\"))\n"));
    }

    #[test]
    fn test_unknown_size_emits_runtime_check() {
        let element = original(None, vec![]);
        let code = compile(&element, &project(vec![element.clone()]));

        let expected = "\
if v1.size[0] / v1.size[1] == 16/9:
    v1 = v1.resized((1920, 1080))
else:
    if v1.size[0] / v1.size[1] > 16/9:
        v1 = v1.resized(width=1920)
    else:
        v1 = v1.resized(height=1080)
    v1 = v1.with_position((\"center\", \"center\"))
";
        assert!(code.contains(expected), "{code}");
    }

    #[test]
    fn test_extract_inherits_source_size() {
        let source = original(Some(PixelSize { width: 1280, height: 720 }), vec![]);
        let cut = Element::VideoExtract(VideoExtract {
            name: "cut".into(),
            source: "v1".into(),
            start: "00:02".parse().unwrap(),
            end: "01:10".parse().unwrap(),
            options: vec![],
        });
        let project = project(vec![source, cut.clone()]);

        let code = compile(&cut, &project);
        assert!(code.starts_with("# Extract a subclip from the video\ncut = v1.subclipped(2, 70)\n"));
        assert!(code.contains("cut = cut.resized((1920, 1080))\n"));
    }

    #[test]
    fn test_options_in_resolved_order() {
        let element = original(
            Some(PixelSize { width: 1920, height: 1080 }),
            vec![
                VideoOption::Resolution(ResolutionPreset::Webcam),
                VideoOption::Position(Position {
                    x: Some(AxisPosition::Aligned(HorizontalAlign::Right)),
                    y: Some(AxisPosition::Aligned(VerticalAlign::Bottom)),
                }),
                VideoOption::Brightness(1.5),
                VideoOption::Transition(Transition::FadeOut),
            ],
        );
        let code = compile(&element, &project(vec![element.clone()]));

        let resolution = code.find("v1 = v1.resized((640, 480))").unwrap();
        let position = code.find("v1 = v1.with_position((1280, 600))").unwrap();
        let brightness = code.find("MultiplyColor(factor=1.5)").unwrap();
        let fade = code.find("fade_out = moviepy.video.fx.CrossFadeOut(1)\nv1 = fade_out.apply(v1)").unwrap();
        assert!(resolution < position && position < brightness && brightness < fade);
    }

    #[test]
    fn test_position_defaults_to_origin() {
        let element = original(
            None,
            vec![VideoOption::Position(Position {
                x: Some(AxisPosition::Aligned(HorizontalAlign::Center)),
                y: None,
            })],
        );
        let code = compile(&element, &project(vec![element.clone()]));
        assert!(code.contains("v1 = v1.with_position((\"center\", 0))"));
    }

    #[test]
    fn test_effect_statements() {
        let element = original(
            Some(PixelSize { width: 1920, height: 1080 }),
            vec![
                VideoOption::Contrast(1.5),
                VideoOption::Saturation(0.5),
                VideoOption::Rotation(90.0),
                VideoOption::Opacity(0.75),
                VideoOption::Scale(0.5),
            ],
        );
        let code = compile(&element, &project(vec![element.clone()]));

        assert!(code.contains("LumContrast(lum=20, contrast=1.5, contrast_threshold=127)"));
        assert!(code.contains("Painting(saturation=0.5, black=0.0)"));
        assert!(code.contains("Rotate(angle=90, unit=\"deg\", resample=\"bicubic\", expand=True)"));
        assert!(code.contains("v1 = v1.with_opacity(0.75)"));
        assert!(code.contains("resize_effect = moviepy.video.fx.Resize(0.5)\nv1 = resize_effect.apply(v1)"));
    }
}
