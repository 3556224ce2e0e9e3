use tracing::{debug, warn};

use crate::{
    codegen::{python, ScriptWriter},
    config::GeneratorConfig,
    effects::{write_letter_animation, TextEffectRegistry},
    model::{
        Coordinate, Element, PixelSize, Position, TextAlign, TextEffectKind, TextOption,
        TextualElement,
    },
    resolve::ResolvedProject,
};

/// Option values of a text element, with unset ones left as `None`
#[derive(Debug, Default)]
struct TextSettings<'a> {
    font: Option<&'a str>,
    font_size: Option<u32>,
    font_color: Option<&'a str>,
    alignment: Option<TextAlign>,
    background: Option<&'a str>,
    size: Option<PixelSize>,
    position: Option<Position>,
    effect: Option<TextEffectKind>,
}

impl<'a> TextSettings<'a> {
    fn collect(options: &'a [TextOption]) -> Self {
        let mut settings = Self::default();
        for option in options {
            match option {
                TextOption::Font(font) => settings.font = Some(font.as_str()),
                TextOption::FontSize(size) => settings.font_size = Some(*size),
                TextOption::FontColor(color) => settings.font_color = Some(color.as_str()),
                TextOption::Alignment(align) => settings.alignment = Some(*align),
                TextOption::Background(color) => settings.background = Some(color.as_str()),
                TextOption::Size(size) => settings.size = Some(*size),
                TextOption::Position(position) => settings.position = Some(*position),
                TextOption::Effect(effect) => settings.effect = Some(*effect),
            }
        }
        settings
    }
}

fn align_keyword(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

/// Where a textual element is drawn
///
/// Free text defaults to the canvas center and aligns against its own
/// background size. Subtitles always sit centered at the configured offset.
pub fn text_position(
    element: &Element,
    options: &[TextOption],
    config: &GeneratorConfig,
) -> (Coordinate, Coordinate) {
    if element.is_subtitle() {
        return (Coordinate::Center, Coordinate::Pixels(config.subtitle_offset_y));
    }
    let settings = TextSettings::collect(options);
    let size = settings.size.unwrap_or(PixelSize {
        width: config.canvas.width,
        height: config.canvas.height,
    });
    match settings.position {
        Some(position) => {
            position.place(config.canvas, Some(size), (Coordinate::Center, Coordinate::Center))
        }
        None => (Coordinate::Center, Coordinate::Center),
    }
}

/// How long the letter animation of `name` runs
///
/// The longest of its placements, each counting the default text duration
/// when it sets none.
pub fn animation_duration(project: &ResolvedProject, name: &str, config: &GeneratorConfig) -> f64 {
    project
        .timeline()
        .iter()
        .filter(|placement| placement.element == name)
        .map(|placement| {
            placement
                .duration
                .map_or(config.default_text_duration, |d| d.as_seconds())
        })
        .fold(None, |longest: Option<f64>, d| Some(longest.map_or(d, |l| l.max(d))))
        .unwrap_or(config.default_text_duration)
}

/// Create one text clip, then animate it for `duration` seconds if it
/// carries an entry effect
pub fn compile_text(
    element: &Element,
    duration: f64,
    config: &GeneratorConfig,
    effects: &TextEffectRegistry,
    writer: &mut ScriptWriter,
) {
    let Some(TextualElement { name, text, options }) = element.as_textual() else {
        return;
    };
    let settings = TextSettings::collect(options);
    let size = settings.size.unwrap_or(PixelSize {
        width: config.canvas.width,
        height: config.canvas.height,
    });
    let position = text_position(element, options, config);

    if element.is_subtitle() {
        writer.comment("Load the subtitle clip");
    } else {
        writer.comment("Load the text clip");
    }
    writer.add_line(&format!("{} = moviepy.TextClip(", name));
    writer.indent();
    writer.add_line(&format!("text={},", python::string_literal(text)));
    if let Some(background) = settings.background {
        writer.add_line(&format!("bg_color={},", python::string_literal(background)));
    }
    writer.add_line(&format!(
        "font={},",
        python::string_literal(&config.resolve_font(settings.font))
    ));
    writer.add_line(&format!(
        "font_size={},",
        settings.font_size.unwrap_or(config.default_font_size)
    ));
    writer.add_line(&format!(
        "color={},",
        python::string_literal(settings.font_color.unwrap_or(&config.default_font_color))
    ));
    writer.add_line(&format!(
        "text_align={},",
        python::string_literal(align_keyword(settings.alignment.unwrap_or(TextAlign::Left)))
    ));
    writer.add_line(&format!("size={},", python::size_tuple(size)));
    writer.dedent();
    writer.add_line(&format!(").with_position({})", python::position_tuple(position)));

    if let Some(kind) = settings.effect {
        match effects.get_effect(kind.name()) {
            Some(effect) => {
                debug!("Animating {} with {}: {}", name, effect.name(), effect.description());
                write_letter_animation(effect.as_ref(), name, position, duration, config.canvas, writer)
            }
            None => warn!(
                "Text effect '{}' is not registered (available: {}), {} stays static",
                kind.name(),
                effects.available_effects().join(", "),
                name
            ),
        }
    }
    writer.blank_line();
    debug!("Compiled text element {}", name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::model::{AxisPosition, HorizontalAlign, VerticalAlign};

    fn text(options: Vec<TextOption>) -> Element {
        Element::Text(TextualElement {
            name: "title".into(),
            text: "Hello \"world\"".into(),
            options,
        })
    }

    fn compile(element: &Element, config: &GeneratorConfig) -> String {
        let mut writer = ScriptWriter::new();
        compile_text(element, config.default_text_duration, config, &TextEffectRegistry::new(), &mut writer);
        writer.into_output()
    }

    #[test]
    fn test_text_clip_defaults() {
        let code = compile(&text(vec![]), &GeneratorConfig::default());

        let expected = "\
# Load the text clip
title = moviepy.TextClip(
    text=\"Hello \\\"world\\\"\",
    font=\"Arial\",
    font_size=60,
    color=\"white\",
    text_align=\"left\",
    size=(1920, 1080),
).with_position((\"center\", \"center\"))

";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_text_clip_with_options() {
        let config = GeneratorConfig {
            platform: Platform::Windows,
            ..GeneratorConfig::default()
        };
        let element = text(vec![
            TextOption::Size(PixelSize { width: 800, height: 200 }),
            TextOption::Position(Position {
                x: Some(AxisPosition::Aligned(HorizontalAlign::Right)),
                y: Some(AxisPosition::Aligned(VerticalAlign::Top)),
            }),
            TextOption::Font("Verdana".into()),
            TextOption::FontSize(42),
            TextOption::FontColor("yellow".into()),
            TextOption::Background("black".into()),
            TextOption::Alignment(TextAlign::Center),
        ]);
        let code = compile(&element, &config);

        let bg = code.find("    bg_color=\"black\",\n").unwrap();
        let font = code.find("    font=\"C:/Windows/Fonts/Verdana.ttf\",\n").unwrap();
        assert!(bg < font);
        assert!(code.contains("    font_size=42,\n    color=\"yellow\",\n    text_align=\"center\",\n    size=(800, 200),\n"));
        assert!(code.contains(").with_position((1120, 0))\n"));
    }

    #[test]
    fn test_right_alignment_without_size_is_zero() {
        let element = text(vec![TextOption::Position(Position {
            x: Some(AxisPosition::Aligned(HorizontalAlign::Right)),
            y: None,
        })]);
        let code = compile(&element, &GeneratorConfig::default());
        assert!(code.contains(").with_position((0, \"center\"))\n"));
    }

    #[test]
    fn test_subtitle_is_pinned() {
        let element = Element::Subtitle(TextualElement {
            name: "s1".into(),
            text: "next part in 5 seconds".into(),
            options: vec![TextOption::Position(Position {
                x: Some(AxisPosition::Pixels(10)),
                y: Some(AxisPosition::Pixels(10)),
            })],
        });
        let code = compile(&element, &GeneratorConfig::default());

        assert!(code.starts_with("# Load the subtitle clip\ns1 = moviepy.TextClip(\n"));
        assert!(code.contains(").with_position((\"center\", 400))\n"));
    }

    #[test]
    fn test_entry_effect_appends_animation() {
        let element = text(vec![TextOption::Effect(TextEffectKind::Grouping)]);
        let code = compile(&element, &GeneratorConfig::default());

        let clip = code.find("title = moviepy.TextClip(").unwrap();
        let helpers = code.find("import numpy as np").unwrap();
        let animation = code.find("title_letters = find_letters(title.mask.get_frame(0))").unwrap();
        assert!(clip < helpers && helpers < animation);
        assert!(code.contains("def grouping(screenpos, i, nletters):"));
        assert!(code.contains(").subclipped(0, 5).with_position((\"center\", \"center\"))"));
    }

    #[test]
    fn test_unregistered_effect_leaves_text_static() {
        let element = text(vec![TextOption::Effect(TextEffectKind::Falling)]);
        let config = GeneratorConfig::default();
        let mut writer = ScriptWriter::new();
        compile_text(&element, 5.0, &config, &TextEffectRegistry::empty(), &mut writer);
        let code = writer.into_output();

        assert!(code.contains(").with_position((\"center\", \"center\"))\n"));
        assert!(!code.contains("find_letters"));
    }

    #[test]
    fn test_animation_follows_longest_placement() {
        let project = crate::resolve::resolve(
            &crate::model::VideoProject::from_json_str(
                r##"{
                    "output_name": "out",
                    "elements": [
                        {"type": "text", "name": "title", "text": "Hi",
                         "options": [{"kind": "effect", "value": "grouping"}]},
                        {"type": "text", "name": "note", "text": "Hey"}
                    ],
                    "timeline": [
                        {"name": "#1", "element": "title", "duration": "00:10"},
                        {"name": "#2", "element": "title"}
                    ]
                }"##,
            )
            .unwrap(),
        )
        .unwrap();
        let config = GeneratorConfig::default();

        assert_eq!(animation_duration(&project, "title", &config), 10.0);
        assert_eq!(animation_duration(&project, "note", &config), 5.0);
    }
}
