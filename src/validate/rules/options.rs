use std::sync::OnceLock;

use regex::Regex;

use crate::model::{
    AudioOption, Element, GroupOption, PixelSize, TextOption, Timestamp, VideoOption, VideoProject,
};
use crate::validate::rules::ValidationRule;
use crate::validate::Diagnostic;

const KNOWN_FONTS: &[&str] = &[
    "Arial",
    "Times New Roman",
    "Courier New",
    "Verdana",
    "Georgia",
    "Palatino Linotype",
    "Book Antiqua",
    "Comic Sans MS",
    "Trebuchet MS",
    "Arial Black",
    "Impact",
];

const KNOWN_COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "black", "white", "gray", "purple", "orange", "pink", "brown",
];

const MAX_SUBTITLE_CHARS: usize = 100;
const MAX_FONT_SIZE: u32 = 128;
const MAX_SIZE: PixelSize = PixelSize { width: 1920, height: 1080 };

/// Option values within the ranges the target effects accept
pub struct OptionRangeRule;

impl ValidationRule for OptionRangeRule {
    fn name(&self) -> &'static str {
        "option-range"
    }

    fn description(&self) -> &'static str {
        "Option values and extract bounds must be in range"
    }

    fn check(&self, project: &VideoProject) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for element in &project.elements {
            let name = element.name();
            match element {
                Element::Video(video) => check_video_options(&video.options, name, &mut diagnostics),
                Element::VideoExtract(extract) => {
                    check_bounds(extract.start, extract.end, name, &mut diagnostics);
                    check_video_options(&extract.options, name, &mut diagnostics);
                }
                Element::Audio(audio) => check_audio_options(&audio.options, name, &mut diagnostics),
                Element::AudioExtract(extract) => {
                    check_bounds(extract.start, extract.end, name, &mut diagnostics);
                    check_audio_options(&extract.options, name, &mut diagnostics);
                }
                Element::Text(text) => check_text_options(&text.options, false, name, &mut diagnostics),
                Element::Subtitle(text) => {
                    if text.text.chars().count() > MAX_SUBTITLE_CHARS {
                        diagnostics.push(
                            Diagnostic::warning(
                                "subtitle-length",
                                "Subtitle length is long, it is recommended to be less than 100 characters",
                            )
                            .on(name),
                        );
                    }
                    check_text_options(&text.options, true, name, &mut diagnostics);
                }
            }
        }

        for group in &project.groups {
            let name = group.name();
            match group {
                GroupOption::Video(g) => check_video_options(&g.options, name, &mut diagnostics),
                GroupOption::Audio(g) => check_audio_options(&g.options, name, &mut diagnostics),
                GroupOption::Text(g) => {
                    let reaches_subtitle = g
                        .elements
                        .iter()
                        .any(|member| project.element(member).is_some_and(Element::is_subtitle));
                    check_text_options(&g.options, reaches_subtitle, name, &mut diagnostics);
                }
            }
        }

        diagnostics
    }
}

fn out_of_range(value: f64, min: f64, max: f64) -> bool {
    !(min..=max).contains(&value)
}

fn check_bounds(start: Timestamp, end: Timestamp, target: &str, diagnostics: &mut Vec<Diagnostic>) {
    if start.as_seconds() >= end.as_seconds() {
        diagnostics.push(Diagnostic::error("extract-bounds", "Start time must be before end time").on(target));
    }
}

fn check_video_options(options: &[VideoOption], target: &str, diagnostics: &mut Vec<Diagnostic>) {
    for option in options {
        let error = match option {
            VideoOption::Brightness(v) if out_of_range(*v, -5.0, 5.0) => {
                Some("Brightness must be between -5 and 5")
            }
            VideoOption::Contrast(v) if out_of_range(*v, 0.0, 5.0) => Some("Contrast must be between 0 and 5"),
            VideoOption::Saturation(v) if out_of_range(*v, -1.0, 1.0) => {
                Some("Saturation must be between -1 and 1. For example, 0.5 is no change")
            }
            VideoOption::Opacity(v) if out_of_range(*v, 0.0, 1.0) => Some("Opacity must be between 0 and 1"),
            VideoOption::Scale(v) if *v <= 0.0 || out_of_range(*v, 0.0, 3.0) => {
                Some("Scale is a factor. It must be above 0 and at most 3 (300%)")
            }
            VideoOption::Size(size) => {
                check_video_size(*size, target, diagnostics);
                None
            }
            _ => None,
        };
        if let Some(message) = error {
            diagnostics.push(Diagnostic::error("option-range", message).on(target));
        }
    }
}

fn check_video_size(size: PixelSize, target: &str, diagnostics: &mut Vec<Diagnostic>) {
    if size.width == 0 || size.height == 0 || size.width > MAX_SIZE.width || size.height > MAX_SIZE.height {
        diagnostics.push(
            Diagnostic::error(
                "option-range",
                "Resolution must be at most FullHD (1920x1080) and cannot be empty",
            )
            .on(target),
        );
        return;
    }

    let ratio = f64::from(size.width) / f64::from(size.height);
    if (ratio - 16.0 / 9.0).abs() > 0.01 {
        diagnostics.push(
            Diagnostic::warning(
                "aspect-ratio",
                "The resolution is not in 16:9 ratio, which is not optimal for most displays.",
            )
            .on(target),
        );
    }
}

fn check_audio_options(options: &[AudioOption], target: &str, diagnostics: &mut Vec<Diagnostic>) {
    for option in options {
        let error = match option {
            AudioOption::Volume(v) if out_of_range(*v, 0.0, 2.0) => Some("Volume must be between 0 and 2"),
            AudioOption::StereoVolume(stereo)
                if out_of_range(stereo.left, 0.0, 2.0) || out_of_range(stereo.right, 0.0, 2.0) =>
            {
                Some("Stereo volume must be between 0 and 2 on each channel")
            }
            AudioOption::FadeIn(d) if d.is_nan() || *d <= 0.0 => Some("Fade in time must be positive"),
            AudioOption::FadeOut(d) if d.is_nan() || *d <= 0.0 => Some("Fade out time must be positive"),
            _ => None,
        };
        if let Some(message) = error {
            diagnostics.push(Diagnostic::error("option-range", message).on(target));
        }
    }
}

fn is_color(value: &str) -> bool {
    static HEX_COLOR: OnceLock<Option<Regex>> = OnceLock::new();
    let hex = HEX_COLOR
        .get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").ok())
        .as_ref();

    KNOWN_COLORS.contains(&value.to_lowercase().as_str()) || hex.is_some_and(|re| re.is_match(value))
}

fn check_text_options(
    options: &[TextOption],
    subtitle: bool,
    target: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for option in options {
        match option {
            TextOption::Position(_) if subtitle => diagnostics.push(
                Diagnostic::error("subtitle-position", "Position is not allowed in subtitle elements").on(target),
            ),
            TextOption::FontSize(size) if *size > MAX_FONT_SIZE => diagnostics.push(
                Diagnostic::error("option-range", "Font size must be between 0 and 128").on(target),
            ),
            TextOption::Font(font) if !KNOWN_FONTS.contains(&font.as_str()) => diagnostics.push(
                Diagnostic::warning(
                    "unknown-font",
                    format!("Font '{}' may not be installed where the script runs", font),
                )
                .on(target),
            ),
            TextOption::FontColor(color) | TextOption::Background(color) if !is_color(color) => {
                diagnostics.push(
                    Diagnostic::error(
                        "color",
                        format!("Color '{}' must be a color name or a #rrggbb value", color),
                    )
                    .on(target),
                )
            }
            _ => {}
        }
    }
}
