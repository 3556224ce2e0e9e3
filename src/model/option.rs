use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::model::Canvas;

/// Common surface of the three option categories, used by the merge step
///
/// `Kind` is the option's tag. `Key` is what de-duplication compares; it is
/// the kind for every option except video transitions, where the fade
/// direction is part of the key so a fade-in and a fade-out can coexist.
pub trait CategoryOption: Clone + Debug {
    type Kind: Copy + Eq + Hash + Debug;
    type Key: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;

    fn dedup_key(&self) -> Self::Key;

    /// Position of a kind in the category's presentation order, if it has one
    fn canonical_rank(kind: Self::Kind) -> Option<usize>;
}

// ==========================================
// VIDEO OPTIONS
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum VideoOption {
    Brightness(f64),
    Scale(f64),
    Opacity(f64),
    Contrast(f64),
    Saturation(f64),
    Rotation(f64),
    Transition(Transition),
    Resolution(ResolutionPreset),
    Size(PixelSize),
    Position(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoOptionKind {
    Brightness,
    Scale,
    Opacity,
    Contrast,
    Saturation,
    Rotation,
    Transition,
    Resolution,
    Size,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoOptionKey {
    Kind(VideoOptionKind),
    Transition(Transition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    FadeIn,
    FadeOut,
}

/// Named resolutions accepted in place of explicit pixel sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPreset {
    Webcam,
}

impl ResolutionPreset {
    pub fn size(&self) -> PixelSize {
        match self {
            ResolutionPreset::Webcam => PixelSize { width: 640, height: 480 },
        }
    }
}

impl CategoryOption for VideoOption {
    type Kind = VideoOptionKind;
    type Key = VideoOptionKey;

    fn kind(&self) -> VideoOptionKind {
        match self {
            VideoOption::Brightness(_) => VideoOptionKind::Brightness,
            VideoOption::Scale(_) => VideoOptionKind::Scale,
            VideoOption::Opacity(_) => VideoOptionKind::Opacity,
            VideoOption::Contrast(_) => VideoOptionKind::Contrast,
            VideoOption::Saturation(_) => VideoOptionKind::Saturation,
            VideoOption::Rotation(_) => VideoOptionKind::Rotation,
            VideoOption::Transition(_) => VideoOptionKind::Transition,
            VideoOption::Resolution(_) => VideoOptionKind::Resolution,
            VideoOption::Size(_) => VideoOptionKind::Size,
            VideoOption::Position(_) => VideoOptionKind::Position,
        }
    }

    fn dedup_key(&self) -> VideoOptionKey {
        match self {
            VideoOption::Transition(transition) => VideoOptionKey::Transition(*transition),
            // a preset is one way of writing a size; both compete for one slot
            VideoOption::Resolution(_) => VideoOptionKey::Kind(VideoOptionKind::Size),
            other => VideoOptionKey::Kind(other.kind()),
        }
    }

    fn canonical_rank(kind: VideoOptionKind) -> Option<usize> {
        match kind {
            VideoOptionKind::Resolution => Some(0),
            VideoOptionKind::Size => Some(1),
            VideoOptionKind::Position => Some(2),
            VideoOptionKind::Brightness
            | VideoOptionKind::Scale
            | VideoOptionKind::Opacity
            | VideoOptionKind::Contrast
            | VideoOptionKind::Saturation
            | VideoOptionKind::Rotation
            | VideoOptionKind::Transition => None,
        }
    }
}

// ==========================================
// AUDIO OPTIONS
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AudioOption {
    Volume(f64),
    FadeIn(f64),
    FadeOut(f64),
    StereoVolume(StereoVolume),
    Normalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoVolume {
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioOptionKind {
    Volume,
    FadeIn,
    FadeOut,
    StereoVolume,
    Normalize,
}

impl CategoryOption for AudioOption {
    type Kind = AudioOptionKind;
    type Key = AudioOptionKind;

    fn kind(&self) -> AudioOptionKind {
        match self {
            AudioOption::Volume(_) => AudioOptionKind::Volume,
            AudioOption::FadeIn(_) => AudioOptionKind::FadeIn,
            AudioOption::FadeOut(_) => AudioOptionKind::FadeOut,
            AudioOption::StereoVolume(_) => AudioOptionKind::StereoVolume,
            AudioOption::Normalize => AudioOptionKind::Normalize,
        }
    }

    fn dedup_key(&self) -> AudioOptionKind {
        self.kind()
    }

    fn canonical_rank(kind: AudioOptionKind) -> Option<usize> {
        match kind {
            AudioOptionKind::Volume => Some(0),
            AudioOptionKind::FadeIn => Some(1),
            AudioOptionKind::FadeOut => Some(2),
            AudioOptionKind::StereoVolume => Some(3),
            AudioOptionKind::Normalize => None,
        }
    }
}

// ==========================================
// TEXT OPTIONS
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum TextOption {
    Font(String),
    FontSize(u32),
    FontColor(String),
    Alignment(TextAlign),
    Background(String),
    Size(PixelSize),
    Position(Position),
    Effect(TextEffectKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Letter-by-letter entry animations for text clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffectKind {
    Grouping,
    Falling,
}

impl TextEffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            TextEffectKind::Grouping => "grouping",
            TextEffectKind::Falling => "falling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextOptionKind {
    Font,
    FontSize,
    FontColor,
    Alignment,
    Background,
    Size,
    Position,
    Effect,
}

impl CategoryOption for TextOption {
    type Kind = TextOptionKind;
    type Key = TextOptionKind;

    fn kind(&self) -> TextOptionKind {
        match self {
            TextOption::Font(_) => TextOptionKind::Font,
            TextOption::FontSize(_) => TextOptionKind::FontSize,
            TextOption::FontColor(_) => TextOptionKind::FontColor,
            TextOption::Alignment(_) => TextOptionKind::Alignment,
            TextOption::Background(_) => TextOptionKind::Background,
            TextOption::Size(_) => TextOptionKind::Size,
            TextOption::Position(_) => TextOptionKind::Position,
            TextOption::Effect(_) => TextOptionKind::Effect,
        }
    }

    fn dedup_key(&self) -> TextOptionKind {
        self.kind()
    }

    fn canonical_rank(kind: TextOptionKind) -> Option<usize> {
        match kind {
            TextOptionKind::Size => Some(0),
            TextOptionKind::Position => Some(1),
            TextOptionKind::Font
            | TextOptionKind::FontSize
            | TextOptionKind::FontColor
            | TextOptionKind::Alignment
            | TextOptionKind::Background
            | TextOptionKind::Effect => None,
        }
    }
}

// ==========================================
// SHARED VISUAL OPTIONS
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// One axis of a position: either a pixel coordinate or an alignment keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisPosition<A> {
    Pixels(i32),
    Aligned(A),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisPosition<HorizontalAlign>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisPosition<VerticalAlign>>,
}

/// A concrete coordinate for the target library: pixels or its `"center"` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    Pixels(i64),
    Center,
}

impl Position {
    /// Turn alignment keywords into coordinates for an element of `size` on `canvas`
    ///
    /// Axes left unset keep the matching entry of `fallback`. A right/bottom
    /// alignment of an element with unknown size puts its origin at the canvas edge.
    pub fn place(
        &self,
        canvas: Canvas,
        size: Option<PixelSize>,
        fallback: (Coordinate, Coordinate),
    ) -> (Coordinate, Coordinate) {
        let width = size.map_or(0, |s| i64::from(s.width));
        let height = size.map_or(0, |s| i64::from(s.height));

        let x = match self.x {
            None => fallback.0,
            Some(AxisPosition::Pixels(px)) => Coordinate::Pixels(i64::from(px)),
            Some(AxisPosition::Aligned(HorizontalAlign::Left)) => Coordinate::Pixels(0),
            Some(AxisPosition::Aligned(HorizontalAlign::Center)) => Coordinate::Center,
            Some(AxisPosition::Aligned(HorizontalAlign::Right)) => {
                Coordinate::Pixels(i64::from(canvas.width) - width)
            }
        };
        let y = match self.y {
            None => fallback.1,
            Some(AxisPosition::Pixels(px)) => Coordinate::Pixels(i64::from(px)),
            Some(AxisPosition::Aligned(VerticalAlign::Top)) => Coordinate::Pixels(0),
            Some(AxisPosition::Aligned(VerticalAlign::Center)) => Coordinate::Center,
            Some(AxisPosition::Aligned(VerticalAlign::Bottom)) => {
                Coordinate::Pixels(i64::from(canvas.height) - height)
            }
        };
        (x, y)
    }
}
