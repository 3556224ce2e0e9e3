use serde::{Deserialize, Serialize};

use crate::model::{AudioOption, PixelSize, TextOption, Timestamp, VideoOption};

/// A named media or text source declared in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Video(VideoOriginal),
    VideoExtract(VideoExtract),
    Audio(AudioOriginal),
    AudioExtract(AudioExtract),
    Text(TextualElement),
    Subtitle(TextualElement),
}

/// Coarse grouping of element kinds used by the generator's passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    Video,
    Audio,
    Textual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoOriginal {
    pub name: String,
    pub path: String,
    /// Intrinsic frame size, when the front end already probed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PixelSize>,
    #[serde(default)]
    pub options: Vec<VideoOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoExtract {
    pub name: String,
    /// Name of the video element the extract is cut from
    pub source: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub options: Vec<VideoOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOriginal {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub options: Vec<AudioOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioExtract {
    pub name: String,
    pub source: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub options: Vec<AudioOption>,
}

/// Free text or a subtitle; which one is decided by the enclosing [`Element`] variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextualElement {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<TextOption>,
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::Video(v) => &v.name,
            Element::VideoExtract(v) => &v.name,
            Element::Audio(a) => &a.name,
            Element::AudioExtract(a) => &a.name,
            Element::Text(t) | Element::Subtitle(t) => &t.name,
        }
    }

    pub fn category(&self) -> ElementCategory {
        match self {
            Element::Video(_) | Element::VideoExtract(_) => ElementCategory::Video,
            Element::Audio(_) | Element::AudioExtract(_) => ElementCategory::Audio,
            Element::Text(_) | Element::Subtitle(_) => ElementCategory::Textual,
        }
    }

    /// Video and text elements end up in the visual composite
    pub fn is_visual(&self) -> bool {
        matches!(self.category(), ElementCategory::Video | ElementCategory::Textual)
    }

    pub fn is_textual(&self) -> bool {
        self.category() == ElementCategory::Textual
    }

    pub fn is_subtitle(&self) -> bool {
        matches!(self, Element::Subtitle(_))
    }

    /// Extract source, if this element is cut from another one
    pub fn extract_source(&self) -> Option<&str> {
        match self {
            Element::VideoExtract(v) => Some(&v.source),
            Element::AudioExtract(a) => Some(&a.source),
            _ => None,
        }
    }

    /// Length known from the program alone: `end - start` for extracts
    ///
    /// Originals need an external lookup; text length comes from its placement.
    pub fn intrinsic_duration(&self) -> Option<f64> {
        match self {
            Element::VideoExtract(v) => Some(v.end.as_seconds() - v.start.as_seconds()),
            Element::AudioExtract(a) => Some(a.end.as_seconds() - a.start.as_seconds()),
            _ => None,
        }
    }

    /// Source file for originals
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Element::Video(v) => Some(&v.path),
            Element::Audio(a) => Some(&a.path),
            _ => None,
        }
    }

    pub fn as_textual(&self) -> Option<&TextualElement> {
        match self {
            Element::Text(t) | Element::Subtitle(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_json_tags() {
        let json = r#"[
            {"type": "video", "name": "v1", "path": "a.mp4"},
            {"type": "video-extract", "name": "cut", "source": "v1", "start": "00:02", "end": "00:10"},
            {"type": "subtitle", "name": "s1", "text": "hi"}
        ]"#;
        let elements: Vec<Element> = serde_json::from_str(json).unwrap();

        assert_eq!(elements[0].category(), ElementCategory::Video);
        assert_eq!(elements[0].file_path(), Some("a.mp4"));
        assert_eq!(elements[1].intrinsic_duration(), Some(8.0));
        assert_eq!(elements[1].extract_source(), Some("v1"));
        assert!(elements[2].is_subtitle());
        assert!(elements[2].is_visual());
    }
}
