//! # Timeline Projection
//!
//! Display-oriented records, one per timeline placement, for a presentation
//! layer that draws the timeline. Built from the same resolved project the
//! generator consumes; field names follow the camelCase JSON the front end
//! reads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{GenerateError, Result},
    model::{Anchor, Element, Placement},
    resolve::{schedule, KnownDurations, ResolvedProject},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineElementInfo {
    pub name: String,
    pub layer: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_after_previous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_placement: Option<RelativePlacementInfo>,
    #[serde(flatten)]
    pub element: ElementInfo,
    /// Resolved start instant in seconds
    pub start_time: f64,
    /// Resolved end instant; equals `start_time` when the duration is unknown
    pub end_time: f64,
}

/// The referenced element, keyed by its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementInfo {
    VideoOriginalElement {
        name: String,
        #[serde(rename = "filePath")]
        file_path: String,
    },
    VideoExtractElement {
        name: String,
    },
    AudioOriginalElement {
        name: String,
        #[serde(rename = "filePath")]
        file_path: String,
    },
    AudioExtractElement {
        name: String,
    },
    TextElement {
        name: String,
        #[serde(rename = "isSubtitle")]
        is_subtitle: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativePlacementInfo {
    /// Signed offset in seconds
    pub offset: f64,
    pub place: Place,
    pub relative_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Place {
    Start,
    End,
}

impl From<Anchor> for Place {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Start => Place::Start,
            Anchor::End => Place::End,
        }
    }
}

impl From<&Element> for ElementInfo {
    fn from(element: &Element) -> Self {
        match element {
            Element::Video(video) => ElementInfo::VideoOriginalElement {
                name: video.name.clone(),
                file_path: video.path.clone(),
            },
            Element::VideoExtract(extract) => ElementInfo::VideoExtractElement {
                name: extract.name.clone(),
            },
            Element::Audio(audio) => ElementInfo::AudioOriginalElement {
                name: audio.name.clone(),
                file_path: audio.path.clone(),
            },
            Element::AudioExtract(extract) => ElementInfo::AudioExtractElement {
                name: extract.name.clone(),
            },
            Element::Text(text) | Element::Subtitle(text) => ElementInfo::TextElement {
                name: text.name.clone(),
                is_subtitle: element.is_subtitle(),
            },
        }
    }
}

/// Project every placement of `project`
///
/// `known` supplies the lengths of original media; placements after an
/// unmeasured original are still positioned, counting it as zero seconds.
pub fn timeline_infos(
    project: &ResolvedProject,
    known: &KnownDurations,
    default_text_duration: f64,
) -> Result<Vec<TimelineElementInfo>> {
    let spans = schedule(project.project(), known, default_text_duration)?;

    let mut infos = Vec::with_capacity(spans.len());
    for (index, (placement, span)) in project.timeline().iter().zip(&spans).enumerate() {
        let element = project.element_of(placement).ok_or_else(|| {
            GenerateError::MissingElementReference {
                placement: placement.name.clone(),
            }
        })?;

        let (start_at, start_after_previous, relative_placement) = match &placement.placement {
            Placement::Fixed { at } => (Some(at.as_seconds()), None, None),
            Placement::Relative { relative_to, anchor, offset } => (
                None,
                None,
                Some(RelativePlacementInfo {
                    offset: offset.map_or(0.0, |o| o.as_seconds()),
                    place: (*anchor).into(),
                    relative_to: relative_to.clone(),
                }),
            ),
            Placement::Implicit if index == 0 => (Some(0.0), None, None),
            Placement::Implicit => (None, Some(true), None),
        };

        infos.push(TimelineElementInfo {
            name: placement.name.clone(),
            layer: project.layer(index),
            duration: span.duration,
            start_at,
            start_after_previous,
            relative_placement,
            element: element.into(),
            start_time: span.start,
            end_time: span.end(),
        });
    }

    debug!("Projected {} timeline elements", infos.len());
    Ok(infos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VideoProject;
    use crate::resolve::resolve;
    use serde_json::json;

    fn resolved() -> ResolvedProject {
        resolve(
            &VideoProject::from_json_str(
                r##"{
                    "output_name": "out",
                    "elements": [
                        {"type": "video", "name": "v1", "path": "a.mp4"},
                        {"type": "video-extract", "name": "cut", "source": "v1", "start": "00:02", "end": "00:12"},
                        {"type": "subtitle", "name": "s1", "text": "hi"},
                        {"type": "audio", "name": "a1", "path": "m.mp3"}
                    ],
                    "timeline": [
                        {"name": "#1", "element": "v1"},
                        {"name": "#2", "element": "cut"},
                        {"name": "#3", "element": "s1",
                         "placement": {"relative_to": "#2", "anchor": "end", "offset": "+00:05"},
                         "layer": {"above": "#2"}},
                        {"name": "#4", "element": "a1", "placement": {"at": "00:30"}}
                    ]
                }"##,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_projection_with_known_durations() {
        let mut known = KnownDurations::new();
        known.insert("a.mp4".into(), 20.0);

        let infos = timeline_infos(&resolved(), &known, 5.0).unwrap();

        assert_eq!(infos[0].start_at, Some(0.0));
        assert_eq!(infos[0].duration, Some(20.0));
        assert_eq!(infos[1].start_after_previous, Some(true));
        assert_eq!((infos[1].start_time, infos[1].end_time), (20.0, 30.0));
        assert_eq!(infos[2].layer, 1);
        assert_eq!((infos[2].start_time, infos[2].end_time), (35.0, 40.0));
        assert_eq!(infos[3].start_at, Some(30.0));
        assert_eq!(infos[3].duration, None);
        assert_eq!(infos[3].end_time, 30.0);
    }

    #[test]
    fn test_projection_json_shape() {
        let infos = timeline_infos(&resolved(), &KnownDurations::new(), 5.0).unwrap();
        let value = serde_json::to_value(&infos).unwrap();

        assert_eq!(
            value[0],
            json!({
                "name": "#1",
                "layer": 0,
                "startAt": 0.0,
                "videoOriginalElement": {"name": "v1", "filePath": "a.mp4"},
                "startTime": 0.0,
                "endTime": 0.0
            })
        );
        assert_eq!(
            value[2]["relativePlacement"],
            json!({"offset": 5.0, "place": "END", "relativeTo": "#2"})
        );
        assert_eq!(value[2]["textElement"], json!({"name": "s1", "isSubtitle": true}));
        assert_eq!(value[1]["videoExtractElement"], json!({"name": "cut"}));
    }
}
