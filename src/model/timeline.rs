use serde::{Deserialize, Serialize};

use crate::model::{SignedOffset, Timestamp};

/// A named scheduling of one element onto the output timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineElement {
    pub name: String,
    /// Name of the scheduled element
    pub element: String,
    #[serde(default, skip_serializing_if = "Placement::is_implicit")]
    pub placement: Placement,
    /// Display length; only meaningful for textual elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerRelation>,
}

/// The three mutually exclusive ways a placement's start is determined
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    /// Absolute start
    Fixed { at: Timestamp },
    /// Start or end of another placement, shifted by an optional offset
    Relative {
        relative_to: String,
        anchor: Anchor,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<SignedOffset>,
    },
    /// Origin for the first placement, right after the previous one otherwise
    #[default]
    Implicit,
}

impl Placement {
    pub fn is_implicit(&self) -> bool {
        matches!(self, Placement::Implicit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    End,
}

/// Stacking relation to another placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRelation {
    Above(String),
    Under(String),
}

impl LayerRelation {
    pub fn target(&self) -> &str {
        match self {
            LayerRelation::Above(target) | LayerRelation::Under(target) => target,
        }
    }

    /// +1 for `above`, -1 for `under`
    pub fn step(&self) -> i32 {
        match self {
            LayerRelation::Above(_) => 1,
            LayerRelation::Under(_) => -1,
        }
    }
}

impl TimelineElement {
    /// Placement whose start this one depends on, if any
    pub fn relative_target(&self) -> Option<&str> {
        match &self.placement {
            Placement::Relative { relative_to, .. } => Some(relative_to),
            _ => None,
        }
    }
}
