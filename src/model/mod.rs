//! # Program Model
//!
//! In-memory form of a parsed VideoML project: elements, options (attached
//! to elements or to named groups) and timeline placements.
//!
//! The model is pure data. It is produced by an external front end (here:
//! its JSON serialization) and treated as immutable afterwards; resolution
//! builds new values instead of rewriting it.

pub mod canvas;
pub mod element;
pub mod option;
pub mod project;
pub mod time;
pub mod timeline;

pub use canvas::{AspectFit, Canvas};
pub use element::{
    AudioExtract, AudioOriginal, Element, ElementCategory, TextualElement, VideoExtract,
    VideoOriginal,
};
pub use option::{
    AudioOption, AudioOptionKind, AxisPosition, CategoryOption, Coordinate, HorizontalAlign,
    PixelSize, Position, ResolutionPreset, StereoVolume, TextAlign, TextEffectKind, TextOption,
    TextOptionKind, Transition, VerticalAlign, VideoOption, VideoOptionKey, VideoOptionKind,
};
pub use project::{Group, GroupOption, VideoProject};
pub use time::{Sign, SignedOffset, Timestamp};
pub use timeline::{Anchor, LayerRelation, Placement, TimelineElement};
