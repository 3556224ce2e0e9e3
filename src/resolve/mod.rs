//! # Resolution
//!
//! Turns a parsed [`VideoProject`] into a [`ResolvedProject`]: references
//! checked, options merged per element, stacking layers computed. The input
//! model is never modified.
//!
//! Start instants are resolved in two ways. The code generator expresses
//! them structurally (each statement refers to the clip it follows), while
//! [`placement::schedule`] computes numeric spans for the timeline view once
//! media durations are known.

pub mod layer;
pub mod options;
pub mod placement;

use tracing::{debug, info};

use crate::{
    error::{ReferenceKind, ResolveError, Result},
    model::{Element, TimelineElement, VideoProject},
};

pub use layer::{composition_order, resolve_layer, resolve_layers};
pub use options::{merge_options, resolve_all, resolve_element};
pub use placement::{check_acyclic, placement_duration, schedule, KnownDurations, Span};

/// A project ready for code generation
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProject {
    project: VideoProject,
    layers: Vec<i32>,
}

impl ResolvedProject {
    /// The project with every element carrying its resolved option list
    pub fn project(&self) -> &VideoProject {
        &self.project
    }

    pub fn output_name(&self) -> &str {
        &self.project.output_name
    }

    pub fn elements(&self) -> &[Element] {
        &self.project.elements
    }

    pub fn timeline(&self) -> &[TimelineElement] {
        &self.project.timeline
    }

    /// Layer of the placement at `index` in timeline order
    pub fn layer(&self, index: usize) -> i32 {
        self.layers.get(index).copied().unwrap_or(0)
    }

    pub fn layers(&self) -> &[i32] {
        &self.layers
    }

    /// Placements bottom to top, the order clips enter a composite
    pub fn by_layer(&self) -> impl Iterator<Item = &TimelineElement> {
        composition_order(&self.layers)
            .into_iter()
            .map(move |index| &self.project.timeline[index])
    }

    /// Element scheduled by `placement`
    pub fn element_of(&self, placement: &TimelineElement) -> Option<&Element> {
        self.project.element(&placement.element)
    }
}

/// Check that every name a project refers to exists
pub fn check_references(project: &VideoProject) -> std::result::Result<(), ResolveError> {
    for element in &project.elements {
        if let Some(source) = element.extract_source() {
            if project.element(source).is_none() {
                return Err(ResolveError::MissingReference {
                    kind: ReferenceKind::ExtractSource,
                    name: source.to_string(),
                });
            }
        }
    }

    for placement in &project.timeline {
        if project.element(&placement.element).is_none() {
            return Err(ResolveError::MissingReference {
                kind: ReferenceKind::Element,
                name: placement.element.clone(),
            });
        }
        if let Some(target) = placement.relative_target() {
            if project.placement(target).is_none() {
                return Err(ResolveError::MissingReference {
                    kind: ReferenceKind::Placement,
                    name: target.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Resolve a parsed project
///
/// Fails on the first dangling reference or cyclic placement/layer chain;
/// nothing partial is returned.
pub fn resolve(project: &VideoProject) -> Result<ResolvedProject> {
    info!("Resolving project {}", project.output_name);

    check_references(project)?;
    check_acyclic(project)?;
    let layers = resolve_layers(project)?;
    debug!("Layers: {:?}", layers);

    let elements = resolve_all(project);
    let resolved = VideoProject {
        elements,
        ..project.clone()
    };

    Ok(ResolvedProject {
        project: resolved,
        layers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompilerError;
    use crate::model::{LayerRelation, Placement, VideoOption, VideoOriginal};

    fn sample() -> VideoProject {
        VideoProject::from_json_str(
            r##"{
                "output_name": "out",
                "elements": [
                    {"type": "video", "name": "v1", "path": "a.mp4",
                     "options": [{"kind": "opacity", "value": 0.5}]},
                    {"type": "text", "name": "t1", "text": "Hello"}
                ],
                "groups": [
                    {"type": "video", "name": "g", "elements": ["v1"],
                     "options": [{"kind": "opacity", "value": 0.1}, {"kind": "scale", "value": 2}]}
                ],
                "timeline": [
                    {"name": "#1", "element": "v1"},
                    {"name": "#2", "element": "t1", "layer": {"under": "#1"}}
                ]
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_merges_options_and_layers() {
        let project = sample();
        let resolved = resolve(&project).unwrap();

        match &resolved.elements()[0] {
            Element::Video(VideoOriginal { options, .. }) => {
                assert_eq!(options, &vec![VideoOption::Opacity(0.5), VideoOption::Scale(2.0)]);
            }
            other => panic!("unexpected element {other:?}"),
        }
        assert_eq!(resolved.layers(), &[0, -1]);
        let order: Vec<&str> = resolved.by_layer().map(|te| te.name.as_str()).collect();
        assert_eq!(order, vec!["#2", "#1"]);
        // input untouched
        assert_eq!(project.elements[0], sample().elements[0]);
    }

    #[test]
    fn test_missing_element_reference() {
        let mut project = sample();
        project.timeline[0].element = "ghost".into();

        let err = resolve(&project).unwrap_err();
        assert!(matches!(
            err,
            CompilerError::Resolve(ResolveError::MissingReference {
                kind: ReferenceKind::Element,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_relative_target() {
        let mut project = sample();
        project.timeline[1].placement = Placement::Relative {
            relative_to: "#9".into(),
            anchor: crate::model::Anchor::End,
            offset: None,
        };
        assert!(resolve(&project).is_err());
    }

    #[test]
    fn test_layer_cycle_fails_resolution() {
        let mut project = sample();
        project.timeline[0].layer = Some(LayerRelation::Above("#2".into()));
        project.timeline[1].layer = Some(LayerRelation::Above("#1".into()));

        let err = resolve(&project).unwrap_err();
        assert!(err.to_string().contains("Cyclic relation"));
    }
}
