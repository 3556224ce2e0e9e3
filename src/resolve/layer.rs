use crate::{
    error::{ReferenceKind, ResolveError},
    model::{TimelineElement, VideoProject},
};

/// Stacking layer of one placement
///
/// A placement without a relation sits on layer 0. `above X` is one more than
/// X's layer and `under X` one less, following the chain as deep as it goes.
/// A chain that returns to a placement already visited is rejected.
pub fn resolve_layer(project: &VideoProject, placement: &TimelineElement) -> Result<i32, ResolveError> {
    let mut layer = 0;
    let mut path = vec![placement.name.clone()];
    let mut current = placement;

    while let Some(relation) = &current.layer {
        layer += relation.step();
        let (_, next) = project
            .placement(relation.target())
            .ok_or_else(|| ResolveError::MissingReference {
                kind: ReferenceKind::Placement,
                name: relation.target().to_string(),
            })?;

        let looped = path.iter().any(|name| name == &next.name);
        path.push(next.name.clone());
        if looped {
            return Err(ResolveError::CyclicRelation { path });
        }
        current = next;
    }

    Ok(layer)
}

/// Layers for every placement, aligned with the project's timeline order
pub fn resolve_layers(project: &VideoProject) -> Result<Vec<i32>, ResolveError> {
    project
        .timeline
        .iter()
        .map(|placement| resolve_layer(project, placement))
        .collect()
}

/// Timeline indices sorted by ascending layer, ties kept in declaration order
pub fn composition_order(layers: &[i32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layers.len()).collect();
    order.sort_by_key(|&index| layers[index]);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayerRelation, Placement};

    fn placement(name: &str, layer: Option<LayerRelation>) -> TimelineElement {
        TimelineElement {
            name: name.into(),
            element: "v1".into(),
            placement: Placement::Implicit,
            duration: None,
            layer,
        }
    }

    fn project(timeline: Vec<TimelineElement>) -> VideoProject {
        VideoProject {
            output_name: "out".into(),
            elements: vec![],
            groups: vec![],
            timeline,
        }
    }

    #[test]
    fn test_layer_chain() {
        let project = project(vec![
            placement("P", None),
            placement("Q", Some(LayerRelation::Above("P".into()))),
            placement("R", Some(LayerRelation::Above("Q".into()))),
        ]);

        assert_eq!(resolve_layers(&project).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_under_goes_negative() {
        let project = project(vec![
            placement("#1", None),
            placement("#2", Some(LayerRelation::Under("#1".into()))),
            placement("#3", Some(LayerRelation::Above("#2".into()))),
        ]);

        assert_eq!(resolve_layers(&project).unwrap(), vec![0, -1, 0]);
    }

    #[test]
    fn test_cycle_is_reported_with_path() {
        let project = project(vec![
            placement("#1", Some(LayerRelation::Above("#2".into()))),
            placement("#2", Some(LayerRelation::Above("#1".into()))),
        ]);

        let err = resolve_layer(&project, &project.timeline[0]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicRelation {
                path: vec!["#1".into(), "#2".into(), "#1".into()]
            }
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let project = project(vec![placement("#1", Some(LayerRelation::Under("#1".into())))]);
        assert!(matches!(
            resolve_layers(&project),
            Err(ResolveError::CyclicRelation { .. })
        ));
    }

    #[test]
    fn test_missing_layer_target() {
        let project = project(vec![placement("#1", Some(LayerRelation::Above("#7".into())))]);
        assert_eq!(
            resolve_layers(&project),
            Err(ResolveError::MissingReference {
                kind: ReferenceKind::Placement,
                name: "#7".into()
            })
        );
    }

    #[test]
    fn test_composition_order_is_stable() {
        assert_eq!(composition_order(&[1, 0, -1, 0]), vec![2, 1, 3, 0]);
    }
}
