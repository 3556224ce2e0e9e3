use crate::error::ResolveError;
use crate::model::{Placement, VideoProject};
use crate::resolve::{check_acyclic, resolve_layers};
use crate::validate::rules::ValidationRule;
use crate::validate::Diagnostic;

/// Placement rules: an unanchored first clip, backward-only relative
/// placement, durations on text only, and no looping chains
pub struct TimelineRule;

impl ValidationRule for TimelineRule {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn description(&self) -> &'static str {
        "Timeline placements must form a schedulable sequence"
    }

    fn check(&self, project: &VideoProject) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some(first) = project.timeline.first() {
            if !first.placement.is_implicit() {
                diagnostics.push(
                    Diagnostic::error(
                        "first-placement",
                        "First element in timeline must not have time parameters, it will be the starting point of the video (00:00)",
                    )
                    .on(&first.name),
                );
            }
        }

        for (index, placement) in project.timeline.iter().enumerate() {
            if let Placement::Relative { relative_to, .. } = &placement.placement {
                if project.placement(relative_to).is_some_and(|(target, _)| target > index) {
                    diagnostics.push(
                        Diagnostic::error(
                            "future-relative-placement",
                            "You cannot place relatively this element to a future element",
                        )
                        .on(&placement.name),
                    );
                }
            }

            let textual = project.element(&placement.element).map(|e| e.is_textual());
            if placement.duration.is_some() && textual == Some(false) {
                diagnostics.push(
                    Diagnostic::error("textual-duration", "Only textual elements can have duration")
                        .on(&placement.name),
                );
            }
        }

        // dangling references are reported by the reference rule
        if let Err(ResolveError::CyclicRelation { path }) = check_acyclic(project) {
            diagnostics.push(recursion(path, "relative-recursion"));
        }
        if let Err(ResolveError::CyclicRelation { path }) = resolve_layers(project) {
            diagnostics.push(recursion(path, "layer-recursion"));
        }

        diagnostics
    }
}

fn recursion(path: Vec<String>, rule: &str) -> Diagnostic {
    let target = path.first().cloned().unwrap_or_default();
    Diagnostic::error(rule, format!("Infinite recursion detected. Path: {}", path.join(" -> "))).on(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(json: &str) -> Vec<Diagnostic> {
        TimelineRule.check(&VideoProject::from_json_str(json).unwrap())
    }

    #[test]
    fn test_sequential_timeline_passes() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [
                    {"type": "video", "name": "v1", "path": "a.mp4"},
                    {"type": "subtitle", "name": "s1", "text": "hello"}
                ],
                "timeline": [
                    {"name": "#1", "element": "v1"},
                    {"name": "#2", "element": "s1", "placement": {"relative_to": "#1", "anchor": "start"},
                     "duration": "00:03", "layer": {"above": "#1"}},
                    {"name": "#3", "element": "v1", "placement": {"at": "00:30"}}
                ]
            }"##,
        );
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_first_placement_has_no_time_parameters() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [{"type": "video", "name": "v1", "path": "a.mp4"}],
                "timeline": [{"name": "#1", "element": "v1", "placement": {"at": "00:02"}}]
            }"##,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "first-placement");
    }

    #[test]
    fn test_relative_to_future_and_duration_on_video() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [{"type": "video", "name": "v1", "path": "a.mp4"}],
                "timeline": [
                    {"name": "#1", "element": "v1"},
                    {"name": "#2", "element": "v1", "placement": {"relative_to": "#3", "anchor": "end"}},
                    {"name": "#3", "element": "v1", "placement": {"at": "00:10"}, "duration": "00:02"}
                ]
            }"##,
        );
        let rules: Vec<&str> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(rules, vec!["future-relative-placement", "textual-duration"]);
        assert_eq!(diagnostics[0].target.as_deref(), Some("#2"));
        assert_eq!(diagnostics[1].target.as_deref(), Some("#3"));
    }

    #[test]
    fn test_relative_cycle() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [{"type": "video", "name": "v1", "path": "a.mp4"}],
                "timeline": [
                    {"name": "#1", "element": "v1"},
                    {"name": "#2", "element": "v1", "placement": {"relative_to": "#2", "anchor": "start"}}
                ]
            }"##,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "relative-recursion");
        assert_eq!(diagnostics[0].message, "Infinite recursion detected. Path: #2 -> #2");
    }

    #[test]
    fn test_layer_cycle() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [{"type": "video", "name": "v1", "path": "a.mp4"}],
                "timeline": [
                    {"name": "#1", "element": "v1", "layer": {"above": "#2"}},
                    {"name": "#2", "element": "v1", "layer": {"under": "#1"}}
                ]
            }"##,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "layer-recursion");
        assert_eq!(diagnostics[0].message, "Infinite recursion detected. Path: #1 -> #2 -> #1");
    }

    #[test]
    fn test_dangling_targets_are_left_to_reference_rule() {
        let diagnostics = check(
            r##"{
                "output_name": "out",
                "elements": [{"type": "video", "name": "v1", "path": "a.mp4"}],
                "timeline": [
                    {"name": "#1", "element": "v1"},
                    {"name": "#2", "element": "v1", "placement": {"relative_to": "#9", "anchor": "end"},
                     "layer": {"above": "#9"}}
                ]
            }"##,
        );
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }
}
