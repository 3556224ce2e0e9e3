use std::collections::HashSet;

use crate::model::{ElementCategory, GroupOption, VideoProject};
use crate::validate::rules::ValidationRule;
use crate::validate::Diagnostic;

/// Every name a project refers to must exist and have the right category
pub struct ReferenceRule;

impl ValidationRule for ReferenceRule {
    fn name(&self) -> &'static str {
        "references"
    }

    fn description(&self) -> &'static str {
        "Extract sources, group members and timeline targets must resolve"
    }

    fn check(&self, project: &VideoProject) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        check_extract_sources(project, &mut diagnostics);
        check_group_members(project, &mut diagnostics);
        check_timeline_targets(project, &mut diagnostics);
        diagnostics
    }
}

fn category_label(category: ElementCategory) -> &'static str {
    match category {
        ElementCategory::Video => "video",
        ElementCategory::Audio => "audio",
        ElementCategory::Textual => "text",
    }
}

fn check_extract_sources(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    for (index, element) in project.elements.iter().enumerate() {
        let Some(source) = element.extract_source() else {
            continue;
        };
        let label = category_label(element.category());

        let found = project
            .elements
            .iter()
            .enumerate()
            .find(|(_, candidate)| candidate.name() == source);

        match found {
            None => diagnostics.push(
                Diagnostic::error("extract-source", format!("Source {} not found", label)).on(element.name()),
            ),
            Some((_, candidate)) if candidate.category() != element.category() => diagnostics.push(
                Diagnostic::error(
                    "extract-source",
                    format!("Extract source '{}' must be a {} element", source, label),
                )
                .on(element.name()),
            ),
            Some((source_index, _)) if source_index >= index => diagnostics.push(
                Diagnostic::error(
                    "extract-source",
                    format!("Extract source '{}' must be declared before the extract", source),
                )
                .on(element.name()),
            ),
            Some(_) => {}
        }
    }
}

fn check_group_members(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    for group in &project.groups {
        let expected = match group {
            GroupOption::Video(_) => ElementCategory::Video,
            GroupOption::Audio(_) => ElementCategory::Audio,
            GroupOption::Text(_) => ElementCategory::Textual,
        };

        let mut members = HashSet::new();
        for member in group.element_names() {
            if !members.insert(member.as_str()) {
                diagnostics.push(
                    Diagnostic::error("group-member", "Element names must be unique").on(group.name()),
                );
            }
            match project.element(member) {
                None => diagnostics.push(
                    Diagnostic::error("group-member", format!("Group refers to unknown element '{}'", member))
                        .on(group.name()),
                ),
                Some(element) if element.category() != expected => diagnostics.push(
                    Diagnostic::error(
                        "group-member",
                        format!(
                            "Element '{}' cannot be in a {} group",
                            member,
                            category_label(expected)
                        ),
                    )
                    .on(group.name()),
                ),
                Some(_) => {}
            }
        }
    }
}

fn check_timeline_targets(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    for placement in &project.timeline {
        if project.element(&placement.element).is_none() {
            diagnostics.push(
                Diagnostic::error(
                    "timeline-reference",
                    format!("Timeline element refers to unknown element '{}'", placement.element),
                )
                .on(&placement.name),
            );
        }

        let targets = placement
            .relative_target()
            .into_iter()
            .chain(placement.layer.as_ref().map(|layer| layer.target()));
        for target in targets {
            if project.placement(target).is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        "timeline-reference",
                        format!("Timeline element refers to unknown timeline element '{}'", target),
                    )
                    .on(&placement.name),
                );
            }
        }
    }
}
