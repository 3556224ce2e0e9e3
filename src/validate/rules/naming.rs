use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::codegen::python::PLACEMENT_PREFIX;
use crate::model::VideoProject;
use crate::validate::rules::{is_script_identifier, ValidationRule};
use crate::validate::Diagnostic;

/// Output file name, element names and timeline identifiers
pub struct NamingRule;

impl ValidationRule for NamingRule {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Names must be unique and usable in the generated script"
    }

    fn check(&self, project: &VideoProject) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        check_output_name(project, &mut diagnostics);
        check_element_names(project, &mut diagnostics);
        check_placement_names(project, &mut diagnostics);
        diagnostics
    }
}

fn check_output_name(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    static OUTPUT_NAME: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = OUTPUT_NAME
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9\-_.]+$").ok())
        .as_ref();

    if !pattern.is_some_and(|re| re.is_match(&project.output_name)) {
        diagnostics.push(
            Diagnostic::error("output-name", "Invalid output file name").on(&project.output_name),
        );
    }
}

fn check_element_names(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    let mut names = HashSet::new();
    for element in &project.elements {
        let name = element.name();
        if !names.insert(name) {
            diagnostics.push(Diagnostic::error("unique-element-name", "Element names must be unique").on(name));
        }
        if !is_script_identifier(name) {
            diagnostics.push(
                Diagnostic::error(
                    "element-identifier",
                    format!(
                        "Element name '{}' must start with a letter or underscore and contain only letters, digits and underscores",
                        name
                    ),
                )
                .on(name),
            );
        }
        if name.starts_with(PLACEMENT_PREFIX) {
            diagnostics.push(
                Diagnostic::error(
                    "reserved-element-name",
                    format!("Element names starting with '{}' are reserved for timeline elements", PLACEMENT_PREFIX),
                )
                .on(name),
            );
        }
    }

    // an animated text `t` binds `t_letters` in the script
    for element in project.elements.iter().filter(|e| e.is_textual()) {
        let letters = format!("{}_letters", element.name());
        if names.contains(letters.as_str()) {
            diagnostics.push(
                Diagnostic::error(
                    "reserved-element-name",
                    format!("Element name '{}' is reserved by text element '{}'", letters, element.name()),
                )
                .on(letters),
            );
        }
    }
}

/// `#N` identifiers are numbered from `#1` upwards; any other name must be a plain identifier
fn check_placement_names(project: &VideoProject, diagnostics: &mut Vec<Diagnostic>) {
    let mut names = HashSet::new();
    let mut last_id = 0u64;

    for (index, placement) in project.timeline.iter().enumerate() {
        let name = placement.name.as_str();
        if !names.insert(name) {
            diagnostics.push(
                Diagnostic::error("unique-timeline-identifier", "Timeline elements must have unique identifiers")
                    .on(name),
            );
            continue;
        }

        match name.strip_prefix('#') {
            Some(digits) => match parse_number(digits) {
                Some(1) if index == 0 => last_id = 1,
                Some(_) if index == 0 => {
                    diagnostics.push(
                        Diagnostic::error("ordered-timeline-identifier", "First timeline element must have identifier #1")
                            .on(name),
                    );
                    return;
                }
                Some(id) => {
                    if id <= last_id {
                        diagnostics.push(
                            Diagnostic::error(
                                "ordered-timeline-identifier",
                                format!(
                                    "Timeline elements must have ordered identifiers (this one should be at least #{})",
                                    last_id + 1
                                ),
                            )
                            .on(name),
                        );
                    }
                    last_id = id;
                }
                None => diagnostics.push(
                    Diagnostic::error("timeline-identifier", "Timeline identifier must be '#' followed by a number")
                        .on(name),
                ),
            },
            None if !is_script_identifier(name) => diagnostics.push(
                Diagnostic::error(
                    "timeline-identifier",
                    format!("Timeline identifier '{}' must be #<number> or a valid identifier", name),
                )
                .on(name),
            ),
            None => {}
        }
    }
}

fn parse_number(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
