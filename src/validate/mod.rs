//! # Semantic Validation
//!
//! Checks a [`VideoProject`] for mistakes the structural model cannot rule
//! out: duplicate names, dangling references, placements that cannot be
//! scheduled, option values outside what the target effects accept.
//!
//! Validation never fails; it reports [`Diagnostic`]s. Error-severity
//! findings mean the project would produce a script that breaks at run time,
//! so callers should not generate from it. Media files are not inspected.

mod diagnostic;
pub mod rules;

pub use diagnostic::{Diagnostic, Severity};
pub use rules::{RuleRegistry, ValidationRule};

use tracing::debug;

use crate::model::VideoProject;

/// Run the built-in rules over `project`
pub fn validate(project: &VideoProject) -> Vec<Diagnostic> {
    validate_with(project, &RuleRegistry::new())
}

/// Run the rules of `registry` over `project`, in registration order
pub fn validate_with(project: &VideoProject, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for rule in registry.rules() {
        let found = rule.check(project);
        if !found.is_empty() {
            debug!("Rule {} reported {} diagnostics", rule.name(), found.len());
        }
        diagnostics.extend(found);
    }
    diagnostics
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
