mod naming;
mod options;
mod references;
mod timeline;

pub use naming::NamingRule;
pub use options::OptionRangeRule;
pub use references::ReferenceRule;
pub use timeline::TimelineRule;

use std::sync::OnceLock;

use regex::Regex;

use crate::model::VideoProject;
use crate::validate::Diagnostic;

/// Trait for implementing validation rules
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a whole project
    fn check(&self, project: &VideoProject) -> Vec<Diagnostic>;
}

/// Registry of the rules a validation pass runs
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NamingRule),
                Box::new(ReferenceRule),
                Box::new(TimelineRule),
                Box::new(OptionRangeRule),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Names the generated script binds itself
const RESERVED_NAMES: &[&str] = &[
    // imports and the final composition
    "moviepy", "np", "label", "find_objects", "final_video", "final_audio",
    // option effects
    "multiply_effect", "resize_effect", "lum_contrast_effect", "painting_effect",
    "rotate_effect", "fade_in", "fade_out", "new_volume", "stereo_volume",
    "normalize_effect",
    // letter animation helpers
    "rotMatrix", "find_letters", "move_letters", "grouping", "falling",
];

/// Whether `name` can stand as a variable in the generated script
pub(crate) fn is_script_identifier(name: &str) -> bool {
    static IDENTIFIER: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok())
        .as_ref();

    pattern.is_some_and(|re| re.is_match(name))
        && !PYTHON_KEYWORDS.contains(&name)
        && !RESERVED_NAMES.contains(&name)
}
