use thiserror::Error;

/// Main error type for the VideoML compiler
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Program model error: {0}")]
    Model(#[from] ModelError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Code generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building the program model from its serialized form
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid timestamp '{value}', expected mm:ss with fields 00-59")]
    InvalidTimestamp { value: String },

    #[error("Invalid offset '{value}', expected a leading '+' or '-' followed by mm:ss")]
    InvalidOffset { value: String },

    #[error("Failed to read project document: {path}")]
    ProjectNotFound { path: String },
}

/// Reference-integrity errors found while resolving a project
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Missing {kind} reference: {name}")]
    MissingReference { kind: ReferenceKind, name: String },

    #[error("Cyclic relation detected: {}", path.join(" -> "))]
    CyclicRelation { path: Vec<String> },
}

/// What a dangling reference was supposed to point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Element,
    Placement,
    ExtractSource,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element => f.write_str("element"),
            Self::Placement => f.write_str("timeline element"),
            Self::ExtractSource => f.write_str("extract source"),
        }
    }
}

/// Code generation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Missing element reference for timeline element {placement}")]
    MissingElementReference { placement: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Errors from external media probing
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to probe media file {path}: {reason}")]
    ProbeFailed { path: String, reason: String },

    #[error("File watcher failed: {0}")]
    Watch(#[from] notify::Error),
}

/// Convenience type alias for Results using CompilerError
pub type Result<T> = std::result::Result<T, CompilerError>;

impl CompilerError {
    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Media(MediaError::ProbeFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Model(ModelError::ProjectNotFound { path }) => {
                format!("Could not read project '{}'. Please check the file exists.", path)
            }
            Self::Resolve(ResolveError::CyclicRelation { path }) => {
                format!(
                    "Timeline elements refer to each other in a loop ({}). Break the chain to continue.",
                    path.join(" -> ")
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            Self::Media(MediaError::ProbeFailed { path, .. }) => {
                format!("Could not read the duration of '{}'. Is ffprobe installed?", path)
            }
            _ => self.to_string(),
        }
    }
}
