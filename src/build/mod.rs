//! # Document Builds
//!
//! One build turns a project document into the envelope an editor front end
//! consumes: the project itself, the generated script, the timeline
//! projection and the diagnostics. Builds are independent of each other; the
//! only state they share is the [`DurationCache`].

pub mod duration;
pub mod watch;

pub use duration::{DurationCache, DurationProbe, FfprobeDuration};
pub use watch::{debounce_builds, watch_project, ProjectWatcher};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    codegen::ScriptGenerator,
    config::{Config, GeneratorConfig},
    error::Result,
    model::VideoProject,
    resolve::{resolve, KnownDurations},
    ui::timeline_infos,
    validate::{has_errors, validate_with, Diagnostic, RuleRegistry},
};

/// What one build publishes for a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChange {
    pub uri: String,
    /// Serialized project carrying `$pythonCode`, `$timelineElementInfos` and `$isValid`
    pub content: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentChange {
    pub fn content_value(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.content)?)
    }

    pub fn is_valid(&self) -> bool {
        !has_errors(&self.diagnostics)
    }
}

/// Validates, generates and projects project documents
pub struct DocumentBuilder<P = FfprobeDuration> {
    generator: ScriptGenerator,
    rules: RuleRegistry,
    durations: Option<DurationCache<P>>,
    base_dir: Option<PathBuf>,
}

impl DocumentBuilder {
    /// A builder that never measures media; original clips count as zero seconds
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            generator: ScriptGenerator::new(config),
            rules: RuleRegistry::new(),
            durations: None,
            base_dir: None,
        }
    }

    /// Generator settings from `config`, with `ffprobe` lookups when enabled
    pub fn from_config(config: &Config) -> Self {
        let builder = Self::new(config.generator.clone());
        if config.build.probe_durations {
            builder.with_duration_probe(FfprobeDuration::new(&config.build.ffprobe_path))
        } else {
            builder
        }
    }
}

impl<P: DurationProbe> DocumentBuilder<P> {
    pub fn with_duration_probe<Q: DurationProbe>(self, probe: Q) -> DocumentBuilder<Q> {
        DocumentBuilder {
            generator: self.generator,
            rules: self.rules,
            durations: Some(DurationCache::new(probe)),
            base_dir: self.base_dir,
        }
    }

    /// Directory relative media paths are probed from
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    pub fn generator(&self) -> &ScriptGenerator {
        &self.generator
    }

    pub fn durations(&self) -> Option<&DurationCache<P>> {
        self.durations.as_ref()
    }

    fn media_path(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) if Path::new(path).is_relative() => dir.join(path),
            _ => PathBuf::from(path),
        }
    }

    /// Durations of every original clip that could be measured
    ///
    /// Probe failures are logged and leave the clip out.
    pub async fn known_durations(&self, project: &VideoProject) -> KnownDurations {
        let mut known = KnownDurations::new();
        let Some(cache) = &self.durations else {
            return known;
        };

        let mut seen = HashSet::new();
        for path in project.elements.iter().filter_map(|e| e.file_path()) {
            if !seen.insert(path) {
                continue;
            }
            match cache.duration(&self.media_path(path)).await {
                Ok(duration) => {
                    known.insert(path.to_string(), duration);
                }
                Err(e) => warn!("Skipping duration of {}: {}", path, e),
            }
        }
        known
    }

    /// Build the envelope for `project`
    ///
    /// With any error-severity diagnostic the script and projection are left
    /// empty and `$isValid` is false. Reference errors the rules missed
    /// still abort the build.
    pub async fn build(&self, uri: &str, project: &VideoProject) -> Result<DocumentChange> {
        info!("Building {}", uri);
        let diagnostics = validate_with(project, &self.rules);
        let valid = !has_errors(&diagnostics);

        let (python_code, infos) = if valid {
            let resolved = resolve(project)?;
            let script = self.generator.generate(&resolved)?;
            let known = self.known_durations(project).await;
            let infos = timeline_infos(&resolved, &known, self.generator.config().default_text_duration)?;
            (script, serde_json::to_value(infos)?)
        } else {
            debug!("{} has errors, skipping generation", uri);
            (String::new(), Value::Array(Vec::new()))
        };

        let mut content = serde_json::to_value(project)?;
        if let Value::Object(fields) = &mut content {
            fields.insert("$pythonCode".to_string(), Value::String(python_code));
            fields.insert("$timelineElementInfos".to_string(), infos);
            fields.insert("$isValid".to_string(), Value::Bool(valid));
        }

        Ok(DocumentChange {
            uri: uri.to_string(),
            content: serde_json::to_string(&content)?,
            diagnostics,
        })
    }
}
