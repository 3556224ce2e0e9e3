//! # VideoML
//!
//! Compile declarative video-composition projects into MoviePy editing scripts.
//!
//! A project declares media and text elements, option groups and a timeline
//! of placements. This library validates the project, resolves option
//! inheritance, stacking layers and start instants, and writes a Python
//! script that renders the composition with MoviePy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use videoml::{codegen::ScriptGenerator, config::Config, model::VideoProject, resolve::resolve};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let project = VideoProject::from_file("holiday.json")?;
//!
//! let resolved = resolve(&project)?;
//! let script = ScriptGenerator::new(config.generator).generate(&resolved)?;
//! std::fs::write(format!("{}.py", project.output_name), script)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`model`] - Parsed project: elements, options, groups, placements
//! - [`validate`] - Semantic diagnostics over a project
//! - [`resolve`] - Option merging, layers and timeline scheduling
//! - [`codegen`] - MoviePy script generation
//! - [`effects`] - Letter-by-letter text entry animations
//! - [`ui`] - Timeline records for a presentation layer
//! - [`build`] - Document builds, media durations and rebuild-on-change
//! - [`config`] - Configuration management
//!
//! ## Custom Text Effects
//!
//! Text entry effects are looked up by name. Replace a built-in animation by
//! registering your own [`TextEffect`](effects::TextEffect) under its name:
//!
//! ```rust,no_run
//! use videoml::codegen::{ScriptGenerator, ScriptWriter};
//! use videoml::effects::{TextEffect, TextEffectRegistry};
//!
//! struct Rising;
//!
//! impl TextEffect for Rising {
//!     fn name(&self) -> &str {
//!         "rising"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Letters rise into place"
//!     }
//!
//!     fn write_position_function(&self, writer: &mut ScriptWriter) {
//!         writer.add_line("def rising(screenpos, i, nletters):");
//!         writer.indent();
//!         writer.add_line("return lambda t: screenpos + [0, max(0, 400 * (1 - t))]");
//!         writer.dedent();
//!     }
//! }
//!
//! let mut effects = TextEffectRegistry::new();
//! effects.register("falling".to_string(), || Box::new(Rising));
//!
//! let generator = ScriptGenerator::default().with_effects(effects);
//! ```

pub mod build;
pub mod codegen;
pub mod config;
pub mod effects;
pub mod error;
pub mod model;
pub mod resolve;
pub mod ui;
pub mod validate;

// Re-export commonly used types for convenience
pub use crate::{
    build::{DocumentBuilder, DocumentChange},
    codegen::ScriptGenerator,
    config::Config,
    error::{CompilerError, Result},
    model::VideoProject,
    resolve::{resolve, ResolvedProject},
    validate::{validate, Diagnostic, Severity},
};
