//! # Code Generation
//!
//! Walks a [`ResolvedProject`] in a fixed order and writes a MoviePy script
//! that rebuilds the composition:
//!
//! 1. the `moviepy` import
//! 2. video elements: load or cut, fit to the canvas, option effects
//! 3. text and subtitle clips, with entry animations when requested
//! 4. audio elements: load or cut, option effects
//! 5. one positioned clip per timeline placement
//! 6. the layered visual composite, the audio mix when audio is placed,
//!    and the export call
//!
//! Output is a pure function of the project and the [`GeneratorConfig`].

pub mod audio;
pub mod context;
pub mod python;
pub mod text;
pub mod timeline;
pub mod video;

pub use context::ScriptWriter;

use tracing::info;

use crate::{
    config::GeneratorConfig,
    effects::TextEffectRegistry,
    error::Result,
    model::ElementCategory,
    resolve::ResolvedProject,
};

/// Generates MoviePy scripts from resolved projects
pub struct ScriptGenerator {
    config: GeneratorConfig,
    effects: TextEffectRegistry,
}

impl ScriptGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            effects: TextEffectRegistry::new(),
        }
    }

    /// Use a custom set of text-entry effects
    pub fn with_effects(mut self, effects: TextEffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the complete script
    ///
    /// Fails without partial output when a placement names no known element.
    pub fn generate(&self, project: &ResolvedProject) -> Result<String> {
        info!("Generating script for {}", project.output_name());
        let mut writer = ScriptWriter::new();

        writer.add_line("import moviepy");
        writer.blank_line();

        let elements = project.elements();
        for element in elements.iter().filter(|e| e.category() == ElementCategory::Video) {
            video::compile_video(element, project.project(), &self.config, &mut writer);
        }
        for element in elements.iter().filter(|e| e.is_textual()) {
            let duration = text::animation_duration(project, element.name(), &self.config);
            text::compile_text(element, duration, &self.config, &self.effects, &mut writer);
        }
        for element in elements.iter().filter(|e| e.category() == ElementCategory::Audio) {
            audio::compile_audio(element, &mut writer);
        }

        timeline::compile_placements(project, &self.config, &mut writer)?;
        writer.blank_line();
        timeline::compile_composition(project, &self.config, &mut writer)?;

        let script = writer.into_output();
        info!("Generated {} lines", script.lines().count());
        Ok(script)
    }
}

impl Default for ScriptGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generate a script with the built-in effects
pub fn generate(project: &ResolvedProject, config: &GeneratorConfig) -> Result<String> {
    ScriptGenerator::new(config.clone()).generate(project)
}
