use crate::{codegen::ScriptWriter, effects::TextEffect};

/// Letters drop from above one after another and bounce into place
pub struct FallingEffect {
    /// Seconds between two consecutive letters starting to fall
    stagger: f64,
}

impl FallingEffect {
    pub fn new() -> Self {
        Self { stagger: 0.15 }
    }
}

impl Default for FallingEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEffect for FallingEffect {
    fn name(&self) -> &str {
        "falling"
    }

    fn description(&self) -> &str {
        "Letters fall from the top of the frame in a cascade"
    }

    fn write_position_function(&self, writer: &mut ScriptWriter) {
        writer.add_line("def falling(screenpos, i, nletters):");
        writer.indent();
        writer.add_line("v = np.array([0, -1])");
        writer.add_line("d = lambda t: 1 if t < 0 else abs(np.sinc(t) / (1 + t**4))");
        writer.add_line(&format!(
            "return lambda t: screenpos + v * 400 * d(t - {} * i)",
            self.stagger
        ));
        writer.dedent();
        writer.blank_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_function_staggers_letters() {
        let mut writer = ScriptWriter::new();
        FallingEffect::new().write_position_function(&mut writer);
        let code = writer.into_output();

        assert!(code.starts_with("def falling(screenpos, i, nletters):\n"));
        assert!(code.contains("    return lambda t: screenpos + v * 400 * d(t - 0.15 * i)\n"));
    }
}
