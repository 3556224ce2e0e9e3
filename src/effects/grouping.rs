use crate::{codegen::ScriptWriter, effects::TextEffect};

/// Letters fly in from a ring around the text and settle into place
pub struct GroupingEffect;

impl GroupingEffect {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GroupingEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEffect for GroupingEffect {
    fn name(&self) -> &str {
        "grouping"
    }

    fn description(&self) -> &str {
        "Letters converge from a rotating ring onto their final position"
    }

    fn write_position_function(&self, writer: &mut ScriptWriter) {
        writer.add_line("def grouping(screenpos, i, nletters):");
        writer.indent();
        writer.add_line("d = lambda t: 1.0 / (0.3 + t**8)");
        writer.add_line("a = i * np.pi / nletters");
        writer.add_line("v = rotMatrix(a).dot([-1, 0])");
        writer.add_line("if i % 2:");
        writer.indent();
        writer.add_line("v[1] = -v[1]");
        writer.dedent();
        writer.add_line("return lambda t: screenpos + 400 * d(t) * rotMatrix(0.5 * d(t) * a).dot(v)");
        writer.dedent();
        writer.blank_line();
    }
}
