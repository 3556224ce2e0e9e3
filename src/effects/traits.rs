use crate::codegen::ScriptWriter;

/// A letter-by-letter entry animation for text clips
///
/// Each effect contributes one Python position function with the signature
/// `def <name>(screenpos, i, nletters)`, returning a function of time that
/// gives the position of letter `i`. The shared letter-splitting helpers
/// are written by [`write_letter_animation`](super::write_letter_animation).
pub trait TextEffect: Send + Sync {
    /// Name used in programs and as the Python function name
    fn name(&self) -> &str;

    /// Human-readable description of the animation
    fn description(&self) -> &str;

    /// Write the definition of the position function
    fn write_position_function(&self, writer: &mut ScriptWriter);
}
