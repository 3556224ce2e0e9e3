//! # Text Entry Effects
//!
//! Letter-by-letter animations applied to text clips. The generated code
//! splits the rendered text into connected glyph regions (through the clip's
//! mask), crops one sub-clip per letter, moves each one with the effect's
//! position function and recombines them into a single composite.
//!
//! - **Grouping**: letters converge from a rotating ring
//! - **Falling**: letters drop from above in a cascade

pub mod falling;
pub mod grouping;
pub mod registry;
pub mod traits;

pub use falling::FallingEffect;
pub use grouping::GroupingEffect;
pub use registry::TextEffectRegistry;
pub use traits::TextEffect;

use crate::{
    codegen::{python, ScriptWriter},
    model::{Canvas, Coordinate},
};

/// Write the shared helpers once and the animation of one text clip
///
/// `clip` is rebound to the composite of its animated letters, cut to
/// `duration` seconds and placed at `position`.
pub fn write_letter_animation(
    effect: &dyn TextEffect,
    clip: &str,
    position: (Coordinate, Coordinate),
    duration: f64,
    canvas: Canvas,
    writer: &mut ScriptWriter,
) {
    writer.once("letter-animation", |w| {
        w.comment("Helpers for letter-by-letter text effects");
        w.add_line("import numpy as np");
        w.add_line("from scipy.ndimage import label, find_objects");
        w.blank_line();
        w.add_line("rotMatrix = lambda a: np.array([[np.cos(a), np.sin(a)], [-np.sin(a), np.cos(a)]])");
        w.blank_line();
        w.add_line("def find_letters(mask):");
        w.indent();
        w.add_line("labeled_array, num_features = label(mask)");
        w.add_line("return find_objects(labeled_array)");
        w.dedent();
        w.blank_line();
        w.add_line("def move_letters(letters, funcpos, original_clip):");
        w.indent();
        w.add_line("animated_letters = []");
        w.add_line("for i, letter_slice in enumerate(letters):");
        w.indent();
        w.add_line("x_min, x_max = letter_slice[1].start, letter_slice[1].stop");
        w.add_line("y_min, y_max = letter_slice[0].start, letter_slice[0].stop");
        w.add_line("cropped_letter = original_clip.cropped(x1=x_min, x2=x_max, y1=y_min, y2=y_max)");
        w.add_line("animated_letters.append(cropped_letter.with_position(funcpos((x_min, y_min), i, len(letters))))");
        w.dedent();
        w.add_line("return animated_letters");
        w.dedent();
        w.blank_line();
    });

    let name = effect.name().to_string();
    writer.once(&format!("letter-effect:{}", name), |w| {
        effect.write_position_function(w)
    });

    writer.comment(&format!("Animate the letters of {}", clip));
    writer.add_line(&format!("{}_letters = find_letters({}.mask.get_frame(0))", clip, clip));
    writer.add_line(&format!("{} = moviepy.CompositeVideoClip(", clip));
    writer.indent();
    writer.add_line(&format!("move_letters({}_letters, {}, {}),", clip, name, clip));
    writer.add_line(&format!("size=({}, {}),", canvas.width, canvas.height));
    writer.dedent();
    writer.add_line(&format!(
        ").subclipped(0, {}).with_position({})",
        python::number(duration),
        python::position_tuple(position)
    ));
}
