//! Literal formatting for the generated Python source

use crate::model::{Coordinate, PixelSize};

/// Double-quoted Python string literal
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", c as u32 & 0xff)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Python number literal; whole values are written without a fraction
pub fn number(value: f64) -> String {
    if value.is_nan() {
        return "float(\"nan\")".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "float(\"inf\")" } else { "-float(\"inf\")" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // -0.0 prints as "0"
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

pub fn coordinate(value: Coordinate) -> String {
    match value {
        Coordinate::Pixels(px) => px.to_string(),
        Coordinate::Center => string_literal("center"),
    }
}

/// `(x, y)` tuple for a position call
pub fn position_tuple(position: (Coordinate, Coordinate)) -> String {
    format!("({}, {})", coordinate(position.0), coordinate(position.1))
}

/// `(w, h)` tuple
pub fn size_tuple(size: PixelSize) -> String {
    format!("({}, {})", size.width, size.height)
}

/// Python variable bound to a placement
///
/// Placements named `#N` become `timeline_element_N`, any other name `n`
/// becomes `timeline_element_n`. Element names may not carry the prefix.
pub fn placement_identifier(name: &str) -> String {
    let suffix = name.strip_prefix('#').unwrap_or(name);
    format!("{}{}", PLACEMENT_PREFIX, suffix)
}

/// Prefix shared by every placement variable
pub const PLACEMENT_PREFIX: &str = "timeline_element_";

/// Reduced `w/h` ratio expression, `16/9` for a 1920x1080 canvas
pub fn ratio(width: u32, height: u32) -> String {
    let divisor = gcd(width, height).max(1);
    format!("{}/{}", width / divisor, height / divisor)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
