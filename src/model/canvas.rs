use serde::{Deserialize, Serialize};

/// Output frame used for resize and composite decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// How a source frame is fitted onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectFit {
    /// Same aspect ratio as the canvas, stretched to it exactly
    Exact,
    /// Wider than the canvas: fit the width, letterbox vertically
    FitWidth,
    /// Narrower than the canvas: fit the height and center horizontally
    FitHeight,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Compare a source size against the canvas aspect ratio
    ///
    /// Cross-multiplied so that an exact match is not subject to float rounding.
    pub fn fit(&self, width: u32, height: u32) -> AspectFit {
        let source = u64::from(width) * u64::from(self.height);
        let canvas = u64::from(height) * u64::from(self.width);
        match source.cmp(&canvas) {
            std::cmp::Ordering::Equal => AspectFit::Exact,
            std::cmp::Ordering::Greater => AspectFit::FitWidth,
            std::cmp::Ordering::Less => AspectFit::FitHeight,
        }
    }
}
