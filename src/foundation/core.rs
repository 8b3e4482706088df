use image::Rgb;

use crate::foundation::error::{FlyError, FlyResult};

/// Target display dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> FlyResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlyError::config(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when `(x, y)` addresses a pixel on the canvas.
    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

pub const TEAM_BLUE: Rgb<u8> = Rgb([14, 51, 134]);
pub const TEAM_RED: Rgb<u8> = Rgb([204, 52, 51]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GOLD: Rgb<u8> = Rgb([255, 215, 0]);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
