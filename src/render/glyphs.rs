use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use image::{Rgb, RgbImage};

use crate::foundation::error::{FlyError, FlyResult};

/// Text rasterizer used by the overlay and the synthesized side panel.
pub trait GlyphRasterizer: Send {
    /// Height of one text line in pixels.
    fn line_height(&self) -> u32;

    /// Width of `text` in pixels.
    fn measure(&self, text: &str) -> u32;

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// Pixels outside the image are dropped. Returns `FlyError::Render` when
    /// any part of the text was clipped; the visible part is drawn regardless.
    fn draw(
        &self,
        img: &mut RgbImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb<u8>,
    ) -> FlyResult<()>;
}

/// Built-in monospace bitmap fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapFont {
    F4x6,
    F5x7,
    F5x8,
    F6x9,
    F6x10,
    F6x12,
    F6x13,
    F7x13,
    F7x14,
    F8x13,
    F9x15,
    F9x18,
    F10x20,
}

impl BitmapFont {
    /// Ordered by height, then width.
    pub const ALL: [Self; 13] = [
        Self::F4x6,
        Self::F5x7,
        Self::F5x8,
        Self::F6x9,
        Self::F6x10,
        Self::F6x12,
        Self::F6x13,
        Self::F7x13,
        Self::F8x13,
        Self::F7x14,
        Self::F9x15,
        Self::F9x18,
        Self::F10x20,
    ];

    fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::F4x6 => &ascii::FONT_4X6,
            Self::F5x7 => &ascii::FONT_5X7,
            Self::F5x8 => &ascii::FONT_5X8,
            Self::F6x9 => &ascii::FONT_6X9,
            Self::F6x10 => &ascii::FONT_6X10,
            Self::F6x12 => &ascii::FONT_6X12,
            Self::F6x13 => &ascii::FONT_6X13,
            Self::F7x13 => &ascii::FONT_7X13,
            Self::F7x14 => &ascii::FONT_7X14,
            Self::F8x13 => &ascii::FONT_8X13,
            Self::F9x15 => &ascii::FONT_9X15,
            Self::F9x18 => &ascii::FONT_9X18,
            Self::F10x20 => &ascii::FONT_10X20,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::F4x6 => "4x6",
            Self::F5x7 => "5x7",
            Self::F5x8 => "5x8",
            Self::F6x9 => "6x9",
            Self::F6x10 => "6x10",
            Self::F6x12 => "6x12",
            Self::F6x13 => "6x13",
            Self::F7x13 => "7x13",
            Self::F7x14 => "7x14",
            Self::F8x13 => "8x13",
            Self::F9x15 => "9x15",
            Self::F9x18 => "9x18",
            Self::F10x20 => "10x20",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.token() == token)
    }

    /// Cell height in pixels.
    pub fn height(self) -> u32 {
        self.mono().character_size.height
    }

    /// Tallest font whose cell height fits `px`, never smaller than 4x6.
    pub fn for_height(px: u32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|f| f.height() <= px)
            .unwrap_or(Self::F4x6)
    }
}

/// [`GlyphRasterizer`] over the built-in bitmap fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoGlyphs {
    font: BitmapFont,
}

impl MonoGlyphs {
    pub fn new(font: BitmapFont) -> Self {
        Self { font }
    }

    /// Pick a font from the configured name and size.
    ///
    /// A `WxH` token in the name (`4x6-font.ttf`) selects that font, with a
    /// warning when its height differs from `font_size`. Otherwise the size
    /// decides and a warning is logged.
    pub fn resolve(font_name: &str, font_size: u32) -> Self {
        let named = font_name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(BitmapFont::from_token);
        match named {
            Some(font) => {
                if font.height() != font_size {
                    tracing::warn!(
                        font_name,
                        font_size,
                        font_height = font.height(),
                        "bitmap font height differs from font_size, keeping named font"
                    );
                }
                Self::new(font)
            }
            None => {
                let font = BitmapFont::for_height(font_size);
                tracing::warn!(
                    font_name,
                    font_size,
                    fallback = font.token(),
                    "font not found, using bitmap fallback"
                );
                Self::new(font)
            }
        }
    }

    pub fn font(&self) -> BitmapFont {
        self.font
    }
}

impl Default for MonoGlyphs {
    fn default() -> Self {
        Self::new(BitmapFont::F4x6)
    }
}

impl GlyphRasterizer for MonoGlyphs {
    fn line_height(&self) -> u32 {
        self.font.height()
    }

    fn measure(&self, text: &str) -> u32 {
        let font = self.font.mono();
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        n * font.character_size.width + (n - 1) * font.character_spacing
    }

    fn draw(
        &self,
        img: &mut RgbImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb<u8>,
    ) -> FlyResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let (img_w, img_h) = img.dimensions();
        let w = i64::from(self.measure(text));
        let h = i64::from(self.line_height());

        let [r, g, b] = color.0;
        let style = MonoTextStyle::new(self.font.mono(), Rgb888::new(r, g, b));
        let mut target = ImageTarget { img };
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut target)
            .unwrap_or_else(|e| match e {});

        let (x, y) = (i64::from(x), i64::from(y));
        if x < 0 || y < 0 || x + w > i64::from(img_w) || y + h > i64::from(img_h) {
            return Err(FlyError::render(format!(
                "text '{text}' ({w}x{h} at {x},{y}) clipped to {img_w}x{img_h}"
            )));
        }
        Ok(())
    }
}

/// `DrawTarget` adapter writing straight into an RGB buffer, clipping silently.
struct ImageTarget<'a> {
    img: &'a mut RgbImage,
}

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.img.width(), self.img.height())
    }
}

impl DrawTarget for ImageTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = self.img.dimensions();
        for Pixel(p, c) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) else {
                continue;
            };
            if x < w && y < h {
                self.img.put_pixel(x, y, Rgb([c.r(), c.g(), c.b()]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyphs.rs"]
mod tests;
