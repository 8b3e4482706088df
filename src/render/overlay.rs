use image::{Rgb, RgbImage};

use crate::celebration::state::WinRecord;
use crate::foundation::core::{BLACK, GOLD, TEAM_RED, WHITE};
use crate::render::glyphs::GlyphRasterizer;

/// Per-render overlay inputs.
#[derive(Clone, Copy, Debug)]
pub struct OverlayOpts<'a> {
    pub banner_text: &'a str,
    pub show_text: bool,
    pub show_score: bool,
    pub flash_on: bool,
}

/// Stamp the flashing banner and the final score onto a copy of `base`.
///
/// Text is drawn twice: a black shadow one pixel down-right, then the color
/// pass. Draw failures (clipped text) are logged and skipped, never fatal.
pub fn compose(
    base: &RgbImage,
    win: Option<&WinRecord>,
    opts: OverlayOpts<'_>,
    glyphs: &dyn GlyphRasterizer,
) -> RgbImage {
    let mut img = base.clone();
    let w = img.width() as i32;

    if opts.show_text && opts.flash_on {
        let text_w = glyphs.measure(opts.banner_text) as i32;
        let x = ((w - text_w) / 2).max(0);
        shadowed(&mut img, glyphs, opts.banner_text, x, 1, GOLD);
    }

    if let (true, Some(win)) = (opts.show_score, win) {
        let line1 = format!("{} {}", win.team_abbr, win.team_score);
        let line2 = format!("{} {}", win.opponent_abbr, win.opponent_score);
        let x1 = w - glyphs.measure(&line1) as i32 - 1;
        let x2 = w - glyphs.measure(&line2) as i32 - 1;
        let y1 = 1;
        let y2 = glyphs.line_height() as i32 + 2;

        shadowed(&mut img, glyphs, &line1, x1, y1, WHITE);
        shadowed(&mut img, glyphs, &line2, x2, y2, TEAM_RED);
    }

    img
}

fn shadowed(
    img: &mut RgbImage,
    glyphs: &dyn GlyphRasterizer,
    text: &str,
    x: i32,
    y: i32,
    color: Rgb<u8>,
) {
    for (dx, dy, c) in [(1, 1, BLACK), (0, 0, color)] {
        if let Err(e) = glyphs.draw(img, text, x + dx, y + dy, c) {
            tracing::trace!(error = %e, text, "overlay text clipped");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
