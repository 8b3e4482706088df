use std::f64::consts::PI;
use std::num::NonZeroUsize;

use image::{Rgb, RgbImage};

use crate::foundation::core::{BLACK, Canvas, GOLD, TEAM_BLUE, TEAM_RED, WHITE};
use crate::frames::sequence::{AnimationFrame, FrameSequence};
use crate::render::glyphs::GlyphRasterizer;

pub const SYNTH_FRAME_COUNT: NonZeroUsize = NonZeroUsize::new(16).unwrap();

/// Relative pixel offsets of the flag letter on a 9x5 grid.
const W_PATTERN: [(i32, i32); 21] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 3),
    (1, 4),
    (2, 2),
    (2, 3),
    (3, 3),
    (3, 4),
    (4, 3),
    (4, 4),
    (5, 2),
    (5, 3),
    (6, 3),
    (6, 4),
    (7, 3),
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
];

/// Inputs of the procedural flag loop.
pub struct SynthParams<'a> {
    /// Uniform per-frame duration.
    pub frame_secs: f64,
    pub show_text: bool,
    pub show_score: bool,
    /// Side-panel text, one word per line.
    pub banner_text: &'a str,
    /// Drawn at the bottom of the side panel when non-empty.
    pub score_label: &'a str,
    pub glyphs: &'a dyn GlyphRasterizer,
}

pub fn synthesize(canvas: Canvas, params: &SynthParams<'_>) -> FrameSequence {
    synthesize_n(canvas, SYNTH_FRAME_COUNT, params)
}

pub fn synthesize_n(
    canvas: Canvas,
    count: NonZeroUsize,
    params: &SynthParams<'_>,
) -> FrameSequence {
    let n = count.get();
    let frames = (0..n)
        .map(|i| AnimationFrame {
            image: render_flag_frame(canvas, i, n, params),
            duration_secs: params.frame_secs,
        })
        .collect();
    tracing::debug!(
        frames = n,
        width = canvas.width,
        height = canvas.height,
        "built procedural flag frames"
    );
    FrameSequence::from_nonempty(frames)
}

/// One frame of the waving flag: two-tone banner with a traveling sine wave,
/// the letter riding the wave, a pole on the left and text on the right.
pub fn render_flag_frame(
    canvas: Canvas,
    frame_idx: usize,
    frame_count: usize,
    params: &SynthParams<'_>,
) -> RgbImage {
    let (w, h) = (canvas.width as i32, canvas.height as i32);
    let mut img = RgbImage::from_pixel(canvas.width, canvas.height, BLACK);

    let phase = 2.0 * PI * frame_idx as f64 / frame_count.max(1) as f64;

    let flag_w = (f64::from(w) * 0.6) as i32;
    let flag_h = (f64::from(h) * 0.75) as i32;
    let flag_top = (h - flag_h) / 2;

    // amplitude grows from the pole to the free end
    let amplitude = (flag_h / 8).max(1);
    for col in 0..flag_w {
        let wave_factor = f64::from(col) / f64::from((flag_w - 1).max(1));
        let offset =
            (f64::from(amplitude) * wave_factor * (phase + f64::from(col) * 0.3).sin()) as i32;
        let col_top = flag_top + offset;
        let mid = col_top + flag_h / 2;
        for row in col_top..col_top + flag_h {
            let color = if row < mid { TEAM_BLUE } else { TEAM_RED };
            put(&mut img, canvas, col, row, color);
        }
    }

    let cx = flag_w / 2;
    let cy = flag_top + flag_h / 2;
    let ride = (f64::from(amplitude) * 0.5 * (phase + f64::from(cx) * 0.3).sin()) as i32;
    let scale = (h / 16).max(1);
    for (dx, dy) in w_pixels(scale) {
        put(&mut img, canvas, cx + dx, cy + ride + dy, WHITE);
    }

    for row in flag_top - 2..flag_top + flag_h + 2 {
        put(&mut img, canvas, 0, row, WHITE);
    }

    draw_side_panel(&mut img, flag_w + 2, params);
    img
}

fn draw_side_panel(img: &mut RgbImage, text_x: i32, params: &SynthParams<'_>) {
    let line_h = params.glyphs.line_height() as i32;

    if params.show_text {
        for (i, word) in params.banner_text.split_whitespace().enumerate() {
            let color = if i == 0 { GOLD } else { WHITE };
            let y = 2 + i as i32 * (line_h + 1);
            if let Err(e) = params.glyphs.draw(img, word, text_x, y, color) {
                tracing::trace!(error = %e, "side panel text clipped");
            }
        }
    }

    if params.show_score && !params.score_label.is_empty() {
        let y = img.height() as i32 - line_h - 2;
        if let Err(e) = params.glyphs.draw(img, params.score_label, text_x, y, WHITE) {
            tracing::trace!(error = %e, "side panel score clipped");
        }
    }
}

/// Offsets of the letter scaled into `scale x scale` blocks, centered on the
/// origin.
pub fn w_pixels(scale: i32) -> Vec<(i32, i32)> {
    let scale = scale.max(1);
    let half_w = 4 * scale;
    let half_h = 2 * scale;
    let mut out = Vec::with_capacity(W_PATTERN.len() * (scale * scale) as usize);
    for (px, py) in W_PATTERN {
        for sx in 0..scale {
            for sy in 0..scale {
                out.push((px * scale + sx - half_w, py * scale + sy - half_h));
            }
        }
    }
    out
}

fn put(img: &mut RgbImage, canvas: Canvas, x: i32, y: i32, color: Rgb<u8>) {
    if canvas.contains(i64::from(x), i64::from(y)) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/synth.rs"]
mod tests;
