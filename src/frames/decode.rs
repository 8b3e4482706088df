use std::io::Cursor;

use anyhow::Context;
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlyError, FlyResult};
use crate::frames::sequence::{AnimationFrame, FrameSequence};

/// Used when a frame carries no delay.
pub const DEFAULT_FRAME_SECS: f64 = 0.1;

/// Decode a bundled animation into letterboxed canvas frames.
///
/// GIFs keep their per-frame delays; other still formats decode as a single
/// frame.
pub fn decode_animation(bytes: &[u8], canvas: Canvas) -> FlyResult<FrameSequence> {
    let format = image::guess_format(bytes).context("detect animation format")?;

    let frames = if format == ImageFormat::Gif {
        let decoder = GifDecoder::new(Cursor::new(bytes)).context("open gif")?;
        let raw = decoder
            .into_frames()
            .collect_frames()
            .context("decode gif frames")?;
        raw.into_iter()
            .map(|f| {
                let (num, den) = f.delay().numer_denom_ms();
                let ms = if den == 0 {
                    0.0
                } else {
                    f64::from(num) / f64::from(den)
                };
                let duration_secs = if ms > 0.0 {
                    ms / 1000.0
                } else {
                    DEFAULT_FRAME_SECS
                };
                AnimationFrame {
                    image: letterbox(f.buffer(), canvas),
                    duration_secs,
                }
            })
            .collect::<Vec<_>>()
    } else {
        let still = image::load_from_memory_with_format(bytes, format)
            .context("decode still image")?
            .to_rgba8();
        vec![AnimationFrame {
            image: letterbox(&still, canvas),
            duration_secs: DEFAULT_FRAME_SECS,
        }]
    };

    if frames.is_empty() {
        return Err(FlyError::asset("animation decoded to zero frames"));
    }
    FrameSequence::new(frames)
}

/// Shrink `src` to fit `canvas` preserving aspect ratio and center it on an
/// opaque black canvas. Sources already inside the canvas keep native size.
pub fn letterbox(src: &RgbaImage, canvas: Canvas) -> image::RgbImage {
    let (sw, sh) = src.dimensions();
    let (fw, fh) = fit_within(sw, sh, canvas);

    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, Rgba([0, 0, 0, 255]));
    if fw > 0 && fh > 0 {
        let x = i64::from((canvas.width - fw) / 2);
        let y = i64::from((canvas.height - fh) / 2);
        if (fw, fh) == (sw, sh) {
            imageops::overlay(&mut out, src, x, y);
        } else {
            let scaled = imageops::resize(src, fw, fh, FilterType::Lanczos3);
            imageops::overlay(&mut out, &scaled, x, y);
        }
    }
    DynamicImage::ImageRgba8(out).to_rgb8()
}

fn fit_within(w: u32, h: u32, canvas: Canvas) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (0, 0);
    }
    if w <= canvas.width && h <= canvas.height {
        return (w, h);
    }
    let sx = f64::from(canvas.width) / f64::from(w);
    let sy = f64::from(canvas.height) / f64::from(h);
    let scale = sx.min(sy);
    let fw = ((f64::from(w) * scale).round() as u32).clamp(1, canvas.width);
    let fh = ((f64::from(h) * scale).round() as u32).clamp(1, canvas.height);
    (fw, fh)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/decode.rs"]
mod tests;
