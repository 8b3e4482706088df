use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};

use super::*;
use crate::frames::synth::SynthParams;
use crate::render::glyphs::MonoGlyphs;

fn frame(v: u8, secs: f64) -> AnimationFrame {
    AnimationFrame {
        image: RgbImage::from_pixel(2, 2, image::Rgb([v, v, v])),
        duration_secs: secs,
    }
}

fn params(glyphs: &MonoGlyphs) -> SynthParams<'_> {
    SynthParams {
        frame_secs: 0.5,
        show_text: true,
        show_score: true,
        banner_text: "CUBS WIN!",
        score_label: "",
        glyphs,
    }
}

fn tiny_gif() -> Arc<[u8]> {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new(Cursor::new(&mut buf));
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        enc.encode_frames(vec![
            Frame::from_parts(img.clone(), 0, 0, Delay::from_numer_denom_ms(40, 1)),
            Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(40, 1)),
        ])
        .unwrap();
    }
    buf.into()
}

#[test]
fn empty_sequence_is_rejected() {
    assert!(matches!(FrameSequence::new(vec![]), Err(FlyError::Asset(_))));
}

#[test]
fn get_wraps_around() {
    let seq = FrameSequence::new(vec![frame(0, 0.1), frame(1, 0.2), frame(2, 0.3)]).unwrap();
    assert_eq!(seq.len(), 3);
    assert!(!seq.is_empty());
    assert_eq!(seq.get(3), seq.get(0));
    assert_eq!(seq.get(7).duration_secs, 0.2);
}

#[test]
fn no_asset_synthesizes() {
    let glyphs = MonoGlyphs::default();
    let source = FrameSource::new(AnimationAsset::None, Canvas::new(32, 16).unwrap());
    let set = source.build(&params(&glyphs));
    assert!(!set.is_decoded());
    assert!(matches!(set, FrameSet::Synthesized(_)));
    assert_eq!(set.frames().len(), 16);
    assert_eq!(set.frames().get(0).duration_secs, 0.5);
}

#[test]
fn broken_or_missing_assets_fall_back_to_synthesis() {
    let glyphs = MonoGlyphs::default();
    let canvas = Canvas::new(32, 16).unwrap();

    let garbage = FrameSource::new(AnimationAsset::Bytes(Arc::from(&b"nope"[..])), canvas);
    assert!(!garbage.build(&params(&glyphs)).is_decoded());

    let missing = FrameSource::new(
        AnimationAsset::Path(PathBuf::from("/definitely/not/here/fly-the-w.gif")),
        canvas,
    );
    let set = missing.build(&params(&glyphs));
    assert!(!set.is_decoded());
    assert_eq!(set.frames().get(0).image.dimensions(), (32, 16));
}

#[test]
fn valid_asset_decodes() {
    let glyphs = MonoGlyphs::default();
    let source = FrameSource::new(AnimationAsset::Bytes(tiny_gif()), Canvas::new(32, 16).unwrap());
    let set = source.build(&params(&glyphs));
    assert!(set.is_decoded());
    assert_eq!(set.frames().len(), 2);
    assert!((set.frames().get(1).duration_secs - 0.04).abs() < 1e-9);
    assert_eq!(set.frames().get(0).image.dimensions(), (32, 16));
}
