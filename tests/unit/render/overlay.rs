use super::*;
use crate::render::glyphs::MonoGlyphs;

fn base() -> RgbImage {
    RgbImage::from_pixel(64, 32, Rgb([14, 51, 134]))
}

fn win() -> WinRecord {
    WinRecord {
        team_abbr: "CHC".into(),
        opponent_abbr: "SIM".into(),
        team_score: 7,
        opponent_score: 4,
    }
}

fn opts(show_text: bool, show_score: bool, flash_on: bool) -> OverlayOpts<'static> {
    OverlayOpts {
        banner_text: "CUBS WIN!",
        show_text,
        show_score,
        flash_on,
    }
}

fn count(img: &RgbImage, c: Rgb<u8>) -> usize {
    img.pixels().filter(|p| **p == c).count()
}

#[test]
fn base_frame_is_never_mutated() {
    let b = base();
    let before = b.clone();
    let out = compose(&b, Some(&win()), opts(true, true, true), &MonoGlyphs::default());
    assert_eq!(b, before);
    assert_ne!(out, before);
}

#[test]
fn banner_only_when_text_enabled_and_flash_on() {
    let g = MonoGlyphs::default();
    let on = compose(&base(), None, opts(true, false, true), &g);
    assert!(count(&on, GOLD) > 0);
    assert!(count(&on, BLACK) > 0, "shadow pass");

    let off = compose(&base(), None, opts(true, false, false), &g);
    assert_eq!(off, base());

    let hidden = compose(&base(), None, opts(false, false, true), &g);
    assert_eq!(hidden, base());
}

#[test]
fn banner_is_centered_at_top() {
    let g = MonoGlyphs::default();
    let out = compose(&base(), None, opts(true, false, true), &g);
    // 36px wide on 64 -> x in 14..50 (+1 for the shadow)
    let gold_x: Vec<u32> = out
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == GOLD)
        .map(|(x, _, _)| x)
        .collect();
    assert!(gold_x.iter().all(|&x| (14..50).contains(&x)));
    let gold_y_max = out
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == GOLD)
        .map(|(_, y, _)| y)
        .max()
        .unwrap();
    assert!(gold_y_max < 8);
}

#[test]
fn score_lines_are_right_aligned_in_two_colors() {
    let g = MonoGlyphs::default();
    let out = compose(&base(), Some(&win()), opts(false, true, true), &g);
    let white: Vec<(u32, u32)> = out
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == WHITE)
        .map(|(x, y, _)| (x, y))
        .collect();
    let red: Vec<(u32, u32)> = out
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == TEAM_RED)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!white.is_empty() && !red.is_empty());
    // "CHC 7" is 20px wide: x in 43..63
    assert!(white.iter().all(|&(x, y)| (43..63).contains(&x) && y < 8));
    // opponent line sits below
    assert!(red.iter().all(|&(_, y)| y >= 8));
}

#[test]
fn score_needs_a_win_record() {
    let g = MonoGlyphs::default();
    let out = compose(&base(), None, opts(false, true, true), &g);
    assert_eq!(out, base());
}

#[test]
fn overflow_is_tolerated() {
    let g = MonoGlyphs::default();
    let small = RgbImage::new(8, 4);
    let out = compose(&small, Some(&win()), opts(true, true, true), &g);
    assert_eq!(out.dimensions(), (8, 4));
}
