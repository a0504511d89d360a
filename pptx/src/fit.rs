//! Text-fit heuristic for content slides.
//!
//! There is no layout engine here, so fitting is estimated from character
//! counts: average glyph width is taken as a fraction of the font size and
//! wrapped line counts are derived from the text box width. The font is
//! reduced one point at a time from the theme default down to a floor.

use clubdeck_common::units::EMU_PER_POINT;

/// Smallest bullet size we will shrink to before giving up.
pub const MIN_FONT_PT: u32 = 14;

/// Average glyph width as a fraction of the font size. Tuned for common
/// sans-serif faces at slide sizes.
const GLYPH_WIDTH_RATIO: f64 = 0.55;

/// Single-spaced line height as a fraction of the font size.
const LINE_HEIGHT_RATIO: f64 = 1.25;

/// Extra vertical gap between bullet paragraphs, in font-size fractions.
const PARAGRAPH_GAP_RATIO: f64 = 0.3;

/// Estimated rendered height of `bullets` at `size_pt` inside a box
/// `box_width_emu` wide.
pub fn estimated_height_emu(bullets: &[String], box_width_emu: i64, size_pt: u32) -> i64 {
    let width_pt = box_width_emu as f64 / EMU_PER_POINT as f64;
    let chars_per_line = (width_pt / (GLYPH_WIDTH_RATIO * size_pt as f64)).floor().max(1.0) as usize;

    let mut lines = 0usize;
    for bullet in bullets {
        let chars = bullet.chars().count().max(1);
        lines += chars.div_ceil(chars_per_line);
    }

    let line_height_pt = LINE_HEIGHT_RATIO * size_pt as f64;
    let gaps_pt = PARAGRAPH_GAP_RATIO * size_pt as f64 * bullets.len() as f64;
    let total_pt = lines as f64 * line_height_pt + gaps_pt;
    (total_pt * EMU_PER_POINT as f64).round() as i64
}

/// Pick the largest size, starting at `start_pt` and flooring at
/// [`MIN_FONT_PT`], whose estimated height fits the box.
pub fn fit_font_size(bullets: &[String], box_width_emu: i64, box_height_emu: i64, start_pt: u32) -> u32 {
    let mut size = start_pt.max(MIN_FONT_PT);
    while size > MIN_FONT_PT && estimated_height_emu(bullets, box_width_emu, size) > box_height_emu {
        size -= 1;
    }
    size
}

/// True when the text still does not fit at `size_pt`.
pub fn overflows(bullets: &[String], box_width_emu: i64, box_height_emu: i64, size_pt: u32) -> bool {
    estimated_height_emu(bullets, box_width_emu, size_pt) > box_height_emu
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    // Content box roughly matching the "modern" theme without an image:
    // 8 in wide, 3.75 in tall.
    const BOX_W: i64 = 7_315_200;
    const BOX_H: i64 = 3_429_000;

    #[test]
    fn short_content_keeps_the_theme_size() {
        let b = bullets(&["One point", "Another point", "A third"]);
        assert_eq!(fit_font_size(&b, BOX_W, BOX_H, 22), 22);
        assert!(!overflows(&b, BOX_W, BOX_H, 22));
    }

    #[test]
    fn long_content_shrinks_but_floors_at_minimum() {
        let long_line = "x".repeat(400);
        let b: Vec<String> = (0..10).map(|_| long_line.clone()).collect();
        let size = fit_font_size(&b, BOX_W, 500_000, 22);
        assert_eq!(size, MIN_FONT_PT);
        assert!(overflows(&b, BOX_W, 500_000, size));
    }

    #[test]
    fn longer_text_never_gets_a_larger_size() {
        let short = bullets(&["alpha", "beta"]);
        let mut grown = short.clone();
        for _ in 0..12 {
            grown.push("a considerably longer bullet line that will wrap".to_string());
        }
        let s1 = fit_font_size(&short, BOX_W, BOX_H, 22);
        let s2 = fit_font_size(&grown, BOX_W, BOX_H, 22);
        assert!(s2 <= s1);
    }

    #[test]
    fn estimate_grows_with_font_size() {
        let b = bullets(&["a bullet that wraps across a couple of lines at larger sizes"]);
        assert!(estimated_height_emu(&b, BOX_W, 24) >= estimated_height_emu(&b, BOX_W, 14));
    }
}
