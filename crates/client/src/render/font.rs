//! 5x7 bitmap font for grid captions.
//!
//! Covers the characters a token can contain: uppercase letters, digits and
//! the lowercase `x` separator. Each glyph row is five bits, most significant
//! bit leftmost.

use image::{Rgba, RgbaImage};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal distance between consecutive glyph origins.
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const LETTERS: [Glyph; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

const SMALL_X: Glyph = [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001];

/// Bitmap for `c`, or `None` if the font has no glyph for it.
pub fn glyph(c: char) -> Option<&'static Glyph> {
    match c {
        'A'..='Z' => Some(&LETTERS[(c as u8 - b'A') as usize]),
        '0'..='9' => Some(&DIGITS[(c as u8 - b'0') as usize]),
        'x' => Some(&SMALL_X),
        _ => None,
    }
}

/// Pixel width of `text` set in this font.
pub fn text_width(text: &str) -> u32 {
    match text.chars().count() as u32 {
        0 => 0,
        n => n * ADVANCE - 1,
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Characters without a glyph leave a blank advance. Pixels falling outside
/// the canvas are clipped.
pub fn draw_text(canvas: &mut RgbaImage, x: u32, y: u32, text: &str, color: Rgba<u8>) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let gx = x + i as u32 * ADVANCE;

        for (dy, bits) in rows.iter().enumerate() {
            for dx in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - dx)) == 0 {
                    continue;
                }
                let (px, py) = (gx + dx, y + dy as u32);
                if px < canvas.width() && py < canvas.height() {
                    canvas.put_pixel(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn inked(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_token_characters_have_glyphs() {
        for c in "ABCDEFGHJKLMNPQRSTUVWYZ0123456789x".chars() {
            assert!(glyph(c).is_some(), "missing glyph for {c:?}");
        }
        assert!(glyph('-').is_none());
    }

    #[test]
    fn test_glyphs_fit_width_and_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for c in ('A'..='Z').chain('0'..='9').chain(['x']) {
            let rows = glyph(c).unwrap();
            assert!(rows.iter().all(|r| *r < (1 << GLYPH_WIDTH)), "{c:?} overflows");
            assert!(seen.insert(*rows), "{c:?} duplicates another glyph");
        }
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 5);
        assert_eq!(text_width("XYZx23"), 35);
    }

    #[test]
    fn test_draw_single_glyph() {
        let mut canvas = RgbaImage::from_pixel(10, 10, WHITE);
        draw_text(&mut canvas, 2, 1, "L", BLACK);

        for dy in 0..7 {
            assert_eq!(*canvas.get_pixel(2, 1 + dy), BLACK);
        }
        for dx in 0..5 {
            assert_eq!(*canvas.get_pixel(2 + dx, 7), BLACK);
        }
        assert_eq!(inked(&canvas), 11);
        assert_eq!(*canvas.get_pixel(3, 1), WHITE);
    }

    #[test]
    fn test_draw_clips_at_edges() {
        let mut canvas = RgbaImage::from_pixel(8, 4, WHITE);
        draw_text(&mut canvas, 4, 0, "HH", BLACK);
        assert!(inked(&canvas) > 0);
    }

    #[test]
    fn test_unknown_characters_leave_gap() {
        let mut with_gap = RgbaImage::from_pixel(20, 8, WHITE);
        draw_text(&mut with_gap, 0, 0, "-1", BLACK);

        let mut shifted = RgbaImage::from_pixel(20, 8, WHITE);
        draw_text(&mut shifted, ADVANCE, 0, "1", BLACK);

        assert_eq!(with_gap, shifted);
    }
}
