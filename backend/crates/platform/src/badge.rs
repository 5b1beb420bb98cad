//! Badge rendering
//!
//! Draws a non-negative count as black digits on a small white PNG.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub const BADGE_WIDTH: u32 = 100;
pub const BADGE_HEIGHT: u32 = 20;

/// Approximate advance per character, used for centering
const CHAR_ADVANCE: i32 = 6;
const TEXT_Y: i32 = 0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// 5x7 digit glyphs, one byte per row, bit 4 is the leftmost column
const DIGITS: [[u8; 7]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
];

/// Error when encoding a badge
#[derive(Debug, thiserror::Error)]
#[error("Badge encoding failed: {0}")]
pub struct BadgeError(#[from] image::ImageError);

/// Render `count` into PNG bytes.
///
/// Text is centered with a fixed per-character width. Counts wider than the
/// canvas are clipped rather than rejected.
pub fn render_badge(count: u64) -> Result<Vec<u8>, BadgeError> {
    let img = draw_badge(count);

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn draw_badge(count: u64) -> RgbImage {
    let mut img = RgbImage::from_pixel(BADGE_WIDTH, BADGE_HEIGHT, WHITE);

    let text = count.to_string();
    let text_width = text.len() as i32 * CHAR_ADVANCE;
    let mut x = (BADGE_WIDTH as i32 - text_width) / 2;

    for digit in text.bytes() {
        draw_glyph(&mut img, &DIGITS[(digit - b'0') as usize], x, TEXT_Y);
        x += CHAR_ADVANCE;
    }

    img
}

fn draw_glyph(img: &mut RgbImage, glyph: &[u8; 7], origin_x: i32, origin_y: i32) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..5 {
            if bits & (0x10 >> col) == 0 {
                continue;
            }
            let px = origin_x + col;
            let py = origin_y + row as i32;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, BLACK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> RgbImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .expect("valid png")
            .to_rgb8()
    }

    fn black_pixels(img: &RgbImage) -> usize {
        img.pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_render_zero() {
        let img = decode(&render_badge(0).unwrap());
        assert_eq!(img.dimensions(), (BADGE_WIDTH, BADGE_HEIGHT));

        // "0" is one glyph starting at x = (100 - 6) / 2 = 47; its top row
        // lights columns 1..=3.
        assert_eq!(*img.get_pixel(47, 0), WHITE);
        assert_eq!(*img.get_pixel(48, 0), BLACK);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(99, 19), WHITE);
    }

    #[test]
    fn test_render_large_count() {
        let img = decode(&render_badge(123_456_789).unwrap());
        assert_eq!(img.dimensions(), (BADGE_WIDTH, BADGE_HEIGHT));
        assert!(black_pixels(&img) > 0);
    }

    #[test]
    fn test_render_overflowing_count_is_clipped() {
        let img = decode(&render_badge(u64::MAX).unwrap());
        assert_eq!(img.dimensions(), (BADGE_WIDTH, BADGE_HEIGHT));
        assert!(black_pixels(&img) > 0);
    }

    #[test]
    fn test_text_stays_in_top_rows() {
        let img = draw_badge(8);
        for (_, y, p) in img.enumerate_pixels() {
            if *p == BLACK {
                assert!(y < 7);
            }
        }
    }

    #[test]
    fn test_digit_count_changes_pixels() {
        assert!(black_pixels(&draw_badge(88)) > black_pixels(&draw_badge(8)));
    }
}
