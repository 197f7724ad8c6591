//! Human-readable text under the barcode, drawn with a fixed 8x11 bitmap font.

use crate::writer::ImageWriter;
use crate::Error;

/// Glyph cell size
const GLYPH_WIDTH: u32 = 8;
const GLYPH_HEIGHT: usize = 11;

/// Rows reserved for a caption: one blank row, the glyphs, one blank row
pub const CAPTION_HEIGHT: u32 = GLYPH_HEIGHT as u32 + 2;

/// Width in pixels needed to draw `text`
pub fn required_width(text: &str) -> u32 {
    (text.chars().count() as u32).saturating_mul(GLYPH_WIDTH)
}

/// Appends `text` below whatever has been written so far.
///
/// Blank rows already at the bottom of the image are reused for the caption band,
/// the image only grows by what's missing. Characters without a glyph are left blank.
pub fn write(writer: &mut ImageWriter, text: &str) -> Result<(), Error> {
    writer.ensure_blank_lines(CAPTION_HEIGHT)?;
    writer.write_blank_line()?;

    let len = text.chars().count();
    let mut rows = Vec::new();
    rows.try_reserve(len * GLYPH_HEIGHT)?;
    rows.resize(len * GLYPH_HEIGHT, u8::MAX);
    for (x, c) in text.chars().enumerate() {
        if let Some(glyph) = glyph(c) {
            for (y, &bits) in glyph.iter().enumerate() {
                rows[y * len + x] = bits;
            }
        }
    }
    if len > 0 {
        for row in rows.chunks_exact(len) {
            writer.write_line(row, None)?;
        }
    } else {
        for _ in 0..GLYPH_HEIGHT {
            writer.write_line(&[], None)?;
        }
    }

    writer.write_blank_line()
}

/// Bitmap of `c`, top row first. Bit 7 is the leftmost pixel, a set bit is background.
pub fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    Some(match c {
        'a' => [0xFF, 0xFF, 0xFF, 0xC7, 0xFB, 0xC3, 0xBB, 0xBB, 0xC3, 0xFF, 0xFF],
        'b' => [0xBF, 0xBF, 0xBF, 0x87, 0xBB, 0xBB, 0xBB, 0xBB, 0x87, 0xFF, 0xFF],
        'c' => [0xFF, 0xFF, 0xFF, 0xC7, 0xBB, 0xBF, 0xBF, 0xBB, 0xC7, 0xFF, 0xFF],
        'd' => [0xFB, 0xFB, 0xFB, 0xC3, 0xBB, 0xBB, 0xBB, 0xBB, 0xC3, 0xFF, 0xFF],
        'e' => [0xFF, 0xFF, 0xFF, 0xC7, 0xBB, 0x83, 0xBF, 0xBB, 0xC7, 0xFF, 0xFF],
        'f' => [0xE7, 0xDB, 0xDF, 0xDF, 0x87, 0xDF, 0xDF, 0xDF, 0xDF, 0xFF, 0xFF],
        'g' => [0xFF, 0xFF, 0xFF, 0xC7, 0xBB, 0xBB, 0xBB, 0xC3, 0xFB, 0xBB, 0xC7],
        'h' => [0xBF, 0xBF, 0xBF, 0xA7, 0x9B, 0xBB, 0xBB, 0xBB, 0xBB, 0xFF, 0xFF],
        'i' => [0xFF, 0xEF, 0xFF, 0xCF, 0xEF, 0xEF, 0xEF, 0xEF, 0xC7, 0xFF, 0xFF],
        'j' => [0xFF, 0xF7, 0xFF, 0xE7, 0xF7, 0xF7, 0xF7, 0xF7, 0xB7, 0xB7, 0xCF],
        'k' => [0xBF, 0xBF, 0xBF, 0xB7, 0xAF, 0x9F, 0xAF, 0xB7, 0xBB, 0xFF, 0xFF],
        'l' => [0xCF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xC7, 0xFF, 0xFF],
        'm' => [0xFF, 0xFF, 0xFF, 0x97, 0xAB, 0xAB, 0xAB, 0xAB, 0xBB, 0xFF, 0xFF],
        'n' => [0xFF, 0xFF, 0xFF, 0xA7, 0x9B, 0xBB, 0xBB, 0xBB, 0xBB, 0xFF, 0xFF],
        'o' => [0xFF, 0xFF, 0xFF, 0xC7, 0xBB, 0xBB, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        'p' => [0xFF, 0xFF, 0xFF, 0x87, 0xBB, 0xBB, 0xBB, 0x87, 0xBF, 0xBF, 0xBF],
        'q' => [0xFF, 0xFF, 0xFF, 0xC3, 0xBB, 0xBB, 0xBB, 0xC3, 0xFB, 0xFB, 0xFB],
        'r' => [0xFF, 0xFF, 0xFF, 0xA7, 0x9B, 0xBF, 0xBF, 0xBF, 0xBF, 0xFF, 0xFF],
        's' => [0xFF, 0xFF, 0xFF, 0xC7, 0xBB, 0xCF, 0xF7, 0xBB, 0xC7, 0xFF, 0xFF],
        't' => [0xFF, 0xDF, 0xDF, 0x87, 0xDF, 0xDF, 0xDF, 0xDB, 0xE7, 0xFF, 0xFF],
        'u' => [0xFF, 0xFF, 0xFF, 0xBB, 0xBB, 0xBB, 0xBB, 0xB3, 0xCB, 0xFF, 0xFF],
        'v' => [0xFF, 0xFF, 0xFF, 0xBB, 0xBB, 0xBB, 0xD7, 0xD7, 0xEF, 0xFF, 0xFF],
        'w' => [0xFF, 0xFF, 0xFF, 0xBB, 0xBB, 0xAB, 0xAB, 0xAB, 0xD7, 0xFF, 0xFF],
        'x' => [0xFF, 0xFF, 0xFF, 0xBB, 0xD7, 0xEF, 0xEF, 0xD7, 0xBB, 0xFF, 0xFF],
        'y' => [0xFF, 0xFF, 0xFF, 0xBB, 0xBB, 0xBB, 0xB3, 0xCB, 0xFB, 0xBB, 0xC7],
        'z' => [0xFF, 0xFF, 0xFF, 0x83, 0xF7, 0xEF, 0xDF, 0xBF, 0x83, 0xFF, 0xFF],
        'A' => [0xEF, 0xD7, 0xBB, 0xBB, 0xBB, 0x83, 0xBB, 0xBB, 0xBB, 0xFF, 0xFF],
        'B' => [0x87, 0xDB, 0xDB, 0xDB, 0xC7, 0xDB, 0xDB, 0xDB, 0x87, 0xFF, 0xFF],
        'C' => [0xC7, 0xBB, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBB, 0xC7, 0xFF, 0xFF],
        'D' => [0x87, 0xDB, 0xDB, 0xDB, 0xDB, 0xDB, 0xDB, 0xDB, 0x87, 0xFF, 0xFF],
        'E' => [0x83, 0xBF, 0xBF, 0xBF, 0x87, 0xBF, 0xBF, 0xBF, 0x83, 0xFF, 0xFF],
        'F' => [0x83, 0xBF, 0xBF, 0xBF, 0x87, 0xBF, 0xBF, 0xBF, 0xBF, 0xFF, 0xFF],
        'G' => [0xC7, 0xBB, 0xBF, 0xBF, 0xBF, 0xB3, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        'H' => [0xBB, 0xBB, 0xBB, 0xBB, 0x83, 0xBB, 0xBB, 0xBB, 0xBB, 0xFF, 0xFF],
        'I' => [0xC7, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xC7, 0xFF, 0xFF],
        'J' => [0xE3, 0xF7, 0xF7, 0xF7, 0xF7, 0xF7, 0xF7, 0xB7, 0xCF, 0xFF, 0xFF],
        'K' => [0xBB, 0xBB, 0xB7, 0xAF, 0x9F, 0xAF, 0xB7, 0xBB, 0xBB, 0xFF, 0xFF],
        'L' => [0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0x83, 0xFF, 0xFF],
        'M' => [0xBB, 0xBB, 0x93, 0xAB, 0xAB, 0xBB, 0xBB, 0xBB, 0xBB, 0xFF, 0xFF],
        'N' => [0xBB, 0x9B, 0x9B, 0xAB, 0xAB, 0xB3, 0xB3, 0xBB, 0xBB, 0xFF, 0xFF],
        'O' => [0xC7, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        'P' => [0x87, 0xBB, 0xBB, 0xBB, 0x87, 0xBF, 0xBF, 0xBF, 0xBF, 0xFF, 0xFF],
        'Q' => [0xC7, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xAB, 0xC7, 0xFB, 0xFF],
        'R' => [0x87, 0xBB, 0xBB, 0xBB, 0x87, 0xAF, 0xB7, 0xBB, 0xBB, 0xFF, 0xFF],
        'S' => [0xC7, 0xBB, 0xBF, 0xBF, 0xC7, 0xFB, 0xFB, 0xBB, 0xC7, 0xFF, 0xFF],
        'T' => [0x83, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xFF, 0xFF],
        'U' => [0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        'V' => [0xBB, 0xBB, 0xBB, 0xBB, 0xD7, 0xD7, 0xD7, 0xEF, 0xEF, 0xFF, 0xFF],
        'W' => [0xBB, 0xBB, 0xBB, 0xBB, 0xAB, 0xAB, 0xAB, 0x93, 0xBB, 0xFF, 0xFF],
        'X' => [0xBB, 0xBB, 0xD7, 0xD7, 0xEF, 0xD7, 0xD7, 0xBB, 0xBB, 0xFF, 0xFF],
        'Y' => [0xBB, 0xBB, 0xD7, 0xD7, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xFF, 0xFF],
        'Z' => [0x83, 0xFB, 0xF7, 0xF7, 0xEF, 0xDF, 0xDF, 0xBF, 0x83, 0xFF, 0xFF],
        '0' => [0xEF, 0xD7, 0xBB, 0xBB, 0xBB, 0xBB, 0xBB, 0xD7, 0xEF, 0xFF, 0xFF],
        '1' => [0xEF, 0xCF, 0xAF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0x83, 0xFF, 0xFF],
        '2' => [0xC7, 0xBB, 0xBB, 0xFB, 0xF7, 0xEF, 0xDF, 0xBF, 0x83, 0xFF, 0xFF],
        '3' => [0x83, 0xFB, 0xF7, 0xEF, 0xC7, 0xFB, 0xFB, 0xBB, 0xC7, 0xFF, 0xFF],
        '4' => [0xF7, 0xF7, 0xE7, 0xD7, 0xD7, 0xB7, 0x83, 0xF7, 0xF7, 0xFF, 0xFF],
        '5' => [0x83, 0xBF, 0xBF, 0xA7, 0x9B, 0xFB, 0xFB, 0xBB, 0xC7, 0xFF, 0xFF],
        '6' => [0xC7, 0xBB, 0xBF, 0xBF, 0x87, 0xBB, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        '7' => [0x83, 0xFB, 0xF7, 0xF7, 0xEF, 0xEF, 0xDF, 0xDF, 0xDF, 0xFF, 0xFF],
        '8' => [0xC7, 0xBB, 0xBB, 0xBB, 0xC7, 0xBB, 0xBB, 0xBB, 0xC7, 0xFF, 0xFF],
        '9' => [0xC7, 0xBB, 0xBB, 0xBB, 0xC3, 0xFB, 0xFB, 0xBB, 0xC7, 0xFF, 0xFF],
        '.' => [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xEF, 0xC7, 0xEF, 0xFF],
        ':' => [0xFF, 0xFF, 0xEF, 0xC7, 0xEF, 0xFF, 0xFF, 0xEF, 0xC7, 0xEF, 0xFF],
        ',' => [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xE7, 0xEF, 0xDF, 0xFF],
        ';' => [0xFF, 0xFF, 0xEF, 0xC7, 0xEF, 0xFF, 0xFF, 0xE7, 0xEF, 0xDF, 0xFF],
        '(' => [0xF7, 0xEF, 0xEF, 0xDF, 0xDF, 0xDF, 0xEF, 0xEF, 0xF7, 0xFF, 0xFF],
        ')' => [0xDF, 0xEF, 0xEF, 0xF7, 0xF7, 0xF7, 0xEF, 0xEF, 0xDF, 0xFF, 0xFF],
        '"' => [0xD7, 0xD7, 0xD7, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
        '*' => [0xFF, 0xEF, 0xAB, 0x83, 0xC7, 0x83, 0xAB, 0xEF, 0xFF, 0xFF, 0xFF],
        '!' => [0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xEF, 0xFF, 0xEF, 0xFF, 0xFF],
        '?' => [0xC7, 0xBB, 0xBB, 0xFB, 0xF7, 0xEF, 0xEF, 0xFF, 0xEF, 0xFF, 0xFF],
        '\'' => [0xE7, 0xEF, 0xDF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
        _ => return None,
    })
}
