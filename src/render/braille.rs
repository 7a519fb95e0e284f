//! Dot-addressable braille canvas, encoded straight to UTF-8 bytes.
//!
//! ### Layout
//! One terminal cell holds a 2×4 dot grid.  The canvas stores one mask byte
//! per cell; pixel `(x, y)` lives in cell `(x / 2, y / 4)`.
//!
//! Every braille scalar U+2800..U+28FF encodes to the fixed pattern
//! `E2 A0+((mask>>6)&3) 80|mask&0x3F`, so [`push_cell`] writes bytes directly
//! without `char::encode_utf8`.

use crate::core::constants::{
    BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR,
};

/// Bit of each dot, `[column][row]` inside the cell.
///
/// Rows 0-2 are the classic six dots; row 3 is the extra bottom pair.
const DOT_BITS: [[u8; VR]; HR] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

#[derive(Clone, Debug)]
pub struct Canvas {
    x_chars: usize,
    y_chars: usize,
    cells: Vec<u8>,
}

impl Canvas {
    #[must_use]
    pub fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            cells: vec![0; x_chars * y_chars],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width_px(&self) -> usize {
        self.x_chars * HR
    }

    #[inline]
    #[must_use]
    pub const fn height_px(&self) -> usize {
        self.y_chars * VR
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= self.width_px() || y >= self.height_px() {
            return None;
        }
        let idx = (y / VR) * self.x_chars + x / HR;
        Some((idx, DOT_BITS[x % HR][y % VR]))
    }

    /// Turn a dot on.  Out-of-range dots are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        if let Some((i, bit)) = self.locate(x, y) {
            self.cells[i] |= bit;
        }
    }

    #[inline]
    pub fn unset(&mut self, x: usize, y: usize) {
        if let Some((i, bit)) = self.locate(x, y) {
            self.cells[i] &= !bit;
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.locate(x, y)
            .is_some_and(|(i, bit)| self.cells[i] & bit != 0)
    }

    /// Vertical run between `y0` and `y1`, both inclusive, either order.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.set(x, y);
        }
    }

    /// Horizontal run between `x0` and `x1`, both inclusive, either order.
    pub fn hline(&mut self, x0: usize, x1: usize, y: usize) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.set(x, y);
        }
    }

    pub fn clear_hline(&mut self, x0: usize, x1: usize, y: usize) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.unset(x, y);
        }
    }

    pub fn fill_rect(&mut self, x0: usize, x1: usize, y0: usize, y1: usize) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.hline(x0, x1, y);
        }
    }

    /// Mask byte of cell `(col, row)`; zero outside the canvas.
    #[inline]
    #[must_use]
    pub fn mask(&self, col: usize, row: usize) -> u8 {
        if col >= self.x_chars || row >= self.y_chars {
            return 0;
        }
        self.cells[row * self.x_chars + col]
    }
}

/// Append the three UTF-8 bytes of the braille glyph for `mask`.
#[inline]
pub fn push_cell(out: &mut Vec<u8>, mask: u8) {
    // https://en.wikipedia.org/wiki/Braille_Patterns
    out.push(0xE2);
    // Most significant two bits: the nonstandard bottom left and right dots
    out.push(0xA0 | ((mask >> 6) & 0x03));
    // Least significant six bits: the normal six dots
    out.push(0x80 | (mask & 0x3F));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(mask: u8) -> String {
        let mut v = Vec::new();
        push_cell(&mut v, mask);
        String::from_utf8(v).unwrap()
    }

    #[test]
    fn encodes_like_char() {
        for mask in [0u8, 0x01, 0x47, 0xB8, 0xFF] {
            let expect = char::from_u32(0x2800 + u32::from(mask)).unwrap();
            assert_eq!(glyph(mask), expect.to_string());
        }
    }

    #[test]
    fn full_left_column() {
        let mut c = Canvas::new(1, 1);
        c.vline(0, 0, 3);
        assert_eq!(c.mask(0, 0), 0x47);
        assert_eq!(glyph(c.mask(0, 0)), "⡇");
        c.vline(1, 3, 0);
        assert_eq!(c.mask(0, 0), 0xFF);
    }

    #[test]
    fn set_unset_and_bounds() {
        let mut c = Canvas::new(2, 2);
        assert_eq!((c.width_px(), c.height_px()), (4, 8));
        c.set(3, 7);
        assert!(c.get(3, 7));
        assert_eq!(c.mask(1, 1), 0x80);
        c.set(4, 0); // ignored
        c.fill_rect(0, 1, 0, 3);
        c.clear_hline(0, 1, 1);
        assert_eq!(c.mask(0, 0), 0xFF & !0x12);
        c.unset(3, 7);
        assert_eq!(c.mask(1, 1), 0);
        assert_eq!(c.mask(9, 9), 0);
    }
}
