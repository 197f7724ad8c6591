/// Source of the barcode pixels.
///
/// Rows are packed 32 pixels per word: pixel `x` is bit `x % 32` (least significant first)
/// of word `x / 32`. A set bit is a foreground (dark) module.
pub trait PixelMatrix {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Packed row `y`, at least `ceil(width / 32)` words long
    fn row(&self, y: u32) -> &[u32];
}

/// Row-major 2D bit grid in the layout [`PixelMatrix`] describes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    row_size: usize,
    bits: Vec<u32>,
}

impl BitMatrix {
    /// All-background matrix
    pub fn new(width: u32, height: u32) -> Self {
        let row_size = (width as usize + 31) / 32;
        Self {
            width,
            height,
            row_size,
            bits: vec![0; row_size * height as usize],
        }
    }

    /// Builds a matrix from text rows, where `#` or `X` is foreground and anything else background.
    /// The width is that of the longest row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().chars().count()).max().unwrap_or(0);
        let mut m = Self::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                if c == '#' || c == 'X' {
                    m.set(x as u32, y as u32);
                }
            }
        }
        m
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> (usize, u32) {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.row_size + (x as usize >> 5), x & 31)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        let (i, bit) = self.offset(x, y);
        (self.bits[i] >> bit) & 1 != 0
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let (i, bit) = self.offset(x, y);
        self.bits[i] |= 1 << bit;
    }

    pub fn unset(&mut self, x: u32, y: u32) {
        let (i, bit) = self.offset(x, y);
        self.bits[i] &= !(1 << bit);
    }

    pub fn flip(&mut self, x: u32, y: u32) {
        let (i, bit) = self.offset(x, y);
        self.bits[i] ^= 1 << bit;
    }

    /// Sets a `width` x `height` rectangle whose top left corner is at `left`, `top`
    pub fn set_region(&mut self, left: u32, top: u32, width: u32, height: u32) {
        for y in top..top + height {
            for x in left..left + width {
                self.set(x, y);
            }
        }
    }

    pub fn clear(&mut self) {
        self.bits.iter_mut().for_each(|w| *w = 0);
    }
}

impl PixelMatrix for BitMatrix {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.row_size;
        &self.bits[start..start + self.row_size]
    }
}

impl<M: PixelMatrix + ?Sized> PixelMatrix for &M {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn row(&self, y: u32) -> &[u32] {
        (**self).row(y)
    }
}
