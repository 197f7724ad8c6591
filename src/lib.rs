//! Renders barcode pixel matrices as small 1-bit grayscale PNG files.
//!
//! ```rust
//! let mut matrix = barpng::BitMatrix::new(21, 21);
//! matrix.set_region(0, 0, 7, 7);
//! let png = barpng::render(&matrix, "HELLO", true)?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<_, barpng::Error>(())
//! ```
//!
//! For more control use [`Renderer`] with [`RenderOptions`], or write scanlines
//! yourself with [`ImageWriter`].

pub mod bits;
pub mod chunk;
pub mod caption;
mod error;
mod matrix;
mod render;
mod text;
mod writer;
mod zlib;

pub use crate::error::Error;
pub use crate::matrix::{BitMatrix, PixelMatrix};
pub use crate::render::{RenderOptions, Renderer};
pub use crate::text::{Keyword, TextData, TextualInformation};
pub use crate::writer::ImageWriter;
pub use crate::zlib::CompressSettings;

/// Encodes `matrix` as a PNG file, black on white.
///
/// With `caption` set, a non-empty `content` is printed under the symbol.
pub fn render<M: PixelMatrix + ?Sized>(matrix: &M, content: &str, caption: bool) -> Result<Vec<u8>, Error> {
    let options = RenderOptions {
        pure_barcode: !caption,
        ..RenderOptions::default()
    };
    Renderer::with_options(options).render(matrix, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_descriptions() {
        assert_eq!(Error::ZeroWidth.as_str(), "zero width");
        let e = Error::RowCountExceeded { written: 3, height: 3 };
        assert_eq!(e.to_string(), "already written 3 lines, image height is 3");
        let e: Error = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err().into();
        assert!(matches!(e, Error::OutOfMemory));
    }

    #[test]
    fn caption_flag() {
        let m = BitMatrix::from_rows(&["#.#"]);
        assert_eq!(render(&m, "ab", false).unwrap(), Renderer::with_options(RenderOptions {
            pure_barcode: true,
            ..Default::default()
        }).render(&m, "zz").unwrap());
        assert_eq!(render(&m, "ab", true).unwrap(), Renderer::new().render(&m, "ab").unwrap());
    }
}
