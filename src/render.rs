use crate::bits;
use crate::caption;
use crate::matrix::PixelMatrix;
use crate::text::TextualInformation;
use crate::writer::ImageWriter;
use crate::zlib::CompressSettings;
use crate::Error;

/// How a matrix is turned into a PNG
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Draw only the symbol, without the content as a caption underneath
    pub pure_barcode: bool,
    /// Compression of image data and compressed text chunks
    pub compress_settings: CompressSettings,
    /// Text chunks to embed, if any
    pub textual_information: Option<TextualInformation>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Renders pixel matrices as 1-bit grayscale PNGs, foreground black on white.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Encodes `matrix` as a complete PNG file.
    ///
    /// Unless the options ask for a pure barcode, a non-empty `content` is drawn as a caption
    /// under the symbol, and the image is widened to fit it if needed.
    pub fn render<M: PixelMatrix + ?Sized>(&self, matrix: &M, content: &str) -> Result<Vec<u8>, Error> {
        let include_text = !content.is_empty() && !self.options.pure_barcode;
        let mut width = matrix.width();
        if include_text {
            width = width.max(caption::required_width(content));
        }
        let height = matrix.height();

        let mut writer = ImageWriter::with_settings(
            width,
            height,
            self.options.textual_information.as_ref(),
            self.options.compress_settings,
        )?;

        let row_words = (matrix.width() as usize + 31) / 32;
        let row_bytes = (matrix.width() as usize + 7) / 8;
        let mut words = vec![0u32; row_words];
        let mut current = vec![0u8; row_bytes];
        let mut previous = vec![0u8; row_bytes];
        for y in 0..height {
            let row = matrix.row(y).get(..row_words)
                .ok_or_else(|| Error::InvalidState(format!("matrix row {y} is shorter than its width")))?;
            words.copy_from_slice(row);
            bits::negate_words(&mut words);
            if cfg!(target_endian = "big") {
                // LSB-first pixels must start in the lowest addressed byte
                bits::reverse_endianness(&mut words);
            }
            current.copy_from_slice(&bytemuck::cast_slice::<u32, u8>(&words)[..row_bytes]);
            bits::reverse_bits_in_place(&mut current);

            let previous_line = if y > 0 { Some(&previous[..]) } else { None };
            writer.write_line(&current, previous_line)?;
            std::mem::swap(&mut current, &mut previous);
        }

        if include_text {
            caption::write(&mut writer, content)?;
        }
        writer.finish()?;
        writer.into_png()
    }
}
