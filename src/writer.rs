//! Incremental writer for 1-bit grayscale, non-interlaced PNGs.
//!
//! Filtered scanlines are collected in memory and deflated into a single `IDAT` chunk
//! on [`ImageWriter::finish`]. Until then the height in `IHDR` can still be changed,
//! and trailing blank rows can be taken back, see [`ImageWriter::ensure_blank_lines`].

use crate::chunk::{self, WriteBigEndian, IDAT, IEND, IHDR, SIGNATURE};
use crate::text::TextualInformation;
use crate::zlib::{self, CompressSettings};
use crate::Error;
use std::io::{Cursor, Write};

const FILTER_NONE: u8 = 0;
const FILTER_UP: u8 = 2;

/// Distance from the start of the `IHDR` chunk to its height field: length, type, width
const IHDR_HEIGHT_OFFSET: u64 = 4 + 4 + 4;
/// Distance from the height field to the `IHDR` CRC: height and the 5 single-byte fields
const IHDR_CRC_FROM_HEIGHT: u64 = 4 + 5;

const DISPOSED: &str = "the writer has already been disposed or finish() was already called";

/// Writes a PNG one scanline at a time.
///
/// Scanlines are packed 8 pixels per byte, most significant bit first, and a set bit is white.
/// Lines narrower than the image are centered (whole bytes) between white margins.
pub struct ImageWriter {
    width: u32,
    width_in_bytes: usize,
    height: u32,
    lines_written: u32,
    /// `None` before anything is known, otherwise how many of the last written rows are blank
    blank_lines: Option<u32>,
    /// Absolute position of the height field in `out`
    height_offset: u64,
    empty_line: Box<[u8]>,
    blank_line: Box<[u8]>,
    /// Filter byte + scanline for every row. `None` once finished.
    scanlines: Option<Cursor<Vec<u8>>>,
    out: Cursor<Vec<u8>>,
    settings: CompressSettings,
    finished: bool,
}

impl ImageWriter {
    /// Starts an image `width` pixels wide and `height` rows tall, with default compression and no text.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Self::with_settings(width, height, None, CompressSettings::default())
    }

    /// Starts an image, writing the signature, `IHDR` and any text chunks right away.
    pub fn with_settings(width: u32, height: u32, text: Option<&TextualInformation>, settings: CompressSettings) -> Result<Self, Error> {
        if width == 0 {
            return Err(Error::ZeroWidth);
        }
        let width_in_bytes = (width as usize + 7) >> 3;
        let mut writer = Self {
            width,
            width_in_bytes,
            height,
            lines_written: 0,
            blank_lines: None,
            height_offset: SIGNATURE.len() as u64 + IHDR_HEIGHT_OFFSET,
            empty_line: vec![0; width_in_bytes].into_boxed_slice(),
            blank_line: vec![u8::MAX; width_in_bytes].into_boxed_slice(),
            scanlines: None,
            out: Cursor::new(Vec::new()),
            settings,
            finished: false,
        };

        writer.write_header()?;
        if let Some(text) = text {
            for (type_, data) in text.chunks(&settings)? {
                chunk::write_chunk(&mut writer.out, &type_, &data)?;
            }
        }

        let capacity = (width_in_bytes + 1)
            .checked_mul(height as usize)
            .ok_or(Error::DimensionOverflow)?;
        let mut scanlines = Vec::new();
        scanlines.try_reserve(capacity)?;
        writer.scanlines = Some(Cursor::new(scanlines));

        log::debug!("started {}x{} png, {} bytes per scanline", width, height, width_in_bytes);
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), Error> {
        self.out.write_all(&SIGNATURE)?;
        debug_assert_eq!(self.height_offset, self.out.position() + IHDR_HEIGHT_OFFSET);

        let mut header = Vec::with_capacity(13);
        header.write_u32_be(self.width)?;
        header.write_u32_be(self.height)?;
        header.push(1); // bit depth
        header.push(0); // grayscale
        header.push(0); // compression method
        header.push(0); // filter method
        header.push(0); // interlace method
        chunk::write_chunk(&mut self.out, &IHDR, &header)
    }

    /// Appends a row.
    ///
    /// If `previous` is the row written just before and equals `current`, the row is stored
    /// with the Up filter as all zeros.
    pub fn write_line(&mut self, current: &[u8], previous: Option<&[u8]>) -> Result<(), Error> {
        let repeat = previous.map_or(false, |p| !p.is_empty() && p == current);
        self.push_line(Some(current), repeat)
    }

    /// Appends an all-white row.
    pub fn write_blank_line(&mut self) -> Result<(), Error> {
        let repeat = self.blank_lines.map_or(false, |n| n > 0);
        self.push_line(None, repeat)
    }

    /// `None` stands for the blank pattern. `repeat` stores the row Up-filtered.
    fn push_line(&mut self, current: Option<&[u8]>, repeat: bool) -> Result<(), Error> {
        let scanlines = self.scanlines.as_mut().ok_or_else(|| Error::InvalidState(DISPOSED.into()))?;
        if self.lines_written >= self.height {
            return Err(Error::RowCountExceeded {
                written: self.lines_written,
                height: self.height,
            });
        }
        let current = current.unwrap_or(&self.blank_line[..]);
        if current.len() > self.width_in_bytes {
            return Err(Error::LineTooWide {
                len: current.len(),
                width: self.width_in_bytes,
            });
        }

        if repeat {
            scanlines.write_all(&[FILTER_UP])?;
            scanlines.write_all(&self.empty_line)?;
            if let Some(n) = self.blank_lines.as_mut().filter(|n| **n > 0) {
                *n += 1;
            }
        } else {
            let total_margin = self.width_in_bytes - current.len();
            let left_margin = total_margin / 2;
            let right_margin = total_margin - left_margin;

            scanlines.write_all(&[FILTER_NONE])?;
            scanlines.write_all(&self.blank_line[..left_margin])?;
            scanlines.write_all(current)?;
            scanlines.write_all(&self.blank_line[..right_margin])?;
            self.blank_lines = Some(u32::from(current == &*self.blank_line));
        }
        self.lines_written += 1;
        Ok(())
    }

    /// Makes room for `count` blank rows starting at the current line.
    ///
    /// Rows already written that are known to be blank are taken back (up to `count` of them),
    /// so they get written again by the caller; the image grows only by the rest.
    pub fn ensure_blank_lines(&mut self, count: u32) -> Result<(), Error> {
        if self.scanlines.is_none() {
            return Err(Error::InvalidState(DISPOSED.into()));
        }

        let lines_to_move_back = self.blank_lines.map_or(0, |n| n.min(count));
        let lines_to_add = count - lines_to_move_back;
        let height = self.height.checked_add(lines_to_add).ok_or(Error::DimensionOverflow)?;
        self.update_height(height)?;

        if lines_to_move_back > 0 {
            let record_len = (self.width_in_bytes + 1) as u64;
            if let Some(scanlines) = self.scanlines.as_mut() {
                let position = scanlines.position() - record_len * u64::from(lines_to_move_back);
                scanlines.set_position(position);
            }
            self.lines_written -= lines_to_move_back;
            self.blank_lines = self.blank_lines.map(|n| n - lines_to_move_back);
        }
        log::trace!("ensured {} blank lines: reused {}, height now {}", count, lines_to_move_back, self.height);
        Ok(())
    }

    /// Rewrites the height in the already written `IHDR`, along with its CRC
    fn update_height(&mut self, height: u32) -> Result<(), Error> {
        let height_offset = self.height_offset;
        if self.height == height {
            return Ok(());
        }
        self.height = height;

        let position = self.out.position();
        self.out.set_position(height_offset);
        self.out.write_u32_be(height)?;

        // CRC covers the chunk type and data, which start 8 bytes before the height
        let crc_offset = height_offset + IHDR_CRC_FROM_HEIGHT;
        let crc = chunk::crc32(&self.out.get_ref()[(height_offset - 8) as usize..crc_offset as usize], 0);
        self.out.set_position(crc_offset);
        self.out.write_u32_be(crc)?;

        self.out.set_position(position);
        Ok(())
    }

    /// Deflates the scanlines into `IDAT` and writes `IEND`.
    ///
    /// All rows must have been written. The scanline buffer is released whether this succeeds
    /// or not, and the writer can't be used for writing afterwards.
    /// On success the output stream is rewound to the start.
    pub fn finish(&mut self) -> Result<(), Error> {
        let scanlines = self.scanlines.take().ok_or_else(|| Error::InvalidState(DISPOSED.into()))?;
        if self.lines_written < self.height {
            return Err(Error::InvalidState(format!(
                "written {} lines, expected {}",
                self.lines_written, self.height
            )));
        }
        if self.height == 0 {
            return Err(Error::InvalidState("an image must have at least one row".into()));
        }

        let len = scanlines.position() as usize;
        let mut deflated = Vec::new();
        zlib::compress_into(&mut deflated, &scanlines.get_ref()[..len], &self.settings)?;
        drop(scanlines);

        chunk::write_chunk(&mut self.out, &IDAT, &deflated)?;
        chunk::write_chunk(&mut self.out, &IEND, &[])?;
        self.out.set_position(0);
        self.finished = true;

        log::debug!(
            "finished {}x{} png: {} bytes of scanlines deflated to {}, {} bytes total",
            self.width, self.height, len, deflated.len(), self.out.get_ref().len()
        );
        Ok(())
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Currently declared height in rows
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_in_bytes(&self) -> usize {
        self.width_in_bytes
    }

    pub fn lines_written(&self) -> u32 {
        self.lines_written
    }

    /// How many of the most recently written rows are known to be blank
    pub fn trailing_blank_lines(&self) -> Option<u32> {
        self.blank_lines
    }

    /// `true` after a successful `finish()`
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The PNG byte stream written so far
    pub fn stream(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.out
    }

    pub fn into_inner(self) -> Cursor<Vec<u8>> {
        self.out
    }

    /// The complete PNG file. Fails unless `finish()` succeeded.
    pub fn into_png(self) -> Result<Vec<u8>, Error> {
        if !self.finished {
            return Err(Error::InvalidState("finish() hasn't completed".into()));
        }
        Ok(self.out.into_inner())
    }
}
