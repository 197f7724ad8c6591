use crate::Error;
use std::io::{self, Write};

/// 8 bytes PNG signature, aka the magic bytes
pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// 4-letter chunk name
pub type ChunkType = [u8; 4];

pub const IHDR: ChunkType = *b"IHDR";
pub const IDAT: ChunkType = *b"IDAT";
pub const IEND: ChunkType = *b"IEND";
pub const TEXT: ChunkType = *b"tEXt";
pub const ZTXT: ChunkType = *b"zTXt";
pub const ITXT: ChunkType = *b"iTXt";

/// Largest chunk payload the PNG format allows
const MAX_CHUNK_LEN: usize = (1 << 31) - 1;

/// Fixed-width big-endian integers, independent of the host byte order.
pub trait WriteBigEndian: Write {
    fn write_u32_be(&mut self, value: u32) -> io::Result<()> {
        self.write_all(&value.to_be_bytes())
    }

    fn write_i32_be(&mut self, value: i32) -> io::Result<()> {
        self.write_all(&value.to_be_bytes())
    }

    fn write_u64_be(&mut self, value: u64) -> io::Result<()> {
        self.write_all(&value.to_be_bytes())
    }
}

impl<W: Write + ?Sized> WriteBigEndian for W {}

/// CRC-32 of `data`, continuing from a previous result `seed` (0 to start).
///
/// `crc32(b, crc32(a, 0)) == crc32(a ++ b, 0)`
pub fn crc32(data: &[u8], seed: u32) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(seed);
    hasher.update(data);
    hasher.finalize()
}

/// Writes a whole chunk: length, type, data, then the CRC of type and data.
pub fn write_chunk<W: Write + ?Sized>(out: &mut W, type_: &ChunkType, data: &[u8]) -> Result<(), Error> {
    if data.len() > MAX_CHUNK_LEN {
        return Err(Error::ChunkTooLarge(data.len()));
    }
    out.write_u32_be(data.len() as u32)?;
    out.write_all(type_)?;
    out.write_all(data)?;
    // the length field is not part of the CRC
    let crc = crc32(data, crc32(type_, 0));
    out.write_u32_be(crc)?;
    Ok(())
}
