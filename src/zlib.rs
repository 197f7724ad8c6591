use crate::Error;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Settings for the zlib streams in image data and compressed text chunks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressSettings {
    /// 0 stores without compression, 1 (fastest) to 9 (smallest)
    pub level: u8,
}

impl CompressSettings {
    pub fn new(level: u8) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for CompressSettings {
    fn default() -> Self {
        Self { level: 6 }
    }
}

pub(crate) fn new_compressor<W: Write>(outv: W, settings: &CompressSettings) -> ZlibEncoder<W> {
    let level = settings.level();
    let level = if level == 0 {
        Compression::none()
    } else {
        Compression::new(level.min(9).into())
    };
    ZlibEncoder::new(outv, level)
}

/// Appends the zlib stream of `inp` to `out`
#[inline(never)]
pub(crate) fn compress_into(out: &mut Vec<u8>, inp: &[u8], settings: &CompressSettings) -> Result<(), Error> {
    // compressed barcodes are tiny, a fraction of the input is plenty
    out.try_reserve(inp.len() / 8 + 64)?;
    let mut z = new_compressor(out, settings);
    z.write_all(inp)?;
    z.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn compress(inp: &[u8], settings: &CompressSettings) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        compress_into(&mut out, inp, settings)?;
        Ok(out)
    }

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn every_level_roundtrips() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 7 * 31) as u8).collect();
        for level in 0..=12 {
            let z = compress(&data, &CompressSettings::new(level)).unwrap();
            assert_eq!((u32::from(z[0]) * 256 + u32::from(z[1])) % 31, 0);
            assert_eq!(inflate(&z), data);
        }
    }

    #[test]
    fn appends() {
        let mut out = vec![1, 2, 3];
        compress_into(&mut out, b"abc", &CompressSettings::default()).unwrap();
        assert_eq!(&out[..3], &[1, 2, 3]);
        assert_eq!(inflate(&out[3..]), b"abc");
    }
}
