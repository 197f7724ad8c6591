use crate::text::Keyword;
use std::collections::TryReserveError;
use std::io;

/// Everything that can go wrong while producing a PNG.
///
/// Apart from `Io` and `OutOfMemory`, these are contract violations by the caller.
/// After any of them the writer that reported it must not be reused.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The writer was used after `finish()`, `finish()` came too early, or a matrix row was truncated
    #[error("invalid writer state: {0}")]
    InvalidState(String),
    #[error("already written {written} lines, image height is {height}")]
    RowCountExceeded { written: u32, height: u32 },
    /// Height patched before the header was committed. Not produced by
    /// [`ImageWriter`](crate::ImageWriter), which writes its header on construction.
    #[error("height hasn't been set yet")]
    HeightNotSet,
    #[error("scanline of {len} bytes doesn't fit in {width} bytes")]
    LineTooWide { len: usize, width: usize },
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,
    #[error("chunk data of {0} bytes exceeds 2^31-1")]
    ChunkTooLarge(usize),
    #[error("image dimensions overflow")]
    DimensionOverflow,
    #[error("text for {0:?} can't be encoded as Latin-1")]
    NotLatin1(Keyword),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("out of memory")]
    OutOfMemory,
}

impl Error {
    /// Returns a short English description of the kind of error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidState(_) => "invalid state",
            Error::RowCountExceeded { .. } => "row count exceeded",
            Error::HeightNotSet => "height not set",
            Error::LineTooWide { .. } => "line too wide",
            Error::ZeroWidth => "zero width",
            Error::ChunkTooLarge(_) => "chunk too large",
            Error::DimensionOverflow => "dimension overflow",
            Error::NotLatin1(_) => "text not Latin-1",
            Error::Io(_) => "I/O error",
            Error::OutOfMemory => "out of memory",
        }
    }
}

#[doc(hidden)]
impl From<TryReserveError> for Error {
    #[cold]
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
