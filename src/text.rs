//! Textual metadata stored in `tEXt`, `zTXt` and `iTXt` chunks.

use crate::chunk::{ChunkType, ITXT, TEXT, ZTXT};
use crate::zlib::{self, CompressSettings};
use crate::Error;
use std::collections::BTreeMap;

/// Predefined PNG text keywords. Chunks are written in the order listed here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Keyword {
    /// Short (one line) title or caption for image
    Title,
    /// Name of image's creator
    Author,
    /// Description of image (possibly long)
    Description,
    /// Copyright notice
    Copyright,
    /// Time of original image creation
    CreationTime,
    /// Software used to create the image
    Software,
    /// Legal disclaimer
    Disclaimer,
    /// Warning of nature of content
    Warning,
    /// Device used to create the image
    Source,
    /// Miscellaneous comment
    Comment,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::Title,
        Keyword::Author,
        Keyword::Description,
        Keyword::Copyright,
        Keyword::CreationTime,
        Keyword::Software,
        Keyword::Disclaimer,
        Keyword::Warning,
        Keyword::Source,
        Keyword::Comment,
    ];

    /// The keyword as written into the chunk
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Title => "Title",
            Keyword::Author => "Author",
            Keyword::Description => "Description",
            Keyword::Copyright => "Copyright",
            Keyword::CreationTime => "Creation Time",
            Keyword::Software => "Software",
            Keyword::Disclaimer => "Disclaimer",
            Keyword::Warning => "Warning",
            Keyword::Source => "Source",
            Keyword::Comment => "Comment",
        }
    }
}

/// A text value and how it should be stored.
///
/// | `utf8` | `compress` | chunk  |
/// |--------|------------|--------|
/// | false  | false      | `tEXt` |
/// | false  | true       | `zTXt` |
/// | true   | either     | `iTXt` |
///
/// `tEXt` and `zTXt` hold Latin-1 text only.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextData {
    pub text: String,
    pub compress: bool,
    pub utf8: bool,
}

impl TextData {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), compress: false, utf8: false }
    }

    #[must_use]
    pub fn compressed(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    #[must_use]
    pub fn utf8(mut self, utf8: bool) -> Self {
        self.utf8 = utf8;
        self
    }

    pub fn chunk_type(&self) -> ChunkType {
        if self.utf8 {
            ITXT
        } else if self.compress {
            ZTXT
        } else {
            TEXT
        }
    }

    /// Chunk payload for this text under `keyword`
    pub fn chunk_data(&self, keyword: Keyword, settings: &CompressSettings) -> Result<Vec<u8>, Error> {
        let key = keyword.as_str().as_bytes();
        let mut data = Vec::new();
        if self.utf8 {
            // keyword, 0, compression flag, compression method, language tag, 0, translated keyword, 0, text
            let text = self.text.as_bytes();
            data.try_reserve(key.len() + 5 + text.len())?;
            data.extend_from_slice(key);
            data.push(0);
            data.push(self.compress as u8);
            data.push(0);
            data.push(0);
            data.push(0);
            if self.compress {
                zlib::compress_into(&mut data, text, settings)?;
            } else {
                data.extend_from_slice(text);
            }
        } else {
            let text = latin1(&self.text).ok_or(Error::NotLatin1(keyword))?;
            data.try_reserve(key.len() + 2 + text.len())?;
            data.extend_from_slice(key);
            data.push(0);
            if self.compress {
                // compression method 0 = zlib
                data.push(0);
                zlib::compress_into(&mut data, &text, settings)?;
            } else {
                data.extend_from_slice(&text);
            }
        }
        Ok(data)
    }
}

impl From<&str> for TextData {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextData {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

fn latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// Optional text fields to embed in the PNG, keyed by the predefined keywords.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextualInformation {
    fields: BTreeMap<Keyword, TextData>,
}

impl TextualInformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the value for `keyword`
    pub fn set(&mut self, keyword: Keyword, value: impl Into<TextData>) -> &mut Self {
        self.fields.insert(keyword, value.into());
        self
    }

    #[must_use]
    pub fn with(mut self, keyword: Keyword, value: impl Into<TextData>) -> Self {
        self.set(keyword, value);
        self
    }

    pub fn get(&self, keyword: Keyword) -> Option<&TextData> {
        self.fields.get(&keyword)
    }

    pub fn remove(&mut self, keyword: Keyword) -> Option<TextData> {
        self.fields.remove(&keyword)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Present fields, in keyword order
    pub fn iter(&self) -> impl Iterator<Item = (Keyword, &TextData)> + '_ {
        self.fields.iter().map(|(&k, v)| (k, v))
    }

    /// Type and payload of every chunk to write, in keyword order
    pub fn chunks(&self, settings: &CompressSettings) -> Result<Vec<(ChunkType, Vec<u8>)>, Error> {
        self.iter()
            .map(|(keyword, text)| -> Result<_, Error> {
                Ok((text.chunk_type(), text.chunk_data(keyword, settings)?))
            })
            .collect()
    }
}
