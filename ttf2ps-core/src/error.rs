use std::path::PathBuf;

use thiserror::Error;

use crate::binary::Fixed;
use crate::font::Tag;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Can't open font file {}: {source}", path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File error reading the offset table header")]
    TruncatedHeader,

    #[error("File error reading the table directory ({expected} bytes expected)")]
    TruncatedDirectory { expected: usize },

    #[error("Table not found: '{0}'")]
    TableNotFound(Tag),

    #[error("File error seeking to start of table '{tag}': {source}")]
    SeekFailed {
        tag: Tag,
        #[source]
        source: std::io::Error,
    },

    #[error("File error reading table '{tag}': {source}")]
    ReadFailed {
        tag: Tag,
        #[source]
        source: std::io::Error,
    },

    #[error("Table '{tag}' is too big ({length} bytes)")]
    TableTooBig { tag: Tag, length: u32 },

    #[error("Table '{tag}' is too short for a read at offset {offset}")]
    TableTruncated { tag: Tag, offset: usize },

    #[error("Required name missing: {0}")]
    RequiredNameMissing(&'static str),

    #[error("Invalid unitsPerEm value of 0 in 'head' table")]
    InvalidUnitsPerEm,

    #[error("Unsupported 'loca' table format {0}")]
    UnsupportedLocaFormat(i16),

    #[error("Unsupported 'glyf' table format {0}")]
    UnsupportedGlyfFormat(i16),

    #[error("Unsupported 'post' table format {0}")]
    UnsupportedPostFormat(Fixed),

    #[error("Glyph {glyph} has bad padding (length {length})")]
    GlyphPadding { glyph: u16, length: u32 },

    #[error("File error reading glyph {glyph}")]
    GlyphReadFailed { glyph: u16 },

    #[error("Size inconsistency in 'glyf' table: directory says {expected} bytes, glyphs total {actual}")]
    GlyphSizeInconsistency { expected: u32, actual: u32 },

    #[error("Invalid flags in glyph {glyph}")]
    InvalidFlags { glyph: u16 },

    #[error("Malformed glyph {glyph}: {reason}")]
    MalformedGlyph { glyph: u16, reason: &'static str },

    #[error("PostScript name of glyph {glyph} is too long for the buffer ({length} bytes)")]
    GlyphNameTooLong { glyph: u16, length: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
