//! TrueType font access
//!
//! [`TrueTypeFont`] owns the byte source and the table directory. Tables are
//! read on demand: [`TrueTypeFont::read_table`] returns a fresh copy every
//! time, while [`TrueTypeFont::load_table`] keeps the bytes for the rest of
//! the font's life so several passes can share them.

mod directory;
pub mod glyf;
mod glyph_names;
mod head;
mod hmtx;
mod loca;
pub mod name;
mod post;
mod table;
mod tag;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::binary::Fixed;
use crate::error::{FontError, Result};

pub use directory::{TableDirectory, TableRecord, OFFSET_TABLE_SIZE, TABLE_RECORD_SIZE};
pub use glyf::{parse_glyph, Glyph, GlyphOutline};
pub use glyph_names::{standard_name, STANDARD_NAMES};
pub use head::{BoundingBox, HeadTable, LocaFormat, UnitScaler};
pub use hmtx::{number_of_h_metrics, HorizontalMetrics};
pub use loca::{GlyphSpan, LocaTable};
pub use name::{FontNames, NameString};
pub use post::{PostTable, MAX_GLYPH_NAME_LEN};
pub use table::TableData;
pub use tag::Tag;

/// An open TrueType font
pub struct TrueTypeFont<R = BufReader<File>> {
    reader: R,
    directory: TableDirectory,
    tables: HashMap<Tag, Vec<u8>>,
    head: Option<HeadTable>,
    names: Option<FontNames>,
    number_of_h_metrics: Option<u16>,
}

impl TrueTypeFont<BufReader<File>> {
    /// Open the font file at `path` and read its table directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FontError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "opened font file");
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> TrueTypeFont<R> {
    /// Read the table directory from the start of `reader`.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|_| FontError::TruncatedHeader)?;
        let directory = TableDirectory::read(&mut reader)?;

        debug!(
            version = %directory.version(),
            num_tables = directory.num_tables(),
            "read table directory"
        );

        Ok(Self {
            reader,
            directory,
            tables: HashMap::new(),
            head: None,
            names: None,
            number_of_h_metrics: None,
        })
    }

    pub fn directory(&self) -> &TableDirectory {
        &self.directory
    }

    /// TrueType version from the offset table.
    pub fn version(&self) -> Fixed {
        self.directory.version()
    }

    /// Read a fresh copy of the table named `tag`.
    pub fn read_table(&mut self, tag: Tag) -> Result<Vec<u8>> {
        let record = *self
            .directory
            .find(tag)
            .ok_or(FontError::TableNotFound(tag))?;

        self.reader
            .seek(SeekFrom::Start(u64::from(record.offset)))
            .map_err(|source| FontError::SeekFailed { tag, source })?;

        let mut data = Vec::new();
        (&mut self.reader)
            .take(u64::from(record.length))
            .read_to_end(&mut data)
            .map_err(|source| FontError::ReadFailed { tag, source })?;

        if data.len() != record.length as usize {
            return Err(FontError::ReadFailed {
                tag,
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("{} of {} bytes available", data.len(), record.length),
                ),
            });
        }

        debug!(%tag, offset = record.offset, length = record.length, "read table");
        Ok(data)
    }

    /// Read the table named `tag` once and keep it.
    pub fn load_table(&mut self, tag: Tag) -> Result<TableData<'_>> {
        if !self.tables.contains_key(&tag) {
            let data = self.read_table(tag)?;
            self.tables.insert(tag, data);
        }

        self.cached_table(tag).ok_or(FontError::TableNotFound(tag))
    }

    /// A table previously kept by [`load_table`](Self::load_table).
    pub fn cached_table(&self, tag: Tag) -> Option<TableData<'_>> {
        self.tables
            .get(&tag)
            .map(|data| TableData::new(tag, data))
    }

    pub fn read_head(&mut self) -> Result<HeadTable> {
        if let Some(head) = self.head {
            return Ok(head);
        }

        let data = self.read_table(Tag::HEAD)?;
        let head = HeadTable::parse(TableData::new(Tag::HEAD, &data))?;
        debug!(
            units_per_em = head.units_per_em,
            revision = %head.font_revision,
            loca_format = ?head.loca_format,
            "read 'head' table"
        );

        self.head = Some(head);
        Ok(head)
    }

    /// Read the Macintosh name strings, failing if a required one is missing.
    pub fn read_names(&mut self) -> Result<&FontNames> {
        let names = match self.names.take() {
            Some(names) => names,
            None => FontNames::parse(self.load_table(Tag::NAME)?)?,
        };

        Ok(self.names.insert(names))
    }

    /// `numberOfHMetrics` from the `hhea` table.
    pub fn read_number_of_h_metrics(&mut self) -> Result<u16> {
        if let Some(count) = self.number_of_h_metrics {
            return Ok(count);
        }

        let data = self.read_table(Tag::HHEA)?;
        let count = number_of_h_metrics(TableData::new(Tag::HHEA, &data))?;
        debug!(number_of_h_metrics = count, "read 'hhea' table");

        self.number_of_h_metrics = Some(count);
        Ok(count)
    }

    /// First name string for `platform_id` and `name_id`, if the font has one.
    pub fn find_name(&mut self, platform_id: u16, name_id: u16) -> Result<Option<NameString>> {
        name::find_name(self.load_table(Tag::NAME)?, platform_id, name_id)
    }

    /// The font's PostScript name, without checking the other required names.
    pub fn postscript_name(&mut self) -> Result<Option<NameString>> {
        if let Some(names) = &self.names {
            return Ok(Some(names.post_name.clone()));
        }

        self.find_name(name::PLATFORM_MACINTOSH, name::NAME_POSTSCRIPT)
    }

    /// Release the byte source and every loaded table.
    pub fn close(self) -> Result<()> {
        debug!(cached_tables = self.tables.len(), "closing font");
        drop(self);
        Ok(())
    }
}
