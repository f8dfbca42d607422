//! Offset table and table directory at the start of a TrueType file

use std::io::Read;

use crate::binary::{self, Fixed};
use crate::error::{FontError, Result};

use super::Tag;

/// Size of the offset table that precedes the directory.
pub const OFFSET_TABLE_SIZE: usize = 12;
/// Size of one directory record.
pub const TABLE_RECORD_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    fn parse(data: &[u8]) -> Option<Self> {
        Some(Self {
            tag: Tag::new(data.get(0..4)?.try_into().ok()?),
            checksum: binary::read_u32(data, 4)?,
            offset: binary::read_u32(data, 8)?,
            length: binary::read_u32(data, 12)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TableDirectory {
    raw_version: [u8; 4],
    records: Vec<TableRecord>,
}

impl TableDirectory {
    /// Read the offset table and every directory record from the current
    /// position of `reader`, which should be the start of the file.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut header = [0u8; OFFSET_TABLE_SIZE];
        reader
            .read_exact(&mut header)
            .map_err(|_| FontError::TruncatedHeader)?;

        let raw_version = [header[0], header[1], header[2], header[3]];
        let num_tables = binary::read_u16(&header, 4).ok_or(FontError::TruncatedHeader)?;

        let expected = num_tables as usize * TABLE_RECORD_SIZE;
        let mut raw = vec![0u8; expected];
        reader
            .read_exact(&mut raw)
            .map_err(|_| FontError::TruncatedDirectory { expected })?;

        let records = raw
            .chunks_exact(TABLE_RECORD_SIZE)
            .filter_map(TableRecord::parse)
            .collect();

        Ok(Self {
            raw_version,
            records,
        })
    }

    /// The four version bytes exactly as they appear in the file.
    pub fn raw_version(&self) -> [u8; 4] {
        self.raw_version
    }

    pub fn version(&self) -> Fixed {
        binary::read_fixed(&self.raw_version, 0).unwrap_or_default()
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    pub fn num_tables(&self) -> usize {
        self.records.len()
    }

    /// First record carrying `tag`.
    pub fn find(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.iter().find(|record| record.tag == tag)
    }
}
