//! `name` table records
//!
//! Only Macintosh (platform 1) strings are used. They are single-byte Mac
//! Roman text, so they are kept as raw bytes and escaped on output rather
//! than decoded.

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::error::{FontError, Result};

use super::TableData;

pub const PLATFORM_MACINTOSH: u16 = 1;

pub const NAME_COPYRIGHT: u16 = 0;
pub const NAME_FAMILY: u16 = 1;
pub const NAME_STYLE: u16 = 2;
pub const NAME_FULL: u16 = 4;
pub const NAME_VERSION: u16 = 5;
pub const NAME_POSTSCRIPT: u16 = 6;
pub const NAME_TRADEMARK: u16 = 7;

const RECORD_SIZE: usize = 12;

/// Raw bytes of one name string
#[derive(Clone, PartialEq, Eq, Default)]
pub struct NameString(Vec<u8>);

impl NameString {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for NameString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for NameString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub length: u16,
    pub offset: u16,
}

impl NameRecord {
    /// Bytes of this record's string within `table`.
    pub fn string(&self, table: TableData<'_>, storage_offset: usize) -> Result<NameString> {
        let bytes = table.slice(storage_offset + self.offset as usize, self.length as usize)?;
        Ok(NameString::new(bytes))
    }
}

/// Parse the record array, returning the records and the string storage offset.
pub fn name_records(table: TableData<'_>) -> Result<(Vec<NameRecord>, usize)> {
    let count = table.u16(2)? as usize;
    let storage_offset = table.u16(4)? as usize;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let base = 6 + i * RECORD_SIZE;
        records.push(NameRecord {
            platform_id: table.u16(base)?,
            encoding_id: table.u16(base + 2)?,
            language_id: table.u16(base + 4)?,
            name_id: table.u16(base + 6)?,
            length: table.u16(base + 8)?,
            offset: table.u16(base + 10)?,
        });
    }

    Ok((records, storage_offset))
}

/// First string matching `platform_id` and `name_id`.
pub fn find_name(table: TableData<'_>, platform_id: u16, name_id: u16) -> Result<Option<NameString>> {
    let (records, storage_offset) = name_records(table)?;
    records
        .iter()
        .find(|record| record.platform_id == platform_id && record.name_id == name_id)
        .map(|record| record.string(table, storage_offset))
        .transpose()
}

/// The Macintosh name strings used in the PostScript header and FontInfo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontNames {
    pub post_name: NameString,
    pub full_name: NameString,
    pub family_name: NameString,
    pub version: NameString,
    pub style: Option<NameString>,
    pub copyright: Option<NameString>,
    pub trademark: Option<NameString>,
}

impl FontNames {
    pub fn parse(table: TableData<'_>) -> Result<Self> {
        let (records, storage_offset) = name_records(table)?;

        let mut copyright = None;
        let mut family = None;
        let mut style = None;
        let mut full = None;
        let mut version = None;
        let mut post_name = None;
        let mut trademark = None;

        for record in records
            .iter()
            .filter(|record| record.platform_id == PLATFORM_MACINTOSH)
        {
            let slot = match record.name_id {
                NAME_COPYRIGHT => &mut copyright,
                NAME_FAMILY => &mut family,
                NAME_STYLE => &mut style,
                NAME_FULL => &mut full,
                NAME_VERSION => &mut version,
                NAME_POSTSCRIPT => &mut post_name,
                NAME_TRADEMARK => &mut trademark,
                _ => continue,
            };

            if slot.is_none() {
                let value = record.string(table, storage_offset)?;
                debug!(
                    name_id = record.name_id,
                    encoding = record.encoding_id,
                    language = record.language_id,
                    "name record {:?}",
                    value
                );
                *slot = Some(value);
            }
        }

        Ok(Self {
            post_name: required(post_name, "PostScript name")?,
            full_name: required(full, "full name")?,
            family_name: required(family, "family name")?,
            version: required(version, "version")?,
            style,
            copyright,
            trademark,
        })
    }
}

fn required(value: Option<NameString>, what: &'static str) -> Result<NameString> {
    value
        .filter(|name| !name.is_empty())
        .ok_or(FontError::RequiredNameMissing(what))
}
