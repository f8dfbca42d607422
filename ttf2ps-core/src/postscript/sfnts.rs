//! The `sfnts` array of a Type 42 font
//!
//! A reduced copy of the TrueType file (offset table, directory and nine
//! tables) is written as a PostScript array of hex strings. Interpreters
//! limit strings to 64K, so a string is closed before any table, or any
//! glyph of `glyf`, that would push it past [`MAX_STRING_LEN`] bytes.

use std::io::{Read, Seek, Write};

use tracing::{debug, warn};

use crate::error::{FontError, Result};
use crate::font::{
    LocaTable, TableData, TableRecord, Tag, TrueTypeFont, OFFSET_TABLE_SIZE, TABLE_RECORD_SIZE,
};

use super::PsWriter;

/// Tables copied into the array, in directory order
pub const SFNTS_TABLES: [Tag; 9] = [
    Tag::CVT,
    Tag::FPGM,
    Tag::GLYF,
    Tag::HEAD,
    Tag::HHEA,
    Tag::HMTX,
    Tag::LOCA,
    Tag::MAXP,
    Tag::PREP,
];

/// Longest run of data bytes allowed in one string before a table starts.
pub const MAX_STRING_LEN: usize = 65528;

/// Largest table other than `glyf` that fits in a single string.
pub const MAX_TABLE_LEN: u32 = 65535;

const MAX_LINE_LEN: usize = 70;

/// searchRange, entrySelector and rangeShift as written for all nine tables
const NINE_TABLE_SEARCH: (u16, u16, u16) = (7, 3, 81);

/// searchRange, entrySelector and rangeShift for `count` tables.
pub fn search_params(count: u16) -> (u16, u16, u16) {
    if count == SFNTS_TABLES.len() as u16 {
        return NINE_TABLE_SEARCH;
    }
    if count == 0 {
        return (0, 0, 0);
    }

    let entry_selector = 15 - count.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    (search_range, entry_selector, count * 16 - search_range)
}

/// Writes bytes as hex digits inside `<...>` strings, breaking lines and
/// strings as it goes.
struct HexStringWriter<'w, W: Write> {
    w: &'w mut PsWriter<W>,
    string_len: usize,
    line_len: usize,
    in_string: bool,
}

impl<'w, W: Write> HexStringWriter<'w, W> {
    fn start(w: &'w mut PsWriter<W>) -> Result<Self> {
        w.put_str("/sfnts[<")?;
        Ok(Self {
            w,
            string_len: 0,
            line_len: 8,
            in_string: true,
        })
    }

    fn put_byte(&mut self, b: u8) -> Result<()> {
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        if !self.in_string {
            self.w.put_char(b'<')?;
            self.string_len = 0;
            self.line_len += 1;
            self.in_string = true;
        }

        self.w
            .put_bytes(&[HEX_DIGITS[(b >> 4) as usize], HEX_DIGITS[(b & 0x0F) as usize]])?;
        self.string_len += 1;
        self.line_len += 2;

        if self.line_len > MAX_LINE_LEN {
            self.w.put_char(b'\n')?;
            self.line_len = 0;
        }
        Ok(())
    }

    fn put_bytes(&mut self, data: &[u8]) -> Result<()> {
        data.iter().try_for_each(|&b| self.put_byte(b))
    }

    fn put_u16(&mut self, value: u16) -> Result<()> {
        self.put_bytes(&value.to_be_bytes())
    }

    fn put_u32(&mut self, value: u32) -> Result<()> {
        self.put_bytes(&value.to_be_bytes())
    }

    /// Close the current string if `len` more bytes would overfill it.
    fn new_table(&mut self, len: usize) -> Result<()> {
        if self.string_len + len > MAX_STRING_LEN {
            self.end_string()?;
        }
        Ok(())
    }

    /// Close the open string with a trailing zero byte, which older
    /// interpreters expect.
    fn end_string(&mut self) -> Result<()> {
        if self.in_string {
            self.put_byte(0)?;
            self.w.put_char(b'>')?;
            self.line_len += 1;
            self.string_len = 0;
        }
        self.in_string = false;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.end_string()?;
        self.w.put_str("]def\n")
    }
}

enum TableBody {
    /// Copied glyph by glyph from the cached `glyf` table
    Glyphs,
    Bytes(Vec<u8>),
}

struct SfntsTable {
    record: TableRecord,
    new_offset: u32,
    body: TableBody,
}

/// The tables of a Type 42 font, read and laid out ready to write
pub struct SfntsAssembly {
    tables: Vec<SfntsTable>,
}

impl SfntsAssembly {
    /// Plan the reduced directory and read every table but `glyf`.
    pub fn collect<R: Read + Seek>(font: &mut TrueTypeFont<R>) -> Result<Self> {
        let records: Vec<TableRecord> = SFNTS_TABLES
            .iter()
            .filter_map(|&tag| font.directory().find(tag).copied())
            .filter(|record| record.length > 0)
            .collect();

        let mut tables = Vec::with_capacity(records.len());
        let mut next_offset = 0u32;
        for record in records {
            let body = if record.tag == Tag::GLYF {
                TableBody::Glyphs
            } else {
                if record.length > MAX_TABLE_LEN {
                    return Err(FontError::TableTooBig {
                        tag: record.tag,
                        length: record.length,
                    });
                }
                TableBody::Bytes(font.read_table(record.tag)?)
            };

            tables.push(SfntsTable {
                record,
                new_offset: next_offset,
                body,
            });
            next_offset = next_offset.saturating_add(record.length.saturating_add(3) & !3);
        }

        if tables.len() != SFNTS_TABLES.len() {
            warn!(
                count = tables.len(),
                "sfnts directory does not hold all nine tables; computing search parameters"
            );
        }
        debug!(count = tables.len(), total = next_offset, "collected sfnts tables");

        Ok(Self { tables })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Directory records in the order they will be written.
    pub fn records(&self) -> impl Iterator<Item = &TableRecord> {
        self.tables.iter().map(|table| &table.record)
    }

    /// Write the `/sfnts[...]def` array.
    pub fn write<W: Write>(
        &self,
        w: &mut PsWriter<W>,
        version: [u8; 4],
        glyf: TableData<'_>,
        loca: &LocaTable<'_>,
        num_glyphs: u16,
    ) -> Result<()> {
        let count = self.tables.len() as u16;
        let directory_len = (OFFSET_TABLE_SIZE + self.tables.len() * TABLE_RECORD_SIZE) as u32;

        let mut hex = HexStringWriter::start(w)?;

        hex.put_bytes(&version)?;
        hex.put_u16(count)?;
        let (search_range, entry_selector, range_shift) = search_params(count);
        hex.put_u16(search_range)?;
        hex.put_u16(entry_selector)?;
        hex.put_u16(range_shift)?;

        for table in &self.tables {
            hex.put_bytes(table.record.tag.as_bytes())?;
            hex.put_u32(table.record.checksum)?;
            hex.put_u32(table.new_offset + directory_len)?;
            hex.put_u32(table.record.length)?;
        }

        for table in &self.tables {
            let length = table.record.length;
            match &table.body {
                TableBody::Glyphs => write_glyphs(&mut hex, glyf, loca, num_glyphs, length)?,
                TableBody::Bytes(data) => {
                    hex.new_table(data.len())?;
                    hex.put_bytes(data)?;
                }
            }

            for _ in 0..(4 - length % 4) % 4 {
                hex.put_byte(0)?;
            }
        }

        hex.finish()
    }
}

/// Copy `glyf` one glyph at a time so no glyph straddles two strings.
fn write_glyphs<W: Write>(
    hex: &mut HexStringWriter<'_, W>,
    glyf: TableData<'_>,
    loca: &LocaTable<'_>,
    num_glyphs: u16,
    declared_len: u32,
) -> Result<()> {
    let mut total = 0u32;

    for glyph in 0..num_glyphs {
        let span = loca.glyph_span(glyph)?;
        hex.new_table(span.length as usize)?;

        if span.length % 2 != 0 {
            return Err(FontError::GlyphPadding {
                glyph,
                length: span.length,
            });
        }

        let bytes = glyf
            .slice(span.offset as usize, span.length as usize)
            .map_err(|_| FontError::GlyphReadFailed { glyph })?;
        hex.put_bytes(bytes)?;
        total = total.saturating_add(span.length);
    }

    // Spans from a monotonic `loca` inside the loaded table cannot exceed
    // its length; this guards callers passing a `glyf` view and length that
    // disagree.
    if total > declared_len {
        return Err(FontError::GlyphSizeInconsistency {
            expected: declared_len,
            actual: total,
        });
    }

    for _ in total..declared_len {
        hex.put_byte(0)?;
    }
    Ok(())
}
