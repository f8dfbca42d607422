use crate::error::{FontError, Result};

use super::{LocaFormat, TableData};

/// Location of one glyph's data inside `glyf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSpan {
    pub offset: u32,
    pub length: u32,
}

impl GlyphSpan {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LocaTable<'a> {
    table: TableData<'a>,
    format: LocaFormat,
}

impl<'a> LocaTable<'a> {
    pub fn new(table: TableData<'a>, format: LocaFormat) -> Self {
        Self { table, format }
    }

    pub fn format(&self) -> LocaFormat {
        self.format
    }

    fn offset(&self, index: usize) -> Result<u32> {
        match self.format {
            LocaFormat::Short => Ok(u32::from(self.table.u16(index * 2)?) * 2),
            LocaFormat::Long => self.table.u32(index * 4),
        }
    }

    /// Span of `glyph`, from its entry and the one after it.
    pub fn glyph_span(&self, glyph: u16) -> Result<GlyphSpan> {
        let start = self.offset(glyph as usize)?;
        let end = self.offset(glyph as usize + 1)?;
        let length = end.checked_sub(start).ok_or(FontError::MalformedGlyph {
            glyph,
            reason: "'loca' offsets decrease",
        })?;

        Ok(GlyphSpan {
            offset: start,
            length,
        })
    }
}
