use crate::binary::Fixed;
use crate::error::{FontError, Result};

use super::glyph_names::{standard_name, NUM_STANDARD_NAMES};
use super::TableData;

/// Longest custom glyph name accepted, exclusive.
pub const MAX_GLYPH_NAME_LEN: usize = 80;

const FORMAT_2: Fixed = Fixed::new(2, 0);
const NAME_INDEX_OFFSET: usize = 34;

/// A validated format 2.0 `post` table
#[derive(Debug, Clone, Copy)]
pub struct PostTable<'a> {
    table: TableData<'a>,
    num_glyphs: u16,
}

impl<'a> PostTable<'a> {
    /// Check the format and the glyph name index array.
    pub fn parse(table: TableData<'a>) -> Result<Self> {
        let format = table.fixed(0)?;
        if format != FORMAT_2 {
            return Err(FontError::UnsupportedPostFormat(format));
        }

        let num_glyphs = table.u16(32)?;
        table.slice(NAME_INDEX_OFFSET, num_glyphs as usize * 2)?;

        Ok(Self { table, num_glyphs })
    }

    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    pub fn italic_angle(&self) -> Result<Fixed> {
        self.table.fixed(4)
    }

    pub fn underline_position(&self) -> Result<i16> {
        self.table.i16(8)
    }

    pub fn underline_thickness(&self) -> Result<i16> {
        self.table.i16(10)
    }

    pub fn is_fixed_pitch(&self) -> Result<bool> {
        Ok(self.table.u32(12)? != 0)
    }

    /// Minimum and maximum printer memory for the font as Type 42, when
    /// the font supplies both as positive values.
    pub fn type42_vm_usage(&self) -> Result<Option<(i32, i32)>> {
        let min = self.table.u32(16)? as i32;
        let max = self.table.u32(20)? as i32;
        Ok((min > 0 && max > 0).then_some((min, max)))
    }

    /// PostScript name of `glyph`, as the raw bytes stored in the font.
    pub fn glyph_name(&self, glyph: u16) -> Result<&'a [u8]> {
        let index = self
            .table
            .u16(NAME_INDEX_OFFSET + glyph as usize * 2)?;

        if let Some(name) = standard_name(index) {
            return Ok(name.as_bytes());
        }

        // Custom names are Pascal strings packed after the index array
        let mut position = NAME_INDEX_OFFSET + self.num_glyphs as usize * 2;
        let mut length = self.table.u8(position)? as usize;
        position += 1;
        for _ in 0..(index - NUM_STANDARD_NAMES) {
            position += length;
            length = self.table.u8(position)? as usize;
            position += 1;
        }

        if length >= MAX_GLYPH_NAME_LEN {
            return Err(FontError::GlyphNameTooLong { glyph, length });
        }

        self.table.slice(position, length)
    }
}
