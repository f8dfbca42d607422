use crate::binary::{self, Fixed};
use crate::error::{FontError, Result};

use super::Tag;

/// Bounds-checked view of one table's bytes
///
/// Reads that fall outside the table fail with [`FontError::TableTruncated`]
/// naming the table, so a corrupt offset never turns into a panic.
#[derive(Debug, Clone, Copy)]
pub struct TableData<'a> {
    tag: Tag,
    bytes: &'a [u8],
}

impl<'a> TableData<'a> {
    pub fn new(tag: Tag, bytes: &'a [u8]) -> Self {
        Self { tag, bytes }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        binary::read_u8(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    pub fn u16(&self, offset: usize) -> Result<u16> {
        binary::read_u16(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    pub fn i16(&self, offset: usize) -> Result<i16> {
        binary::read_i16(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    pub fn u32(&self, offset: usize) -> Result<u32> {
        binary::read_u32(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    pub fn fixed(&self, offset: usize) -> Result<Fixed> {
        binary::read_fixed(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    pub fn f2dot14(&self, offset: usize) -> Result<f64> {
        binary::read_f2dot14(self.bytes, offset).ok_or_else(|| self.truncated(offset))
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or_else(|| self.truncated(offset))
    }

    fn truncated(&self, offset: usize) -> FontError {
        FontError::TableTruncated {
            tag: self.tag,
            offset,
        }
    }
}
