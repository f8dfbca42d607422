//! Big-endian decoders for TrueType data
//!
//! Every decoder reads from `data` at `offset` and returns `None` when the
//! requested bytes run past the end of the buffer. Nothing here allocates or
//! performs I/O; turning a `None` into an error is up to the caller.

use std::fmt;

/// A 16.16 fixed-point number split into its two halves.
///
/// The halves are kept apart rather than folded into a float because the
/// PostScript output prints them as `whole.fraction` verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fixed {
    pub whole: i16,
    pub fraction: u16,
}

impl Fixed {
    pub const fn new(whole: i16, fraction: u16) -> Self {
        Self { whole, fraction }
    }

    /// Approximate value as a float.
    pub fn to_f64(self) -> f64 {
        self.whole as f64 + self.fraction as f64 / 65536.0
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole, self.fraction)
    }
}

fn bytes<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    data.get(offset..end)?.try_into().ok()
}

pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

pub fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    bytes::<2>(data, offset).map(u16::from_be_bytes)
}

pub fn read_i16(data: &[u8], offset: usize) -> Option<i16> {
    read_u16(data, offset).map(|v| v as i16)
}

pub fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    bytes::<4>(data, offset).map(u32::from_be_bytes)
}

pub fn read_fixed(data: &[u8], offset: usize) -> Option<Fixed> {
    let whole = read_i16(data, offset)?;
    let fraction = read_u16(data, offset + 2)?;
    Some(Fixed { whole, fraction })
}

/// Reads a 2.14 fixed-point value, as used by composite glyph scales.
pub fn read_f2dot14(data: &[u8], offset: usize) -> Option<f64> {
    read_i16(data, offset).map(|v| v as f64 / 16384.0)
}
