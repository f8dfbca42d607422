//! PostScript output
//!
//! The font program is written front to back in one pass: header, FontInfo,
//! then either the `sfnts` array (Type 42) or nothing, then CharStrings and
//! the trailer that defines the font.

mod charstrings;
mod header;
mod sfnts;
mod trailer;
mod type3;
mod writer;

pub use charstrings::{write_charstrings, CharStringsBody};
pub use header::{write_encoding, write_font_info, write_header, FontHeader};
pub use sfnts::{search_params, SfntsAssembly, MAX_STRING_LEN, MAX_TABLE_LEN, SFNTS_TABLES};
pub use trailer::write_trailer;
pub use type3::Type3Decomposer;
pub use writer::{format_real, PsWriter};
