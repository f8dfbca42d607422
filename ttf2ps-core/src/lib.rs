//! # ttf2ps
//!
//! Convert TrueType fonts into PostScript font resources.
//!
//! ## Features
//!
//! - **Type 42 output**: the TrueType outline tables embedded as hex strings in
//!   an `sfnts` array, split to respect interpreter string limits
//! - **Type 3 output**: every glyph decomposed into `moveto`/`lineto`/`curveto`
//!   procedures, with composite glyphs calling their components
//! - **Glyph names** from format 2.0 `post` tables, including the standard
//!   Macintosh names
//! - **Any byte source**: fonts are read from anything that is `Read + Seek`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ttf2ps::{convert_to_vec, ConversionOptions, TrueTypeFont};
//!
//! # fn main() -> ttf2ps::Result<()> {
//! let mut font = TrueTypeFont::open("Sample.ttf")?;
//!
//! // Type 42 is the default
//! let type42 = convert_to_vec(&mut font, &ConversionOptions::default())?;
//!
//! // Decompose the outlines instead
//! let type3 = convert_to_vec(&mut font, &ConversionOptions::type3())?;
//!
//! std::fs::write("Sample.t42", type42)?;
//! std::fs::write("Sample.t3", type3)?;
//! font.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Looking up names
//!
//! ```rust,no_run
//! use ttf2ps::TrueTypeFont;
//!
//! # fn main() -> ttf2ps::Result<()> {
//! let mut font = TrueTypeFont::open("Sample.ttf")?;
//! if let Some(name) = font.postscript_name()? {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod binary;
pub mod converter;
pub mod error;
pub mod font;
pub mod outline;
pub mod postscript;

pub use converter::{convert, convert_to_vec, ConversionOptions, FontType};
pub use error::{FontError, Result};
pub use font::{FontNames, NameString, Tag, TrueTypeFont};
pub use postscript::PsWriter;

/// Current version of ttf2ps
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
