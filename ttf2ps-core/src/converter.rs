//! Font assembly
//!
//! Drives a [`TrueTypeFont`] through every table the chosen font type needs
//! and writes the complete PostScript font resource.

use std::io::{Read, Seek, Write};

use tracing::debug;

use crate::error::{FontError, Result};
use crate::font::{HorizontalMetrics, LocaTable, PostTable, TableData, Tag, TrueTypeFont};
use crate::postscript::{
    write_charstrings, write_encoding, write_font_info, write_header, write_trailer,
    CharStringsBody, FontHeader, PsWriter, SfntsAssembly, Type3Decomposer,
};

/// PostScript font representation to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontType {
    /// Glyphs decomposed into path procedures
    Type3,
    /// TrueType tables embedded in the `sfnts` array
    #[default]
    Type42,
}

impl FontType {
    /// Value of the `/FontType` entry.
    pub fn number(self) -> u8 {
        match self {
            FontType::Type3 => 3,
            FontType::Type42 => 42,
        }
    }
}

/// Options for a conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    pub font_type: FontType,
}

impl ConversionOptions {
    pub fn new(font_type: FontType) -> Self {
        Self { font_type }
    }

    pub fn type3() -> Self {
        Self::new(FontType::Type3)
    }

    pub fn type42() -> Self {
        Self::new(FontType::Type42)
    }
}

fn cached<R>(font: &TrueTypeFont<R>, tag: Tag) -> Result<TableData<'_>>
where
    R: Read + Seek,
{
    font.cached_table(tag).ok_or(FontError::TableNotFound(tag))
}

/// Convert `font` and write the PostScript font to `output`.
///
/// Output is streamed: on error, whatever was written before the failure
/// stays in `output`. Use [`convert_to_vec`] to get all or nothing.
pub fn convert<R, W>(
    font: &mut TrueTypeFont<R>,
    output: W,
    options: &ConversionOptions,
) -> Result<W>
where
    R: Read + Seek,
    W: Write,
{
    let font_type = options.font_type;

    let head = font.read_head()?;
    let scaler = head.scaler()?;
    let names = font.read_names()?.clone();

    // Fonts without format 2.0 glyph names fail before anything is written
    PostTable::parse(font.load_table(Tag::POST)?)?;

    let (sfnts, h_metrics) = match font_type {
        FontType::Type42 => {
            font.load_table(Tag::LOCA)?;
            font.load_table(Tag::GLYF)?;
            (Some(SfntsAssembly::collect(font)?), 0)
        }
        FontType::Type3 => {
            let h_metrics = font.read_number_of_h_metrics()?;
            for tag in [Tag::LOCA, Tag::GLYF, Tag::HMTX] {
                font.load_table(tag)?;
            }
            (None, h_metrics)
        }
    };

    let font: &TrueTypeFont<R> = font;
    let post = PostTable::parse(cached(font, Tag::POST)?)?;
    let loca = LocaTable::new(cached(font, Tag::LOCA)?, head.loca_format);
    let glyf = cached(font, Tag::GLYF)?;

    debug!(
        font_type = font_type.number(),
        num_glyphs = post.num_glyphs(),
        "converting font"
    );

    let mut w = PsWriter::new(output);

    let header = FontHeader {
        font_type,
        version: font.version(),
        revision: head.font_revision,
        names: &names,
        bbox: scaler.bbox_to_ps(head.bbox),
        vm_usage: post.type42_vm_usage()?,
    };
    write_header(&mut w, &header)?;
    write_encoding(&mut w)?;
    write_font_info(&mut w, &names, &post)?;

    match sfnts {
        Some(sfnts) => {
            sfnts.write(
                &mut w,
                font.directory().raw_version(),
                glyf,
                &loca,
                post.num_glyphs(),
            )?;
            write_charstrings(&mut w, &post, CharStringsBody::GlyphIndex)?;
        }
        None => {
            let metrics = HorizontalMetrics::new(cached(font, Tag::HMTX)?, h_metrics);
            let decomposer = Type3Decomposer::new(glyf, loca, metrics, &post, scaler);
            write_charstrings(&mut w, &post, CharStringsBody::Procedures(&decomposer))?;
        }
    }

    write_trailer(&mut w, font_type)?;
    w.flush()?;

    debug!(bytes = w.bytes_written(), "wrote PostScript font");
    Ok(w.into_inner())
}

/// Convert `font` into an in-memory PostScript font.
pub fn convert_to_vec<R>(
    font: &mut TrueTypeFont<R>,
    options: &ConversionOptions,
) -> Result<Vec<u8>>
where
    R: Read + Seek,
{
    convert(font, Vec::new(), options)
}
