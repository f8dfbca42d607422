//! Resource header, font dictionary preamble, encoding and FontInfo

use std::io::Write;

use crate::binary::Fixed;
use crate::converter::FontType;
use crate::error::Result;
use crate::font::{BoundingBox, FontNames, PostTable};

use super::PsWriter;

/// Procedures shared by every Type 3 glyph program
const TYPE3_PROCEDURES: &str = "/_d{bind def}bind def\n\
/_m{moveto}_d\n\
/_l{lineto}_d\n\
/_cl{closepath eofill}_d\n\
/_c{curveto}_d\n\
/_sc{7 -1 roll{setcachedevice}{pop pop pop pop pop pop}ifelse}_d\n\
/_e{exec}_d\n";

/// Values printed before the font dictionary contents
#[derive(Debug, Clone, Copy)]
pub struct FontHeader<'a> {
    pub font_type: FontType,
    /// TrueType version from the offset table
    pub version: Fixed,
    pub revision: Fixed,
    pub names: &'a FontNames,
    /// Font bounding box in 1/1000 em
    pub bbox: BoundingBox,
    pub vm_usage: Option<(i32, i32)>,
}

pub fn write_header<W: Write>(w: &mut PsWriter<W>, header: &FontHeader<'_>) -> Result<()> {
    let names = header.names;

    match header.font_type {
        FontType::Type42 => writeln!(
            w,
            "%!PS-TrueTypeFont-{}-{}",
            header.version, header.revision
        )?,
        FontType::Type3 => w.put_str("%!PS-Adobe-3.0 Resource-Font\n")?,
    }

    w.put_str("%%Title: ")?;
    w.put_comment_text(names.full_name.as_bytes())?;
    w.put_char(b'\n')?;

    if let Some(copyright) = &names.copyright {
        w.put_str("%%Copyright: ")?;
        w.put_comment_text(copyright.as_bytes())?;
        w.put_char(b'\n')?;
    }

    match header.font_type {
        FontType::Type42 => {
            w.put_str("%%Creator: Converted from TrueType to type 42 by ttf2ps\n")?
        }
        FontType::Type3 => w.put_str("%%Creator: Converted from TrueType by ttf2ps\n")?,
    }

    if header.font_type == FontType::Type42 {
        if let Some((min, max)) = header.vm_usage {
            writeln!(w, "%%VMUsage: {} {}", min, max)?;
        }
    }

    match header.font_type {
        FontType::Type42 => w.put_str("15 dict begin\n")?,
        FontType::Type3 => {
            w.put_str("25 dict begin\n")?;
            w.put_str(TYPE3_PROCEDURES)?;
        }
    }

    w.put_str("/FontName /")?;
    w.put_bytes(names.post_name.as_bytes())?;
    w.put_str(" def\n")?;
    w.put_str("/PaintType 0 def\n")?;

    match header.font_type {
        FontType::Type42 => w.put_str("/FontMatrix[1 0 0 1 0 0]def\n")?,
        FontType::Type3 => w.put_str("/FontMatrix[.001 0 0 .001 0 0]def\n")?,
    }

    let bbox = header.bbox;
    writeln!(
        w,
        "/FontBBox[{} {} {} {}]def",
        bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
    )?;
    writeln!(w, "/FontType {} def", header.font_type.number())?;
    Ok(())
}

pub fn write_encoding<W: Write>(w: &mut PsWriter<W>) -> Result<()> {
    w.put_str("/Encoding StandardEncoding def\n")
}

fn write_string_entry<W: Write>(w: &mut PsWriter<W>, key: &str, value: &[u8]) -> Result<()> {
    write!(w, "/{} (", key)?;
    w.put_ps_string(value)?;
    w.put_str(") def\n")
}

pub fn write_font_info<W: Write>(
    w: &mut PsWriter<W>,
    names: &FontNames,
    post: &PostTable<'_>,
) -> Result<()> {
    w.put_str("/FontInfo 10 dict dup begin\n")?;

    write_string_entry(w, "FamilyName", names.family_name.as_bytes())?;
    write_string_entry(w, "FullName", names.full_name.as_bytes())?;

    let notice: Vec<&[u8]> = [&names.copyright, &names.trademark]
        .into_iter()
        .flatten()
        .map(|name| name.as_bytes())
        .collect();
    if !notice.is_empty() {
        write_string_entry(w, "Notice", &notice.join(&b' '))?;
    }

    if let Some(style) = &names.style {
        write_string_entry(w, "Weight", style.as_bytes())?;
    }
    write_string_entry(w, "Version", names.version.as_bytes())?;

    writeln!(w, "/ItalicAngle {} def", post.italic_angle()?)?;
    writeln!(
        w,
        "/isFixedPitch {} def",
        if post.is_fixed_pitch()? { "true" } else { "false" }
    )?;
    writeln!(w, "/UnderlinePosition {} def", post.underline_position()?)?;
    writeln!(w, "/UnderlineThickness {} def", post.underline_thickness()?)?;
    w.put_str("end readonly def\n\n")
}
