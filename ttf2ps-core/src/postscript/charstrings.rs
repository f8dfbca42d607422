use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::font::PostTable;

use super::type3::Type3Decomposer;
use super::PsWriter;

/// What each CharStrings entry maps its glyph name to
#[derive(Clone, Copy)]
pub enum CharStringsBody<'d, 'a> {
    /// The glyph index, for Type 42 fonts
    GlyphIndex,
    /// A procedure drawing the glyph, for Type 3 fonts
    Procedures(&'d Type3Decomposer<'a>),
}

/// Write the `/CharStrings` dictionary with one entry per glyph.
pub fn write_charstrings<W: Write>(
    w: &mut PsWriter<W>,
    post: &PostTable<'_>,
    body: CharStringsBody<'_, '_>,
) -> Result<()> {
    let num_glyphs = post.num_glyphs();
    writeln!(w, "/CharStrings {} dict dup begin", num_glyphs)?;

    for glyph in 0..num_glyphs {
        let name = post.glyph_name(glyph)?;
        w.put_char(b'/')?;
        w.put_bytes(name)?;
        match body {
            CharStringsBody::GlyphIndex => writeln!(w, " {} def", glyph)?,
            CharStringsBody::Procedures(decomposer) => {
                w.put_char(b'{')?;
                decomposer.write_charproc(w, glyph)?;
                w.put_str("}_d\n")?;
            }
        }
    }

    debug!(num_glyphs, "wrote CharStrings");
    w.put_str("end readonly def\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{TableData, Tag};

    #[test]
    fn test_glyph_index_entries() {
        let mut data = vec![0u8; 32];
        data[0..4].copy_from_slice(&[0, 2, 0, 0]);
        data.extend_from_slice(&3u16.to_be_bytes());
        for index in [0u16, 3, 258] {
            data.extend_from_slice(&index.to_be_bytes());
        }
        data.push(4);
        data.extend_from_slice(b"star");
        let post = PostTable::parse(TableData::new(Tag::POST, &data)).unwrap();

        let mut w = PsWriter::new(Vec::new());
        write_charstrings(&mut w, &post, CharStringsBody::GlyphIndex).unwrap();
        assert_eq!(
            String::from_utf8(w.into_inner()).unwrap(),
            "/CharStrings 3 dict dup begin\n\
             /.notdef 0 def\n\
             /space 1 def\n\
             /star 2 def\n\
             end readonly def\n"
        );
    }

    #[test]
    fn test_names_written_as_stored() {
        let mut data = vec![0u8; 32];
        data[0..4].copy_from_slice(&[0, 2, 0, 0]);
        data.extend_from_slice(&2u16.to_be_bytes());
        for index in [258u16, 259] {
            data.extend_from_slice(&index.to_be_bytes());
        }
        for name in [&b"caf\xE9"[..], &b"caf\xE8"[..]] {
            data.push(name.len() as u8);
            data.extend_from_slice(name);
        }
        let post = PostTable::parse(TableData::new(Tag::POST, &data)).unwrap();

        let mut w = PsWriter::new(Vec::new());
        write_charstrings(&mut w, &post, CharStringsBody::GlyphIndex).unwrap();
        assert_eq!(
            w.into_inner(),
            b"/CharStrings 2 dict dup begin\n\
              /caf\xE9 0 def\n\
              /caf\xE8 1 def\n\
              end readonly def\n"
                .to_vec()
        );
    }
}
