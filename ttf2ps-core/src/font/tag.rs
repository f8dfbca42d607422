use std::fmt::{self, Write};

/// Four-byte TrueType table tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const CVT: Tag = Tag::new(*b"cvt ");
    pub const FPGM: Tag = Tag::new(*b"fpgm");
    pub const GLYF: Tag = Tag::new(*b"glyf");
    pub const HEAD: Tag = Tag::new(*b"head");
    pub const HHEA: Tag = Tag::new(*b"hhea");
    pub const HMTX: Tag = Tag::new(*b"hmtx");
    pub const LOCA: Tag = Tag::new(*b"loca");
    pub const MAXP: Tag = Tag::new(*b"maxp");
    pub const NAME: Tag = Tag::new(*b"name");
    pub const POST: Tag = Tag::new(*b"post");
    pub const PREP: Tag = Tag::new(*b"prep");

    pub const fn new(tag: [u8; 4]) -> Self {
        Self(tag)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(tag: [u8; 4]) -> Self {
        Self(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            f.write_char(if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            })?;
        }

        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}
