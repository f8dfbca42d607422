use std::io::Write;

use crate::converter::FontType;
use crate::error::Result;

use super::PsWriter;

/// BuildGlyph and BuildChar for fonts drawn by their own procedures
const TYPE3_BUILD_PROCEDURES: &str = "\n\
/BuildGlyph\n \
{exch begin\n \
CharStrings exch\n \
2 copy known not{pop /.notdef}if\n \
true 3 1 roll get exec\n \
end}_d\n\
\n\
/BuildChar {\n \
1 index /Encoding get exch get\n \
1 index /BuildGlyph get exec\n\
}_d\n\
\n";

/// Falls back to the TrueDict rasterizer on interpreters without native
/// Type 42 support.
const TYPE42_FALLBACK: &str = "\n\
systemdict/resourcestatus known\n \
{42 /FontType resourcestatus\n    \
{pop pop false}{true}ifelse}\n \
{true}ifelse\n\
{/TrueDict where{pop}{(%%[ Error: no TrueType rasterizer ]%%)= flush}ifelse\n\
/FontType 3 def\n \
/TrueState 271 string def\n \
TrueDict begin sfnts save\n \
72 0 matrix defaultmatrix dtransform dup\n \
mul exch dup mul add sqrt cvi 0 72 matrix\n \
defaultmatrix dtransform dup mul exch dup\n \
mul add sqrt cvi 3 -1 roll restore\n \
TrueState initer end\n \
/BuildGlyph{exch begin\n  \
CharStrings dup 2 index known\n    \
{exch}{exch pop /.notdef}ifelse\n  \
get dup xcheck\n    \
{currentdict systemdict begin begin exec end end}\n    \
{TrueDict begin /bander load cvlit exch TrueState render end}\n    \
ifelse\n \
end}bind def\n \
/BuildChar{\n  \
1 index /Encoding get exch get\n  \
1 index /BuildGlyph get exec\n \
}bind def\n\
}if\n\
\n";

const FONT_DEFINITION: &str = "FontName currentdict end definefont pop\n%%EOF\n";

pub fn write_trailer<W: Write>(w: &mut PsWriter<W>, font_type: FontType) -> Result<()> {
    match font_type {
        FontType::Type3 => w.put_str(TYPE3_BUILD_PROCEDURES)?,
        FontType::Type42 => w.put_str(TYPE42_FALLBACK)?,
    }
    w.put_str(FONT_DEFINITION)
}
