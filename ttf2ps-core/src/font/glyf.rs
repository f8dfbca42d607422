//! Glyph records from the `glyf` table

use bitflags::bitflags;
use tracing::trace;

use crate::error::{FontError, Result};
use crate::outline::{ContourPoint, Point};

use super::{BoundingBox, GlyphSpan, TableData, Tag};

bitflags! {
    /// Per-point flags of a simple glyph
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PointFlags: u8 {
        const ON_CURVE = 1 << 0;
        const X_SHORT = 1 << 1;
        const Y_SHORT = 1 << 2;
        /// The next byte is a repeat count for this flag
        const REPEAT = 1 << 3;
        /// Positive short x, or x unchanged for long x
        const X_SAME_OR_POSITIVE = 1 << 4;
        /// Positive short y, or y unchanged for long y
        const Y_SAME_OR_POSITIVE = 1 << 5;
    }
}

bitflags! {
    /// Flags of one composite glyph component
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ComponentFlags: u16 {
        const ARG_1_AND_2_ARE_WORDS = 1 << 0;
        const ARGS_ARE_XY_VALUES = 1 << 1;
        const ROUND_XY_TO_GRID = 1 << 2;
        const WE_HAVE_A_SCALE = 1 << 3;
        const MORE_COMPONENTS = 1 << 5;
        const WE_HAVE_AN_X_AND_Y_SCALE = 1 << 6;
        const WE_HAVE_A_TWO_BY_TWO = 1 << 7;
        const WE_HAVE_INSTRUCTIONS = 1 << 8;
        const USE_MY_METRICS = 1 << 9;
        const OVERLAP_COMPOUND = 1 << 10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentArgs {
    /// Offset in design units
    Offset { dx: i32, dy: i32 },
    /// Point numbers to align, parent first
    PointMatch { parent: u16, child: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentTransform {
    Identity,
    Scale(f64),
    XyScale { x: f64, y: f64 },
    TwoByTwo { xx: f64, xy: f64, yx: f64, yy: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub flags: ComponentFlags,
    pub glyph_index: u16,
    pub args: ComponentArgs,
    pub transform: ComponentTransform,
}

/// A simple glyph with absolute coordinates in design units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleOutline {
    pub end_points: Vec<u16>,
    pub points: Vec<ContourPoint>,
}

impl SimpleOutline {
    /// Point index ranges of each contour.
    pub fn contour_ranges(&self) -> impl Iterator<Item = std::ops::Range<usize>> + '_ {
        let mut start = 0;
        self.end_points.iter().map(move |&end| {
            let range = start..end as usize + 1;
            start = range.end;
            range
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphOutline {
    /// No contours; only the bounding box is meaningful
    Blank,
    Simple(SimpleOutline),
    Composite(Vec<Component>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Bounding box in design units
    pub bbox: BoundingBox,
    pub outline: GlyphOutline,
}

impl Glyph {
    pub fn blank() -> Self {
        Self {
            bbox: BoundingBox::default(),
            outline: GlyphOutline::Blank,
        }
    }

    pub fn num_points(&self) -> usize {
        match &self.outline {
            GlyphOutline::Simple(simple) => simple.points.len(),
            _ => 0,
        }
    }
}

struct GlyphReader<'a> {
    data: TableData<'a>,
    glyph: u16,
    position: usize,
}

impl<'a> GlyphReader<'a> {
    fn u8(&mut self) -> Result<u8> {
        let value = self.data.u8(self.position)?;
        self.position += 1;
        Ok(value)
    }

    fn i8(&mut self) -> Result<i8> {
        Ok(self.u8()? as i8)
    }

    fn u16(&mut self) -> Result<u16> {
        let value = self.data.u16(self.position)?;
        self.position += 2;
        Ok(value)
    }

    fn i16(&mut self) -> Result<i16> {
        Ok(self.u16()? as i16)
    }

    fn f2dot14(&mut self) -> Result<f64> {
        let value = self.data.f2dot14(self.position)?;
        self.position += 2;
        Ok(value)
    }

    fn skip(&mut self, len: usize) {
        self.position += len;
    }

    fn malformed(&self, reason: &'static str) -> FontError {
        FontError::MalformedGlyph {
            glyph: self.glyph,
            reason,
        }
    }
}

/// Decode glyph `glyph` occupying `span` of the `glyf` table.
pub fn parse_glyph(glyf: TableData<'_>, span: GlyphSpan, glyph: u16) -> Result<Glyph> {
    if span.is_empty() {
        return Ok(Glyph::blank());
    }

    let bytes = glyf
        .slice(span.offset as usize, span.length as usize)
        .map_err(|_| FontError::GlyphReadFailed { glyph })?;
    let mut reader = GlyphReader {
        data: TableData::new(Tag::GLYF, bytes),
        glyph,
        position: 0,
    };

    let num_contours = reader.i16()?;
    let bbox = BoundingBox::new(
        i32::from(reader.i16()?),
        i32::from(reader.i16()?),
        i32::from(reader.i16()?),
        i32::from(reader.i16()?),
    );

    trace!(glyph, num_contours, ?bbox, "glyph header");

    let outline = match num_contours {
        n if n > 0 => GlyphOutline::Simple(parse_simple(&mut reader, n as usize)?),
        n if n < 0 => GlyphOutline::Composite(parse_composite(&mut reader)?),
        _ => GlyphOutline::Blank,
    };

    Ok(Glyph { bbox, outline })
}

fn parse_simple(reader: &mut GlyphReader<'_>, num_contours: usize) -> Result<SimpleOutline> {
    let mut end_points = Vec::with_capacity(num_contours);
    for _ in 0..num_contours {
        let end = reader.u16()?;
        if end_points.last().is_some_and(|&prev| end <= prev) {
            return Err(reader.malformed("contour endpoints out of order"));
        }
        end_points.push(end);
    }

    let num_points = end_points.last().map_or(0, |&end| end as usize + 1);

    let instruction_len = reader.u16()?;
    reader.skip(instruction_len as usize);

    let mut flags = Vec::with_capacity(num_points);
    while flags.len() < num_points {
        let flag = PointFlags::from_bits_retain(reader.u8()?);
        flags.push(flag);

        if flag.contains(PointFlags::REPEAT) {
            let count = reader.u8()? as usize;
            if flags.len() + count > num_points {
                return Err(FontError::InvalidFlags {
                    glyph: reader.glyph,
                });
            }
            flags.extend(std::iter::repeat(flag).take(count));
        }
    }

    let xs = read_coordinates(
        reader,
        &flags,
        PointFlags::X_SHORT,
        PointFlags::X_SAME_OR_POSITIVE,
    )?;
    let ys = read_coordinates(
        reader,
        &flags,
        PointFlags::Y_SHORT,
        PointFlags::Y_SAME_OR_POSITIVE,
    )?;

    let points = flags
        .iter()
        .zip(xs.into_iter().zip(ys))
        .map(|(flag, (x, y))| ContourPoint {
            point: Point::new(x, y),
            on_curve: flag.contains(PointFlags::ON_CURVE),
        })
        .collect();

    Ok(SimpleOutline { end_points, points })
}

/// Read one axis of deltas and accumulate them into absolute values.
fn read_coordinates(
    reader: &mut GlyphReader<'_>,
    flags: &[PointFlags],
    short: PointFlags,
    same_or_positive: PointFlags,
) -> Result<Vec<i32>> {
    let mut value = 0i32;
    let mut coordinates = Vec::with_capacity(flags.len());

    for flag in flags {
        let delta = if flag.contains(short) {
            let magnitude = i32::from(reader.u8()?);
            if flag.contains(same_or_positive) {
                magnitude
            } else {
                -magnitude
            }
        } else if flag.contains(same_or_positive) {
            0
        } else {
            i32::from(reader.i16()?)
        };

        value += delta;
        if i16::try_from(value).is_err() {
            return Err(reader.malformed("coordinate outside the 16-bit range"));
        }
        coordinates.push(value);
    }

    Ok(coordinates)
}

fn parse_composite(reader: &mut GlyphReader<'_>) -> Result<Vec<Component>> {
    let mut components = Vec::new();

    loop {
        let flags = ComponentFlags::from_bits_retain(reader.u16()?);
        let glyph_index = reader.u16()?;

        let xy_values = flags.contains(ComponentFlags::ARGS_ARE_XY_VALUES);
        let (arg1, arg2) = if flags.contains(ComponentFlags::ARG_1_AND_2_ARE_WORDS) {
            if xy_values {
                (i32::from(reader.i16()?), i32::from(reader.i16()?))
            } else {
                (i32::from(reader.u16()?), i32::from(reader.u16()?))
            }
        } else if xy_values {
            (i32::from(reader.i8()?), i32::from(reader.i8()?))
        } else {
            (i32::from(reader.u8()?), i32::from(reader.u8()?))
        };

        let args = if xy_values {
            ComponentArgs::Offset { dx: arg1, dy: arg2 }
        } else {
            ComponentArgs::PointMatch {
                parent: arg1 as u16,
                child: arg2 as u16,
            }
        };

        let transform = if flags.contains(ComponentFlags::WE_HAVE_A_SCALE) {
            ComponentTransform::Scale(reader.f2dot14()?)
        } else if flags.contains(ComponentFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ComponentTransform::XyScale {
                x: reader.f2dot14()?,
                y: reader.f2dot14()?,
            }
        } else if flags.contains(ComponentFlags::WE_HAVE_A_TWO_BY_TWO) {
            ComponentTransform::TwoByTwo {
                xx: reader.f2dot14()?,
                xy: reader.f2dot14()?,
                yx: reader.f2dot14()?,
                yy: reader.f2dot14()?,
            }
        } else {
            ComponentTransform::Identity
        };

        trace!(glyph = reader.glyph, glyph_index, ?flags, ?args, ?transform, "component");

        components.push(Component {
            flags,
            glyph_index,
            args,
            transform,
        });

        if !flags.contains(ComponentFlags::MORE_COMPONENTS) {
            break;
        }
    }

    Ok(components)
}
