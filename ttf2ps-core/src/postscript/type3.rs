//! Glyph programs for Type 3 fonts
//!
//! Every glyph becomes a PostScript procedure built from the helper
//! procedures defined in the font header (`_sc`, `_m`, `_l`, `_c`, `_cl`).
//! Large glyphs are split into several procedures executed in turn so the
//! operand stack of small interpreters does not overflow.

use std::io::Write;

use tracing::trace;

use crate::error::{FontError, Result};
use crate::font::glyf::{Component, ComponentArgs, ComponentTransform, SimpleOutline};
use crate::font::{
    parse_glyph, GlyphOutline, HorizontalMetrics, LocaTable, PostTable, TableData, UnitScaler,
};
use crate::outline::{emission_order, quadratic_run_to_cubics, Point};

use super::writer::format_real;
use super::PsWriter;

/// Glyphs with more points than this get split procedures.
const SPLIT_THRESHOLD: usize = 25;
/// Estimated stack depth that triggers a split.
const MAX_STACK_DEPTH: u32 = 100;

const MOVETO_DEPTH: u32 = 3;
const LINETO_DEPTH: u32 = 3;
const CURVETO_DEPTH: u32 = 7;
const SETCACHEDEVICE_DEPTH: u32 = 7;
const CLOSEPATH_DEPTH: u32 = 1;

/// Rough operand stack accounting for one glyph procedure
struct StackTracker {
    enabled: bool,
    depth: u32,
}

impl StackTracker {
    fn new(num_points: usize) -> Self {
        Self {
            enabled: num_points > SPLIT_THRESHOLD,
            depth: 0,
        }
    }

    /// Account for an operator about to push `depth` operands.
    fn push<W: Write>(&mut self, w: &mut PsWriter<W>, depth: u32) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.depth == 0 {
            w.put_char(b'{')?;
            self.depth = 1;
        }

        self.depth += depth;
        if self.depth > MAX_STACK_DEPTH {
            w.put_str("}_e{")?;
            self.depth = 3 + depth;
        }
        Ok(())
    }

    fn finish<W: Write>(&mut self, w: &mut PsWriter<W>) -> Result<()> {
        if self.depth > 0 {
            w.put_str("}_e")?;
            self.depth = 0;
        }
        Ok(())
    }
}

/// Writes the body of each glyph's CharStrings procedure
pub struct Type3Decomposer<'a> {
    glyf: TableData<'a>,
    loca: LocaTable<'a>,
    metrics: HorizontalMetrics<'a>,
    post: &'a PostTable<'a>,
    scaler: UnitScaler,
}

impl<'a> Type3Decomposer<'a> {
    pub fn new(
        glyf: TableData<'a>,
        loca: LocaTable<'a>,
        metrics: HorizontalMetrics<'a>,
        post: &'a PostTable<'a>,
        scaler: UnitScaler,
    ) -> Self {
        Self {
            glyf,
            loca,
            metrics,
            post,
            scaler,
        }
    }

    /// Write the procedure body for `glyph`, without the enclosing braces.
    pub fn write_charproc<W: Write>(&self, w: &mut PsWriter<W>, glyph: u16) -> Result<()> {
        let span = self.loca.glyph_span(glyph)?;
        let parsed = parse_glyph(self.glyf, span, glyph)?;
        let advance = self.metrics.advance_width(glyph)?;

        trace!(glyph, points = parsed.num_points(), advance, "type 3 glyph");

        let mut stack = StackTracker::new(parsed.num_points());
        let s = self.scaler;

        stack.push(w, SETCACHEDEVICE_DEPTH)?;
        writeln!(
            w,
            "{} 0 {} {} {} {} _sc",
            s.to_ps(i32::from(advance)),
            s.to_ps(parsed.bbox.x_min),
            s.to_ps(parsed.bbox.y_min),
            s.to_ps(parsed.bbox.x_max),
            s.to_ps(parsed.bbox.y_max)
        )?;

        match &parsed.outline {
            GlyphOutline::Simple(outline) => self.write_outline(w, outline, &mut stack)?,
            GlyphOutline::Composite(components) => {
                self.write_components(w, glyph, components)?
            }
            GlyphOutline::Blank => {}
        }

        stack.finish(w)
    }

    fn write_outline<W: Write>(
        &self,
        w: &mut PsWriter<W>,
        outline: &SimpleOutline,
        stack: &mut StackTracker,
    ) -> Result<()> {
        let points: Vec<Point> = outline
            .points
            .iter()
            .map(|p| Point::new(self.scaler.to_ps(p.point.x), self.scaler.to_ps(p.point.y)))
            .collect();
        let on_curve: Vec<bool> = outline.points.iter().map(|p| p.on_curve).collect();

        let ranges: Vec<_> = outline.contour_ranges().collect();
        let contours: Vec<&[Point]> = ranges.iter().map(|r| &points[r.clone()]).collect();

        for index in emission_order(&contours) {
            let range = ranges[index].clone();
            write_contour(w, &points[range.clone()], &on_curve[range], stack)?;
        }

        stack.push(w, CLOSEPATH_DEPTH)?;
        w.put_str("_cl")
    }

    fn write_components<W: Write>(
        &self,
        w: &mut PsWriter<W>,
        glyph: u16,
        components: &[Component],
    ) -> Result<()> {
        for component in components {
            if component.glyph_index >= self.post.num_glyphs() {
                return Err(FontError::MalformedGlyph {
                    glyph,
                    reason: "component refers to a glyph past the end of the font",
                });
            }

            let shift = match component.args {
                ComponentArgs::Offset { dx, dy } if dx != 0 || dy != 0 => {
                    Some((self.scaler.to_ps(dx), self.scaler.to_ps(dy)))
                }
                ComponentArgs::Offset { .. } => None,
                ComponentArgs::PointMatch { parent, child } => {
                    writeln!(w, "% unimplemented shift, arg1={}, arg2={}", parent, child)?;
                    None
                }
            };

            let scale = match component.transform {
                ComponentTransform::Identity => None,
                ComponentTransform::Scale(s) => Some((s, s)),
                ComponentTransform::XyScale { x, y } => Some((x, y)),
                ComponentTransform::TwoByTwo { xx, xy, yx, yy } => {
                    writeln!(
                        w,
                        "% unimplemented 2x2 transform [{} {} {} {}]",
                        format_real(xx),
                        format_real(xy),
                        format_real(yx),
                        format_real(yy)
                    )?;
                    None
                }
            }
            .filter(|&(x, y)| x != 1.0 || y != 1.0);

            let bracketed = shift.is_some() || scale.is_some();
            if bracketed {
                w.put_str("gsave")?;
                if let Some((dx, dy)) = shift {
                    write!(w, " {} {} translate", dx, dy)?;
                }
                if let Some((x, y)) = scale {
                    write!(w, " {} {} scale", format_real(x), format_real(y))?;
                }
                w.put_char(b'\n')?;
            }

            let name = self.post.glyph_name(component.glyph_index)?;
            w.put_str("false CharStrings /")?;
            w.put_bytes(name)?;
            w.put_str(" get exec\n")?;

            if bracketed {
                w.put_str("grestore ")?;
            }
        }
        Ok(())
    }
}

/// Draw one closed contour: a moveto, then lines and curves back to the
/// first point.
fn write_contour<W: Write>(
    w: &mut PsWriter<W>,
    points: &[Point],
    on_curve: &[bool],
    stack: &mut StackTracker,
) -> Result<()> {
    let Some(&first) = points.first() else {
        return Ok(());
    };

    stack.push(w, MOVETO_DEPTH)?;
    writeln!(w, "{} {} _m", first.x, first.y)?;

    // Start of the pending run of off-curve points
    let mut run_start: Option<usize> = None;
    for j in 1..points.len() {
        if !on_curve[j] {
            run_start.get_or_insert(j);
            continue;
        }

        match run_start.take() {
            Some(start) => {
                stack.push(w, CURVETO_DEPTH)?;
                write_curves(w, points[start - 1], &points[start..j], points[j])?;
            }
            None => {
                stack.push(w, LINETO_DEPTH)?;
                writeln!(w, "{} {} _l", points[j].x, points[j].y)?;
            }
        }
    }

    match run_start {
        Some(start) => {
            stack.push(w, CURVETO_DEPTH)?;
            write_curves(w, points[start - 1], &points[start..], first)
        }
        None => {
            stack.push(w, LINETO_DEPTH)?;
            writeln!(w, "{} {} _l", first.x, first.y)
        }
    }
}

fn write_curves<W: Write>(
    w: &mut PsWriter<W>,
    start: Point,
    controls: &[Point],
    end: Point,
) -> Result<()> {
    for segment in quadratic_run_to_cubics(start, controls, end) {
        // Truncated toward zero, like the integer coordinates around them
        writeln!(
            w,
            "{} {} {} {} {} {} _c",
            segment.c1.x as i32,
            segment.c1.y as i32,
            segment.c2.x as i32,
            segment.c2.y as i32,
            segment.end.x as i32,
            segment.end.y as i32
        )?;
    }
    Ok(())
}
