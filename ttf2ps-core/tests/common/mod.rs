//! Synthetic TrueType fonts for integration tests
//!
//! Builds a minimal but well-formed font file in memory: `head`, `hhea`,
//! `hmtx`, `maxp`, `loca`, `glyf`, `name` and `post`, plus any extra tables
//! a test asks for.

#![allow(dead_code)]

use std::io::Cursor;

use ttf2ps::font::STANDARD_NAMES;
use ttf2ps::{Tag, TrueTypeFont};

/// One point of a simple glyph: x, y and whether it is on the curve.
pub type TestPoint = (i16, i16, bool);

/// Encode a simple glyph with every coordinate stored as a word delta.
pub fn simple_glyph(contours: &[&[TestPoint]]) -> Vec<u8> {
    let points: Vec<TestPoint> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut data = Vec::new();
    push_i16(&mut data, contours.len() as i16);
    for v in [x_min, y_min, x_max, y_max] {
        push_i16(&mut data, v);
    }

    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        push_u16(&mut data, end - 1);
    }

    // no instructions
    push_u16(&mut data, 0);

    for point in &points {
        data.push(u8::from(point.2));
    }

    let mut previous = 0i16;
    for point in &points {
        push_i16(&mut data, point.0 - previous);
        previous = point.0;
    }
    previous = 0;
    for point in &points {
        push_i16(&mut data, point.1 - previous);
        previous = point.1;
    }

    if data.len() % 2 != 0 {
        data.push(0);
    }
    data
}

/// Encode a composite glyph placing each `(glyph, dx, dy)` component.
pub fn composite_glyph(bbox: [i16; 4], components: &[(u16, i16, i16)]) -> Vec<u8> {
    const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
    const ARGS_ARE_XY_VALUES: u16 = 0x0002;
    const MORE_COMPONENTS: u16 = 0x0020;

    let mut data = Vec::new();
    push_i16(&mut data, -1);
    for v in bbox {
        push_i16(&mut data, v);
    }

    for (i, &(glyph, dx, dy)) in components.iter().enumerate() {
        let mut flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if i + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        push_u16(&mut data, flags);
        push_u16(&mut data, glyph);
        push_i16(&mut data, dx);
        push_i16(&mut data, dy);
    }
    data
}

/// A single closed polygon with `n` on-curve points.
pub fn polygon_glyph(n: usize) -> Vec<u8> {
    let points: Vec<TestPoint> = (0..n)
        .map(|i| (((i * 37) % 1000) as i16, ((i * 91) % 800) as i16, true))
        .collect();
    simple_glyph(&[&points])
}

struct TestGlyph {
    name: String,
    data: Vec<u8>,
    advance: u16,
}

pub struct FontBuilder {
    units_per_em: u16,
    long_loca: bool,
    post_format: [u8; 4],
    glyphs: Vec<TestGlyph>,
    names: Vec<(u16, String)>,
    h_metrics: Option<u16>,
    extra_tables: Vec<(Tag, Vec<u8>)>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            long_loca: false,
            post_format: [0, 2, 0, 0],
            glyphs: Vec::new(),
            names: vec![
                (0, "Copyright (c) Test Foundry".to_string()),
                (1, "Test Sans".to_string()),
                (2, "Regular".to_string()),
                (4, "Test Sans Regular".to_string()),
                (5, "Version 1.000".to_string()),
                (6, "TestSans-Regular".to_string()),
            ],
            h_metrics: None,
            extra_tables: Vec::new(),
        }
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn long_loca(mut self) -> Self {
        self.long_loca = true;
        self
    }

    pub fn post_format(mut self, format: [u8; 4]) -> Self {
        self.post_format = format;
        self
    }

    /// Add a glyph named `name`; standard Macintosh names are stored by
    /// index, anything else as a custom Pascal string.
    pub fn glyph(mut self, name: &str, data: Vec<u8>, advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            data,
            advance,
        });
        self
    }

    /// Store long metrics for the first `count` glyphs only.
    pub fn h_metrics(mut self, count: u16) -> Self {
        self.h_metrics = Some(count);
        self
    }

    pub fn name(mut self, name_id: u16, value: &str) -> Self {
        self.names.retain(|(id, _)| *id != name_id);
        self.names.push((name_id, value.to_string()));
        self
    }

    pub fn without_name(mut self, name_id: u16) -> Self {
        self.names.retain(|(id, _)| *id != name_id);
        self
    }

    pub fn table(mut self, tag: Tag, data: Vec<u8>) -> Self {
        self.extra_tables.push((tag, data));
        self
    }

    fn num_glyphs(&self) -> u16 {
        self.glyphs.len() as u16
    }

    fn num_h_metrics(&self) -> u16 {
        self.h_metrics.unwrap_or_else(|| self.num_glyphs())
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut offsets = vec![0u32];
        for glyph in &self.glyphs {
            glyf.extend_from_slice(&glyph.data);
            offsets.push(glyf.len() as u32);
        }

        let mut loca = Vec::new();
        for offset in offsets {
            if self.long_loca {
                push_u32(&mut loca, offset);
            } else {
                push_u16(&mut loca, (offset / 2) as u16);
            }
        }
        (glyf, loca)
    }

    fn head(&self) -> Vec<u8> {
        let mut x_min = i16::MAX;
        let mut y_min = i16::MAX;
        let mut x_max = i16::MIN;
        let mut y_max = i16::MIN;
        for glyph in self.glyphs.iter().filter(|g| g.data.len() >= 10) {
            let bbox: Vec<i16> = (0..4)
                .map(|i| i16::from_be_bytes([glyph.data[2 + i * 2], glyph.data[3 + i * 2]]))
                .collect();
            x_min = x_min.min(bbox[0]);
            y_min = y_min.min(bbox[1]);
            x_max = x_max.max(bbox[2]);
            y_max = y_max.max(bbox[3]);
        }
        if x_min > x_max {
            (x_min, y_min, x_max, y_max) = (0, 0, 0, 0);
        }

        let mut data = Vec::new();
        push_u32(&mut data, 0x0001_0000);
        // fontRevision 1.5
        push_u32(&mut data, 0x0001_8000);
        push_u32(&mut data, 0);
        push_u32(&mut data, 0x5F0F_3CF5);
        push_u16(&mut data, 0);
        push_u16(&mut data, self.units_per_em);
        data.extend_from_slice(&[0; 16]);
        for v in [x_min, y_min, x_max, y_max] {
            push_i16(&mut data, v);
        }
        push_u16(&mut data, 0);
        push_u16(&mut data, 8);
        push_i16(&mut data, 2);
        push_i16(&mut data, i16::from(self.long_loca));
        push_i16(&mut data, 0);
        data
    }

    fn hhea(&self) -> Vec<u8> {
        let mut data = vec![0u8; 34];
        data[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        push_u16(&mut data, self.num_h_metrics());
        data
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut data = Vec::new();
        for (i, glyph) in self.glyphs.iter().enumerate() {
            if i < usize::from(self.num_h_metrics()) {
                push_u16(&mut data, glyph.advance);
            }
            push_i16(&mut data, 0);
        }
        data
    }

    fn maxp(&self) -> Vec<u8> {
        let mut data = Vec::new();
        push_u32(&mut data, 0x0000_5000);
        push_u16(&mut data, self.num_glyphs());
        data
    }

    fn name_table(&self) -> Vec<u8> {
        let mut data = Vec::new();
        push_u16(&mut data, 0);
        push_u16(&mut data, self.names.len() as u16);
        push_u16(&mut data, 6 + 12 * self.names.len() as u16);

        let mut storage = Vec::new();
        for (name_id, value) in &self.names {
            for v in [1u16, 0, 0, *name_id, value.len() as u16, storage.len() as u16] {
                push_u16(&mut data, v);
            }
            storage.extend_from_slice(value.as_bytes());
        }
        data.extend_from_slice(&storage);
        data
    }

    fn post(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&self.post_format);
        // italicAngle -12.5
        push_u32(&mut data, 0xFFF3_8000);
        push_i16(&mut data, -100);
        push_i16(&mut data, 50);
        push_u32(&mut data, 0);
        push_u32(&mut data, 0);
        push_u32(&mut data, 0);
        push_u32(&mut data, 0);
        push_u32(&mut data, 0);

        push_u16(&mut data, self.num_glyphs());
        let mut custom: Vec<&str> = Vec::new();
        for glyph in &self.glyphs {
            let index = match STANDARD_NAMES.iter().position(|&n| n == glyph.name) {
                Some(index) => index as u16,
                None => {
                    custom.push(&glyph.name);
                    257 + custom.len() as u16
                }
            };
            push_u16(&mut data, index);
        }
        for name in custom {
            data.push(name.len() as u8);
            data.extend_from_slice(name.as_bytes());
        }
        data
    }

    /// The tables of the font, sorted by tag.
    pub fn tables(&self) -> Vec<(Tag, Vec<u8>)> {
        let (glyf, loca) = self.glyf_and_loca();
        let mut tables = vec![
            (Tag::HEAD, self.head()),
            (Tag::HHEA, self.hhea()),
            (Tag::HMTX, self.hmtx()),
            (Tag::MAXP, self.maxp()),
            (Tag::LOCA, loca),
            (Tag::GLYF, glyf),
            (Tag::NAME, self.name_table()),
            (Tag::POST, self.post()),
        ];
        tables.extend(self.extra_tables.iter().cloned());
        tables.sort_by_key(|(tag, _)| *tag);
        tables
    }

    pub fn build(&self) -> Vec<u8> {
        let tables = self.tables();

        let mut data = Vec::new();
        push_u32(&mut data, 0x0001_0000);
        push_u16(&mut data, tables.len() as u16);
        data.extend_from_slice(&[0; 6]);

        let mut offset = 12 + 16 * tables.len();
        let mut body = Vec::new();
        for (tag, bytes) in &tables {
            data.extend_from_slice(tag.as_bytes());
            push_u32(&mut data, checksum(bytes));
            push_u32(&mut data, offset as u32);
            push_u32(&mut data, bytes.len() as u32);

            body.extend_from_slice(bytes);
            while body.len() % 4 != 0 {
                body.push(0);
            }
            offset = 12 + 16 * tables.len() + body.len();
        }

        data.extend_from_slice(&body);
        data
    }

    pub fn open(&self) -> TrueTypeFont<Cursor<Vec<u8>>> {
        TrueTypeFont::from_reader(Cursor::new(self.build())).unwrap()
    }
}

/// A font with an empty `.notdef` and a triangle `A`.
pub fn triangle_font() -> FontBuilder {
    FontBuilder::new().glyph(".notdef", Vec::new(), 500).glyph(
        "A",
        simple_glyph(&[&[(0, 0, true), (500, 700, true), (1000, 0, true)]]),
        1000,
    )
}

pub fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// Hex strings of the `/sfnts[...]def` array, decoded, in order.
pub fn sfnts_strings(output: &str) -> Vec<Vec<u8>> {
    let start = output.find("/sfnts[").unwrap() + "/sfnts[".len();
    let end = start + output[start..].find("]def").unwrap();

    output[start..end]
        .split('<')
        .skip(1)
        .map(|s| {
            let digits: String = s
                .split('>')
                .next()
                .unwrap()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            hex::decode(digits).unwrap()
        })
        .collect()
}

fn push_u16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_be_bytes());
}

fn push_i16(data: &mut Vec<u8>, value: i16) {
    data.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_be_bytes());
}
