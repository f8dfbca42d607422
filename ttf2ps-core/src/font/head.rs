use crate::binary::Fixed;
use crate::error::{FontError, Result};

use super::TableData;

/// Glyph offset encoding used by the `loca` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaFormat {
    /// Offsets stored as u16 halved
    Short,
    /// Offsets stored as u32
    Long,
}

impl LocaFormat {
    pub fn from_raw(value: i16) -> Result<Self> {
        match value {
            0 => Ok(LocaFormat::Short),
            1 => Ok(LocaFormat::Long),
            other => Err(FontError::UnsupportedLocaFormat(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

/// Converts font design units into 1/1000 em PostScript units.
///
/// Rounds half up with truncating integer division, so negative values
/// round toward zero after the bias is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitScaler {
    units_per_em: i32,
    half_units_per_em: i32,
}

impl UnitScaler {
    pub fn new(units_per_em: u16) -> Result<Self> {
        if units_per_em == 0 {
            return Err(FontError::InvalidUnitsPerEm);
        }

        let units_per_em = i32::from(units_per_em);
        Ok(Self {
            units_per_em,
            half_units_per_em: units_per_em / 2,
        })
    }

    pub fn units_per_em(&self) -> i32 {
        self.units_per_em
    }

    /// Saturates at the `i32` bounds; glyph parsing keeps design units within
    /// 16 bits, so only out-of-range callers ever reach them.
    pub fn to_ps(&self, value: i32) -> i32 {
        let scaled = (i64::from(value) * 1000 + i64::from(self.half_units_per_em))
            / i64::from(self.units_per_em);
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    pub fn bbox_to_ps(&self, bbox: BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.to_ps(bbox.x_min),
            self.to_ps(bbox.y_min),
            self.to_ps(bbox.x_max),
            self.to_ps(bbox.y_max),
        )
    }
}

/// Fields of the `head` table the converter needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadTable {
    pub font_revision: Fixed,
    pub units_per_em: u16,
    /// Font-wide bounding box in design units
    pub bbox: BoundingBox,
    pub loca_format: LocaFormat,
}

impl HeadTable {
    pub fn parse(table: TableData<'_>) -> Result<Self> {
        let font_revision = table.fixed(4)?;
        let units_per_em = table.u16(18)?;
        if units_per_em == 0 {
            return Err(FontError::InvalidUnitsPerEm);
        }

        let bbox = BoundingBox::new(
            i32::from(table.i16(36)?),
            i32::from(table.i16(38)?),
            i32::from(table.i16(40)?),
            i32::from(table.i16(42)?),
        );
        let loca_format = LocaFormat::from_raw(table.i16(50)?)?;

        let glyph_data_format = table.i16(52)?;
        if glyph_data_format != 0 {
            return Err(FontError::UnsupportedGlyfFormat(glyph_data_format));
        }

        Ok(Self {
            font_revision,
            units_per_em,
            bbox,
            loca_format,
        })
    }

    pub fn scaler(&self) -> Result<UnitScaler> {
        UnitScaler::new(self.units_per_em)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Tag;

    fn head_bytes(units_per_em: u16, loca: i16, glyf: i16) -> Vec<u8> {
        let mut data = vec![0u8; 54];
        data[0..4].copy_from_slice(&[0, 1, 0, 0]);
        data[4..8].copy_from_slice(&[0, 2, 0x80, 0]);
        data[18..20].copy_from_slice(&units_per_em.to_be_bytes());
        data[36..38].copy_from_slice(&(-200i16).to_be_bytes());
        data[38..40].copy_from_slice(&(-500i16).to_be_bytes());
        data[40..42].copy_from_slice(&2048i16.to_be_bytes());
        data[42..44].copy_from_slice(&1900i16.to_be_bytes());
        data[50..52].copy_from_slice(&loca.to_be_bytes());
        data[52..54].copy_from_slice(&glyf.to_be_bytes());
        data
    }

    #[test]
    fn test_parse_head() {
        let data = head_bytes(2048, 1, 0);
        let head = HeadTable::parse(TableData::new(Tag::HEAD, &data)).unwrap();

        assert_eq!(head.font_revision, Fixed::new(2, 0x8000));
        assert_eq!(head.units_per_em, 2048);
        assert_eq!(head.bbox, BoundingBox::new(-200, -500, 2048, 1900));
        assert_eq!(head.loca_format, LocaFormat::Long);
    }

    #[test]
    fn test_ps_bbox_rounding() {
        let data = head_bytes(2048, 0, 0);
        let head = HeadTable::parse(TableData::new(Tag::HEAD, &data)).unwrap();
        let scaler = head.scaler().unwrap();

        assert_eq!(
            scaler.bbox_to_ps(head.bbox),
            BoundingBox::new(-97, -243, 1000, 928)
        );
    }

    #[test]
    fn test_rejects_bad_formats() {
        let data = head_bytes(1000, 2, 0);
        assert!(matches!(
            HeadTable::parse(TableData::new(Tag::HEAD, &data)),
            Err(FontError::UnsupportedLocaFormat(2))
        ));

        let data = head_bytes(1000, 0, 1);
        assert!(matches!(
            HeadTable::parse(TableData::new(Tag::HEAD, &data)),
            Err(FontError::UnsupportedGlyfFormat(1))
        ));

        let data = head_bytes(0, 0, 0);
        assert!(matches!(
            HeadTable::parse(TableData::new(Tag::HEAD, &data)),
            Err(FontError::InvalidUnitsPerEm)
        ));
    }

    #[test]
    fn test_scaler() {
        let scaler = UnitScaler::new(1000).unwrap();
        assert_eq!(scaler.to_ps(123), 123);
        assert_eq!(scaler.to_ps(-123), -123);

        let scaler = UnitScaler::new(2048).unwrap();
        assert_eq!(scaler.to_ps(1024), 500);
        assert_eq!(scaler.to_ps(1), 0);
        assert_eq!(scaler.to_ps(2), 1);
        assert_eq!(scaler.to_ps(-1), 0);

        assert!(matches!(UnitScaler::new(0), Err(FontError::InvalidUnitsPerEm)));
    }

    #[test]
    fn test_scaler_extremes() {
        let scaler = UnitScaler::new(16).unwrap();
        assert_eq!(scaler.to_ps(i32::from(i16::MAX)), 2_047_938);
        assert_eq!(scaler.to_ps(i32::MAX), i32::MAX);
        assert_eq!(scaler.to_ps(i32::MIN), i32::MIN);
    }
}
