use crate::error::{FontError, Result};

use super::TableData;

/// Offset of `numberOfHMetrics` in `hhea`.
const NUMBER_OF_H_METRICS_OFFSET: usize = 34;

pub fn number_of_h_metrics(hhea: TableData<'_>) -> Result<u16> {
    hhea.u16(NUMBER_OF_H_METRICS_OFFSET)
}

/// Advance widths from `hmtx`
#[derive(Debug, Clone, Copy)]
pub struct HorizontalMetrics<'a> {
    table: TableData<'a>,
    number_of_h_metrics: u16,
}

impl<'a> HorizontalMetrics<'a> {
    pub fn new(table: TableData<'a>, number_of_h_metrics: u16) -> Self {
        Self {
            table,
            number_of_h_metrics,
        }
    }

    /// Advance width of `glyph` in design units. Glyphs past the last long
    /// metric share its width.
    pub fn advance_width(&self, glyph: u16) -> Result<u16> {
        if self.number_of_h_metrics == 0 {
            return Err(FontError::MalformedGlyph {
                glyph,
                reason: "'hhea' declares no horizontal metrics",
            });
        }

        let index = glyph.min(self.number_of_h_metrics - 1);
        self.table.u16(index as usize * 4)
    }
}
