//! Quick Reference シート（数式なしの静的な表）

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::layout::SheetKind;
use crate::style::StyleToken;

const KIND: SheetKind = SheetKind::QuickReference;

pub const HEADER_ROW: u32 = 2;
pub const FIRST_DATA_ROW: u32 = 3;

const HEADERS: [&str; 4] = ["Cookie", "Recommended Size (g)", "Oven Temp", "Bake Time"];

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, "📋 QUICK REFERENCE - COOKIE SIZES & BAKE TIMES")?;
    w.header_row(HEADER_ROW, &HEADERS)?;

    for (i, entry) in ctx.catalog.reference.iter().enumerate() {
        let row = FIRST_DATA_ROW + i as u32;
        let values = [&entry.cookie, &entry.size_range, &entry.oven_temp, &entry.bake_time];
        for (col, value) in values.iter().enumerate() {
            w.text(row, col as u16, value, StyleToken::Cell)?;
        }
    }

    Ok(())
}
