use super::{LayoutContext, LayoutError};
use crate::deck::primitive::{Bounds, CellData, HAlign, Slide, TablePrimitive};
use crate::deck::spec::SlideSpec;
use crate::deck::theme::contrast::{correct_text_color, on_color};

const MAX_ROW_H: f64 = 0.45;
const MIN_ROW_H: f64 = 0.2;

pub(super) fn layout(
    ctx: &LayoutContext<'_>,
    spec: &SlideSpec,
    headers: &[String],
    rows: &[Vec<String>],
    emphasis: &[usize],
) -> Result<Slide, LayoutError> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Err(LayoutError::EmptyTable);
    }

    let c = &ctx.theme.colors;
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);

    let has_header = !headers.is_empty();
    let total_rows = rows.len() + usize::from(has_header);
    let row_height = (ctx.remaining_height(top) / total_rows.max(1) as f64).clamp(MIN_ROW_H, MAX_ROW_H);
    let size = if total_rows > 10 { 11.0 } else { 14.0 };
    let col_width = ctx.content_width() / columns as f64;

    let mut cells = Vec::with_capacity(total_rows);
    if has_header {
        let mut style = ctx.body_style(size).bold().align(HAlign::Center);
        style.color = on_color(c.primary);
        cells.push(padded(headers, columns, |text| CellData {
            text: text.to_string(),
            style: style.clone(),
            fill: Some(c.primary),
        }));
    }

    for (r, row) in rows.iter().enumerate() {
        let emphasized = emphasis.contains(&r);
        let fill = if emphasized {
            c.primary.tint(0.85)
        } else if r % 2 == 0 {
            c.primary.tint(0.92)
        } else {
            c.background
        };
        let mut style = ctx.body_style(size);
        if emphasized {
            style = style.bold();
            style.color = correct_text_color(c.primary, fill);
        } else {
            style.color = correct_text_color(c.text, fill);
        }
        cells.push(padded(row, columns, |text| CellData {
            text: text.to_string(),
            style: style.clone(),
            fill: Some(fill),
        }));
    }

    slide.push(TablePrimitive {
        bounds: Bounds::new(ctx.margin(), top, ctx.content_width(), row_height * total_rows as f64),
        col_widths: vec![col_width; columns],
        row_height,
        rows: cells,
        border: Some(c.text_light.tint(0.5)),
        header: has_header,
    });
    Ok(slide)
}

/// One table row, short rows filled with empty cells.
fn padded(row: &[String], columns: usize, cell: impl Fn(&str) -> CellData) -> Vec<CellData> {
    (0..columns)
        .map(|i| cell(row.get(i).map(String::as_str).unwrap_or("")))
        .collect()
}
