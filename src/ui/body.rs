// Body grid painting
//
// One line per visible data row. Cell texts were already resolved by the
// grid builder; this module places them, paints the optional series bars,
// and records cell rectangles for drill-through hit-testing.

use super::{alignment_from, ColumnLayout};
use crate::app::AppState;
use crate::grid::{series, SERIES_CLASS};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Paragraph,
    Frame,
};

pub fn render_body(f: &mut Frame, area: Rect, app: &mut AppState, columns: &ColumnLayout) {
    let palette = app.theme.palette;
    let minicharts = app.config.minicharts;
    let visible = area.height as usize;

    let mut recorded: Vec<(Rect, usize, String)> = Vec::new();

    for (line, (row_idx, row)) in app
        .grid
        .body
        .iter()
        .enumerate()
        .skip(app.row_offset)
        .take(visible)
        .enumerate()
    {
        let y = area.y + line as u16;
        for cell in row {
            let Some((x, width)) = columns.span(&cell.column_id, cell.colspan) else {
                continue;
            };
            let rect = Rect::new(x, y, width, 1);
            if rect.width == 0 {
                continue;
            }

            let is_series = cell.classes.iter().any(|c| c == SERIES_CLASS);
            if is_series && minicharts {
                if let Some(data) = &cell.series {
                    let bars = Paragraph::new(series::render_line(data, width))
                        .style(Style::default().fg(palette.series.color()));
                    f.render_widget(bars, rect);
                    recorded.push((rect, row_idx, cell.column_id.clone()));
                    continue;
                }
            }

            let widget = Paragraph::new(cell.text.as_str())
                .alignment(alignment_from(&cell.classes))
                .style(Style::default().fg(palette.body_fg.color()));
            f.render_widget(widget, rect);
            recorded.push((rect, row_idx, cell.column_id.clone()));
        }
    }

    for (rect, row_idx, column_id) in recorded {
        app.layout.record_body(rect, row_idx, &column_id);
    }
}
