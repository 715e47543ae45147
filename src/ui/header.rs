// Header grid painting
//
// One row per tier, one styled cell per header descriptor. Spans come
// through verbatim from the built grid; this module only turns them into
// rectangles and records those for the drag controller's hit-test.

use super::{alignment_from, ColumnLayout};
use crate::app::AppState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render_header(f: &mut Frame, area: Rect, app: &mut AppState, columns: &ColumnLayout) {
    let palette = app.theme.palette;
    let tier_count = app.grid.header.len() as u16;

    // Paint the header band first so covered gaps keep the background
    let band = Paragraph::new("").style(
        Style::default()
            .bg(palette.header_bg.color())
            .fg(palette.header_fg.color()),
    );
    f.render_widget(band, area);

    let mut recorded: Vec<(Rect, String)> = Vec::new();

    for (tier, row) in app.grid.header.iter().enumerate() {
        let y = area.y + tier as u16;
        if y >= area.y + area.height {
            break;
        }
        for cell in row {
            let Some((x, width)) = columns.span(&cell.column_id, cell.colspan) else {
                continue;
            };
            // Rowspan extends down the remaining tiers, clamped to the band
            let height = cell
                .rowspan
                .max(1)
                .min(tier_count - tier as u16)
                .min(area.y + area.height - y);
            let rect = Rect::new(x, y, width, height);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let widget = Paragraph::new(cell.text.as_str())
                .alignment(alignment_from(&cell.classes))
                .style(
                    Style::default()
                        .bg(palette.header_bg.color())
                        .fg(palette.header_fg.color())
                        .add_modifier(Modifier::BOLD),
                );
            f.render_widget(widget, rect);
            recorded.push((rect, cell.column_id.clone()));
        }
    }

    for (rect, column_id) in recorded {
        app.layout.record_header(rect, &column_id);
    }
}
