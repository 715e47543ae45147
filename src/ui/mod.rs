// UI painting module
//
// Paints the built grid into the frame and records cell rectangles for
// pointer hit-testing. The grid itself is constructed in `grid`; nothing
// here resolves cell values or spans.

mod body;
mod header;
mod overlay;
mod status_bar;

use crate::app::AppState;
use crate::theme::LayoutStyle;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use body::render_body;
use header::render_header;
use overlay::{render_drag_indicator, render_drill_menu, render_error};
use status_bar::render_status_bar;

/// Minimum width a column is ever given under the auto layout.
const MIN_COLUMN_WIDTH: u16 = 3;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Theme resolution is sequenced before grid construction
    app.prepare_frame();
    app.layout.clear();

    let size = f.area();

    // Main layout: table, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    if let Some(message) = app.error.clone() {
        render_error(f, chunks[0], &message, &app.theme);
    } else {
        let tier_count = app.grid.header.len() as u16;
        let table_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(tier_count), Constraint::Min(0)])
            .split(chunks[0]);

        let columns = ColumnLayout::compute(app, chunks[0]);
        render_header(f, table_chunks[0], app, &columns);
        render_body(f, table_chunks[1], app, &columns);
    }

    render_status_bar(f, chunks[1], app);

    // Overlays float above the grid
    render_drill_menu(f, app);
    render_drag_indicator(f, app);
}

/// Per-pass horizontal layout of the leaf columns.
pub(crate) struct ColumnLayout {
    /// Column id, x origin and width, in display order.
    slots: Vec<(String, u16, u16)>,
}

impl ColumnLayout {
    /// Compute column widths for the pass: equal split under the fixed
    /// layout, content-sized under auto (scaled down when over budget).
    fn compute(app: &AppState, area: Rect) -> Self {
        let order: Vec<String> = app.model.column_order();
        if order.is_empty() || area.width == 0 {
            return Self { slots: Vec::new() };
        }

        let widths: Vec<u16> = match app.theme.layout {
            LayoutStyle::Fixed => {
                let per = (area.width / order.len() as u16).max(1);
                vec![per; order.len()]
            }
            LayoutStyle::Auto => {
                let mut widths: Vec<u16> = order
                    .iter()
                    .map(|id| content_width(app, id).max(MIN_COLUMN_WIDTH) + 1)
                    .collect();
                let total: u32 = widths.iter().map(|&w| w as u32).sum();
                if total > area.width as u32 {
                    for w in &mut widths {
                        *w = ((*w as u32 * area.width as u32 / total) as u16)
                            .max(1);
                    }
                }
                widths
            }
        };

        let mut slots = Vec::with_capacity(order.len());
        let mut x = area.x;
        for (id, width) in order.into_iter().zip(widths) {
            slots.push((id, x, width));
            x = x.saturating_add(width);
        }
        Self { slots }
    }

    fn index(&self, column_id: &str) -> Option<usize> {
        self.slots.iter().position(|(id, _, _)| id == column_id)
    }

    /// Rect covered by a cell anchored at `column_id` spanning `colspan`
    /// leaf columns, clamped to the columns that actually exist.
    pub(crate) fn span(&self, column_id: &str, colspan: u16) -> Option<(u16, u16)> {
        let start = self.index(column_id)?;
        let end = (start + colspan.max(1) as usize).min(self.slots.len());
        let x = self.slots[start].1;
        let width: u16 = self.slots[start..end].iter().map(|(_, _, w)| w).sum();
        Some((x, width))
    }
}

/// Widest content a column shows: its single-span header labels and every
/// single-span body cell text.
fn content_width(app: &AppState, column_id: &str) -> u16 {
    let header = app
        .grid
        .header
        .iter()
        .flatten()
        .filter(|cell| cell.column_id == column_id && cell.colspan == 1)
        .map(|cell| cell.text.width());
    let body = app
        .grid
        .body
        .iter()
        .flatten()
        .filter(|cell| cell.column_id == column_id && cell.colspan == 1)
        .map(|cell| cell.text.width());
    header.chain(body).max().unwrap_or(0) as u16
}

/// Map a composed class list to a text alignment. The first recognized
/// align class wins; everything else defaults left.
pub(crate) fn alignment_from(classes: &[String]) -> Alignment {
    for class in classes {
        match class.as_str() {
            "left" => return Alignment::Left,
            "center" => return Alignment::Center,
            "right" => return Alignment::Right,
            _ => {}
        }
    }
    Alignment::Left
}
