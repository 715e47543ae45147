// Overlays: drag indicator, drill menu, error banner
//
// Everything here floats above the grid and is derived from transient
// interaction state; none of it feeds back into grid construction.

use crate::app::{AppState, DragState};
use crate::theme::ActiveTheme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Positional indicator tracking the pointer during a header drag.
pub fn render_drag_indicator(f: &mut Frame, app: &AppState) {
    let DragState::Dragging {
        source, pointer, ..
    } = &app.drag
    else {
        return;
    };

    // Label the indicator with the dragged column's topmost header text
    let label = app
        .grid
        .header
        .iter()
        .flatten()
        .find(|cell| &cell.column_id == source)
        .map(|cell| cell.text.as_str())
        .unwrap_or(source.as_str());

    let width = (label.width() as u16 + 2).min(f.area().width);
    let x = pointer.0.min(f.area().width.saturating_sub(width));
    let y = (pointer.1 + 1).min(f.area().height.saturating_sub(1));
    let rect = Rect::new(x, y, width, 1);

    f.render_widget(Clear, rect);
    let indicator = Paragraph::new(format!(" {label} ")).style(
        Style::default()
            .bg(app.theme.palette.accent.color())
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(indicator, rect);
}

/// Drill-through menu listing the clicked cell's links.
pub fn render_drill_menu(f: &mut Frame, app: &AppState) {
    let Some(drill) = &app.drill else {
        return;
    };
    let palette = app.theme.palette;

    let lines: Vec<Line> = drill
        .links
        .iter()
        .map(|link| {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", link.label),
                    Style::default()
                        .fg(palette.accent.color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(link.url.as_str(), Style::default().fg(palette.body_fg.color())),
            ])
        })
        .collect();

    let width = drill
        .links
        .iter()
        .map(|l| l.label.width() + l.url.width() + 3)
        .max()
        .unwrap_or(10)
        .min(f.area().width.saturating_sub(2) as usize) as u16
        + 2;
    let height = lines.len() as u16 + 2;
    let x = drill.origin.0.min(f.area().width.saturating_sub(width));
    let y = (drill.origin.1 + 1).min(f.area().height.saturating_sub(height));
    let rect = Rect::new(x, y, width, height);

    f.render_widget(Clear, rect);
    let menu = Paragraph::new(lines).block(
        Block::default()
            .title(" Drill ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border.color())),
    );
    f.render_widget(menu, rect);
}

/// User-visible error banner shown instead of the table.
pub fn render_error(f: &mut Frame, area: Rect, message: &str, theme: &ActiveTheme) {
    let palette = theme.palette;
    let banner = Paragraph::new(Line::from(vec![Span::styled(
        message,
        Style::default()
            .fg(palette.error.color())
            .add_modifier(Modifier::BOLD),
    )]))
    .block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.error.color())),
    );
    f.render_widget(banner, area);
}
