// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and the active
// theme/layout indicators.

use crate::app::AppState;
use crate::theme::LayoutStyle;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.theme.palette;
    let available_width = area.width.saturating_sub(4);

    struct Hint {
        priority: u8,
        key: &'static str,
        desc: &'static str,
    }

    let drag_hint = if app.model.has_pivots() {
        "Reorder locked (pivoted) | "
    } else {
        "Drag header to reorder | "
    };

    let hints = [
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
        },
        Hint {
            priority: 1,
            key: "↑↓:",
            desc: "Scroll | ",
        },
        Hint {
            priority: 2,
            key: "🖱:",
            desc: drag_hint,
        },
        Hint {
            priority: 2,
            key: "m:",
            desc: "Minicharts | ",
        },
        Hint {
            priority: 3,
            key: "Esc:",
            desc: "Close menu | ",
        },
    ];

    // Build status text, adding hints until we run out of space
    let mut spans = vec![Span::styled(" ▦ ", Style::default().fg(palette.accent.color()))];
    let mut current_length = 4;

    for priority in 1..=3 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.len() + hint.desc.len();
            if current_length + hint_length <= available_width as usize {
                spans.push(Span::styled(
                    hint.key,
                    Style::default()
                        .fg(palette.accent.color())
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    // Active theme/layout indicators
    let layout_name = match app.theme.layout {
        LayoutStyle::Fixed => "fixed",
        LayoutStyle::Auto => "auto",
    };
    spans.push(Span::styled(
        format!("[{} / {}]", app.config.theme, layout_name),
        Style::default().fg(palette.body_fg.color()),
    ));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border.color())),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}
