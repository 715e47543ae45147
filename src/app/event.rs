// Keyboard and mouse event handling
//
// Keys drive scrolling and app control; the mouse drives the drag-reorder
// gesture on header cells and drill-through clicks on data cells.

use super::AppState;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q` - Quit the application
/// - `Esc` - Close the drill menu, or quit when none is open
/// - `Up` / `Down` - Scroll the data rows
/// - `m`, `M` - Toggle the series minicharts
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
            false
        }
        KeyCode::Esc => {
            if app.drill.is_some() {
                app.drill = None;
                true
            } else {
                app.running = false;
                false
            }
        }
        KeyCode::Up => {
            app.scroll_up();
            true
        }
        KeyCode::Down => {
            app.scroll_down();
            true
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.config.minicharts = !app.config.minicharts;
            true
        }
        _ => true,
    }
}

/// Handle mouse events: the three-phase drag gesture on header cells,
/// drill-through clicks on data cells, wheel scrolling.
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // An open drill menu absorbs the click
            if app.drill.is_some() {
                app.drill = None;
                return;
            }
            if app.layout.header_at(mouse.column, mouse.row).is_some() {
                app.begin_drag(mouse.column, mouse.row);
            } else {
                app.open_drill(mouse.column, mouse.row);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag_to(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.finish_drag();
        }
        MouseEventKind::ScrollUp => {
            app.scroll_up();
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DragState, ViewConfig};
    use crate::model::{Cell, Column, HeaderLevel, Row, TableModel};
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;
    use ratatui::layout::Rect;
    use std::collections::HashMap;

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn fixture(pivoted: bool) -> AppState {
        let columns: Vec<Column> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, id)| Column {
                id: id.to_string(),
                pos: i as u32 * 10,
                levels: vec![Some(HeaderLevel {
                    id: format!("{id}.0"),
                    label: id.to_uppercase(),
                    colspan: 1,
                    rowspan: 1,
                    align: None,
                    cell_style: Vec::new(),
                })],
            })
            .collect();
        let mut cells = HashMap::new();
        for id in ["a", "b", "c"] {
            cells.insert(id.to_string(), Cell::default());
        }
        let model = TableModel {
            pivot_fields: if pivoted { vec!["p".into()] } else { Vec::new() },
            columns,
            rows: vec![Row { cells }],
        };
        let mut app = AppState::new(model, ViewConfig::default(), None);
        app.prepare_frame();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            app.layout
                .record_header(Rect::new(i as u16 * 10, 0, 10, 1), id);
        }
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = fixture(false);
        assert!(app.running);
        assert!(!handle_key_event(&mut app, KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = fixture(false);
        assert!(!handle_key_event(&mut app, KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_esc_closes_drill_menu_first() {
        let mut app = fixture(false);
        app.drill = Some(crate::app::DrillMenu {
            links: Vec::new(),
            origin: (0, 0),
        });
        assert!(handle_key_event(&mut app, KeyCode::Esc));
        assert!(app.drill.is_none());
        assert!(app.running);
    }

    #[test]
    fn test_toggle_minicharts() {
        let mut app = fixture(false);
        assert!(!app.config.minicharts);
        handle_key_event(&mut app, KeyCode::Char('m'));
        assert!(app.config.minicharts);
        handle_key_event(&mut app, KeyCode::Char('M'));
        assert!(!app.config.minicharts);
    }

    #[test]
    fn test_full_drag_gesture_reorders_once() {
        let mut app = fixture(false);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 2, 0));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 12, 0));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 22, 0));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 22, 0));
        assert_eq!(app.model.column_order(), vec!["b", "c", "a"]);
        assert_eq!(app.drag, DragState::Idle);
    }

    #[test]
    fn test_up_without_down_is_noop() {
        let mut app = fixture(false);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 12, 0));
        assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For pivoted tables, no sequence of pointer gestures ever changes
        /// the column order.
        #[test]
        fn prop_pivoted_tables_never_reorder(
            steps in proptest::collection::vec((0u16..40, 0u16..5, 0u8..4), 1..40)
        ) {
            let mut app = fixture(true);
            for (x, y, kind) in steps {
                let kind = match kind {
                    0 => MouseEventKind::Down(MouseButton::Left),
                    1 => MouseEventKind::Drag(MouseButton::Left),
                    2 => MouseEventKind::Up(MouseButton::Left),
                    _ => MouseEventKind::Moved,
                };
                handle_mouse_event(&mut app, mouse(kind, x, y));
            }
            prop_assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
            prop_assert!(app.config.column_order.is_empty());
        }

        /// Every completed non-pivoted gesture leaves the drag state Idle
        /// and the model's pos values renumbered onto clean group
        /// boundaries, whatever the pointer did in between.
        #[test]
        fn prop_gestures_resolve_independently(
            gestures in proptest::collection::vec(
                (0u16..40, proptest::collection::vec((0u16..40, 0u16..5), 0..6)),
                1..8
            )
        ) {
            let mut app = fixture(false);
            for (start_x, moves) in gestures {
                handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), start_x, 0));
                let mut last = (start_x, 0);
                for (x, y) in moves {
                    handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), x, y));
                    last = (x, y);
                }
                handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), last.0, last.1));
                prop_assert_eq!(&app.drag, &DragState::Idle);
            }
            // Groups always sit on 0, 10, 20 after renumbering
            let mut boundaries: Vec<u32> = app
                .model
                .ordered_columns()
                .iter()
                .map(|c| c.group())
                .collect();
            boundaries.dedup();
            prop_assert_eq!(boundaries, vec![0, 10, 20]);
        }
    }
}
