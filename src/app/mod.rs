// Application state management
//
// AppState owns the table model, the view configuration and the transient
// interaction state (drag gesture, drill menu, scroll position). The grid
// and theme are rebuilt from scratch at the start of every render pass.

pub mod config;
pub mod event;

pub use config::ViewConfig;

use crate::grid::{self, Grid};
use crate::model::{Link, TableModel};
use crate::theme::{self, ActiveTheme};
use ratatui::layout::Rect;
use std::path::PathBuf;

/// A single drag gesture. Owned by AppState as a plain value, scoped to one
/// gesture; the grid builders never read it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Column whose header cell initiated the drag.
        source: String,
        /// Current pointer position (column, row), drives the indicator.
        pointer: (u16, u16),
        /// Column whose header cell last received a pointer-over event.
        /// Cleared whenever the pointer leaves the header cells.
        target: Option<String>,
    },
}

/// Drill-through request raised by a left click on a data cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillMenu {
    pub links: Vec<Link>,
    /// Originating pointer position.
    pub origin: (u16, u16),
}

/// Cell rectangles recorded by the painter each pass, read back for
/// pointer hit-testing.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    /// Header cell rect and owning column id.
    header_cells: Vec<(Rect, String)>,
    /// Body cell rect, row index and column id.
    body_cells: Vec<(Rect, usize, String)>,
}

impl LayoutMap {
    pub fn clear(&mut self) {
        self.header_cells.clear();
        self.body_cells.clear();
    }

    pub fn record_header(&mut self, rect: Rect, column_id: &str) {
        self.header_cells.push((rect, column_id.to_string()));
    }

    pub fn record_body(&mut self, rect: Rect, row: usize, column_id: &str) {
        self.body_cells.push((rect, row, column_id.to_string()));
    }

    /// Column id of the header cell under the pointer, if any.
    pub fn header_at(&self, x: u16, y: u16) -> Option<&str> {
        self.header_cells
            .iter()
            .find(|(rect, _)| rect.contains((x, y).into()))
            .map(|(_, id)| id.as_str())
    }

    /// Row index and column id of the data cell under the pointer, if any.
    pub fn body_at(&self, x: u16, y: u16) -> Option<(usize, &str)> {
        self.body_cells
            .iter()
            .find(|(rect, _, _)| rect.contains((x, y).into()))
            .map(|(_, row, id)| (*row, id.as_str()))
    }
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// The finished table delivered upstream; read-only apart from reorders
    pub model: TableModel,

    /// View configuration; owns the persisted column order
    pub config: ViewConfig,

    /// Where the configuration is persisted, if anywhere
    pub config_path: Option<PathBuf>,

    /// Theme resolved for the current pass
    pub theme: ActiveTheme,

    /// Grid built for the current pass
    pub grid: Grid,

    /// Current drag gesture
    pub drag: DragState,

    /// Open drill-through menu, if any
    pub drill: Option<DrillMenu>,

    /// User-visible error; when set, rendering of the table is skipped
    pub error: Option<String>,

    /// First visible body row
    pub row_offset: usize,

    /// Cell rectangles from the last paint, for hit-testing
    pub layout: LayoutMap,
}

impl AppState {
    pub fn new(mut model: TableModel, config: ViewConfig, config_path: Option<PathBuf>) -> Self {
        // Input-shape check before any rendering is attempted
        let error = model.validate().err().map(|e| e.to_string());
        model.apply_column_order(&config.column_order);
        Self {
            running: true,
            model,
            config,
            config_path,
            theme: ActiveTheme::default(),
            grid: Grid::default(),
            drag: DragState::default(),
            drill: None,
            error,
            row_offset: 0,
            layout: LayoutMap::default(),
        }
    }

    /// One update pass: resolve the theme, then rebuild the grid. The theme
    /// step is sequenced first so the pass never paints with a stale
    /// palette. A pass with a standing error skips grid construction.
    pub fn prepare_frame(&mut self) {
        self.theme = theme::resolve(&self.config);
        if self.error.is_none() {
            self.grid = grid::build(&self.model, &self.config);
        }
    }

    pub fn scroll_up(&mut self) {
        self.row_offset = self.row_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.row_offset + 1 < self.model.data_rows().len() {
            self.row_offset += 1;
        }
    }

    /// Start a drag gesture from the header cell under the pointer.
    /// Reordering is disabled entirely for pivoted tables.
    pub fn begin_drag(&mut self, x: u16, y: u16) {
        if self.model.has_pivots() {
            return;
        }
        if let Some(column_id) = self.layout.header_at(x, y) {
            // The source cell is under the pointer, so it is also the
            // initial drop target; releasing in place is a same-group no-op.
            self.drag = DragState::Dragging {
                source: column_id.to_string(),
                pointer: (x, y),
                target: Some(column_id.to_string()),
            };
        }
    }

    /// Track the pointer during a drag: move the indicator and refresh the
    /// drop target from the header hit-test. No structural changes yet.
    pub fn drag_to(&mut self, x: u16, y: u16) {
        let over = self.layout.header_at(x, y).map(str::to_string);
        if let DragState::Dragging {
            pointer, target, ..
        } = &mut self.drag
        {
            *pointer = (x, y);
            // Pointer-out clears the target so a stale one is never reused
            *target = over;
        }
    }

    /// Complete the gesture: compute the source and target group boundaries
    /// and issue at most one reorder. The drag state is consumed either way,
    /// so successive gestures always resolve independently.
    pub fn finish_drag(&mut self) {
        let DragState::Dragging { source, target, .. } = std::mem::take(&mut self.drag) else {
            return;
        };
        if self.model.has_pivots() {
            return;
        }
        let Some(target) = target else {
            // Released with no recorded target: silent no-op
            return;
        };
        let (Some(moving), Some(over)) = (
            self.model.column_by_id(&source),
            self.model.column_by_id(&target),
        ) else {
            return;
        };
        let moving_group = moving.group();
        let target_group = over.group();
        if moving_group == target_group {
            return;
        }
        tracing::info!(moving_group, target_group, "reordering column group");
        let order = self.model.move_columns(moving_group, target_group);
        self.config
            .update_column_order(order, self.config_path.as_deref());
    }

    /// Raise a drill-through request for the data cell under the pointer.
    /// Cells without links are a silent no-op.
    pub fn open_drill(&mut self, x: u16, y: u16) {
        let Some((row_idx, column_id)) = self.layout.body_at(x, y) else {
            return;
        };
        let Some(row) = self.grid.body.get(row_idx) else {
            return;
        };
        let Some(cell) = row.iter().find(|c| c.column_id == column_id) else {
            return;
        };
        if cell.links.is_empty() {
            return;
        }
        tracing::debug!(row = row_idx, column = %column_id, links = cell.links.len(), "drill-through requested");
        self.drill = Some(DrillMenu {
            links: cell.links.clone(),
            origin: (x, y),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, CellValue, Column, HeaderLevel, Row, Scalar};
    use std::collections::HashMap;

    fn level(id: &str, label: &str) -> Option<HeaderLevel> {
        Some(HeaderLevel {
            id: format!("{id}.0"),
            label: label.to_string(),
            colspan: 1,
            rowspan: 1,
            align: None,
            cell_style: Vec::new(),
        })
    }

    fn column(id: &str, pos: u32) -> Column {
        Column {
            id: id.to_string(),
            pos,
            levels: vec![level(id, id)],
        }
    }

    fn model(pivoted: bool) -> TableModel {
        let mut cells = HashMap::new();
        for id in ["a", "b", "c"] {
            cells.insert(
                id.to_string(),
                Cell {
                    value: CellValue::Scalar(Scalar::Text(format!("{id}-val"))),
                    links: vec![crate::model::Link {
                        label: format!("drill {id}"),
                        url: format!("https://example.com/{id}"),
                    }],
                    ..Cell::default()
                },
            );
        }
        TableModel {
            pivot_fields: if pivoted { vec!["p".into()] } else { Vec::new() },
            columns: vec![column("a", 0), column("b", 10), column("c", 20)],
            rows: vec![Row { cells }],
        }
    }

    /// AppState with one header row laid out at y = 0, each cell 10 wide.
    fn app(pivoted: bool) -> AppState {
        let mut app = AppState::new(model(pivoted), ViewConfig::default(), None);
        app.prepare_frame();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            app.layout
                .record_header(Rect::new(i as u16 * 10, 0, 10, 1), id);
            app.layout
                .record_body(Rect::new(i as u16 * 10, 1, 10, 1), 0, id);
        }
        app
    }

    #[test]
    fn test_drag_between_groups_issues_exactly_one_reorder() {
        let mut app = app(false);
        app.begin_drag(2, 0); // header cell "a"
        app.drag_to(15, 0); // over header cell "b"
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["b", "a", "c"]);
        assert_eq!(app.config.column_order, vec!["b", "a", "c"]);
        assert_eq!(app.drag, DragState::Idle);
    }

    #[test]
    fn test_release_within_same_group_is_noop() {
        let mut app = app(false);
        app.begin_drag(2, 0);
        app.drag_to(5, 0); // still over "a"
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
        assert!(app.config.column_order.is_empty());
    }

    #[test]
    fn test_release_in_place_without_move_is_noop() {
        let mut app = app(false);
        app.begin_drag(2, 0);
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pointer_out_clears_target() {
        let mut app = app(false);
        app.begin_drag(2, 0);
        app.drag_to(15, 0); // over "b"
        app.drag_to(15, 10); // off all header cells
        app.finish_drag();
        // No valid target at release: silent no-op
        assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stale_target_never_leaks_into_next_gesture() {
        let mut app = app(false);
        app.begin_drag(2, 0);
        app.drag_to(25, 0); // over "c"
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["b", "c", "a"]);

        // Second gesture released off-header must not reuse "c"
        app.begin_drag(2, 0);
        app.drag_to(2, 20);
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_pivoted_table_never_reorders() {
        let mut app = app(true);
        app.begin_drag(2, 0);
        assert_eq!(app.drag, DragState::Idle);
        app.drag_to(15, 0);
        app.finish_drag();
        assert_eq!(app.model.column_order(), vec!["a", "b", "c"]);
        assert!(app.config.column_order.is_empty());
    }

    #[test]
    fn test_drag_off_header_does_not_start() {
        let mut app = app(false);
        app.begin_drag(2, 5); // body area
        assert_eq!(app.drag, DragState::Idle);
    }

    #[test]
    fn test_click_on_linked_cell_opens_drill() {
        let mut app = app(false);
        app.open_drill(12, 1); // body cell "b"
        let drill = app.drill.expect("drill menu should open");
        assert_eq!(drill.links.len(), 1);
        assert_eq!(drill.links[0].label, "drill b");
        assert_eq!(drill.origin, (12, 1));
    }

    #[test]
    fn test_click_outside_cells_is_noop() {
        let mut app = app(false);
        app.open_drill(50, 50);
        assert!(app.drill.is_none());
    }

    #[test]
    fn test_too_many_pivots_surfaces_error_and_skips_grid() {
        let mut m = model(false);
        m.pivot_fields = vec!["p1".into(), "p2".into(), "p3".into()];
        let mut app = AppState::new(m, ViewConfig::default(), None);
        assert!(app.error.is_some());
        app.prepare_frame();
        assert!(app.grid.header.is_empty());
        assert!(app.grid.body.is_empty());
    }

    #[test]
    fn test_persisted_column_order_is_applied_at_startup() {
        let config = ViewConfig {
            column_order: vec!["c".into(), "a".into(), "b".into()],
            ..ViewConfig::default()
        };
        let app = AppState::new(model(false), config, None);
        assert_eq!(app.model.column_order(), vec!["c", "a", "b"]);
    }
}
