// Table model adapter
//
// Owns the columns, rows, cells and the column order. The grid builders and
// the drag controller only ever read it; the single mutation is
// move_columns(), which reorders whole top-level column groups.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Columns whose `pos` share the same floor-10 boundary form one top-level
/// group. A group is the atomic unit moved by drag-reorder.
pub const GROUP_SIZE: u32 = 10;

/// Maximum number of pivot dimensions accepted before rendering.
pub const MAX_PIVOT_FIELDS: usize = 2;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("this table accepts no more than {MAX_PIVOT_FIELDS} pivot fields (got {0})")]
    TooManyPivots(usize),
    #[error("cannot read table model {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed table model {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// A plain cell value as delivered by the upstream query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            // Whole numbers print without a trailing ".0"
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parallel arrays of a multi-point series cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesData {
    pub keys: Vec<String>,
    pub values: Vec<f64>,
    pub types: Vec<String>,
}

/// Wrapper matching the upstream series cell shape: `{"series": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesValue {
    pub series: SeriesData,
}

/// Tagged cell value. The adapter produces the tag once at deserialization;
/// the grid builders switch on it instead of probing shapes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Missing,
    Series(SeriesValue),
    List(Vec<Scalar>),
    Scalar(Scalar),
}

/// Drill-through link descriptor carried by a data cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// One data cell. `rendered` distinguishes `Some("")` (intentionally blank)
/// from `None` (use the raw value).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: CellValue,
    #[serde(default)]
    pub rendered: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub align: Option<String>,
    #[serde(default)]
    pub cell_style: Vec<String>,
    #[serde(default = "default_span")]
    pub colspan: u16,
    #[serde(default = "default_span")]
    pub rowspan: u16,
}

fn default_span() -> u16 {
    1
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: CellValue::Missing,
            rendered: None,
            html: None,
            links: Vec::new(),
            align: None,
            cell_style: Vec::new(),
            colspan: 1,
            rowspan: 1,
        }
    }
}

/// Header cell descriptor for one column at one tier depth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeaderLevel {
    /// Anchor identity of the header cell.
    pub id: String,
    pub label: String,
    #[serde(default = "default_span")]
    pub colspan: u16,
    #[serde(default = "default_span")]
    pub rowspan: u16,
    #[serde(default)]
    pub align: Option<String>,
    #[serde(default)]
    pub cell_style: Vec<String>,
}

/// One table column. `levels` holds one entry per header tier; a `None`
/// entry means the column is covered by a neighbour's span at that tier and
/// emits no header cell of its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Column {
    pub id: String,
    pub pos: u32,
    pub levels: Vec<Option<HeaderLevel>>,
}

impl Column {
    /// Floor-10 boundary of the top-level group this column belongs to.
    pub fn group(&self) -> u32 {
        (self.pos / GROUP_SIZE) * GROUP_SIZE
    }
}

/// One data row: a mapping from column id to cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    pub cells: HashMap<String, Cell>,
}

/// The finished table delivered by the upstream query. Aggregation and
/// pivoting already happened; this is a read-only projection apart from
/// column reordering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableModel {
    #[serde(default)]
    pub pivot_fields: Vec<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TableModel {
    /// Load a table model from a JSON file. Shape violations (too many
    /// pivots) are reported separately by `validate()` so they can surface
    /// as a banner instead of a startup failure.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model: TableModel =
            serde_json::from_str(&text).map_err(|source| ModelError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        tracing::info!(
            columns = model.columns.len(),
            rows = model.rows.len(),
            pivots = model.pivot_fields.len(),
            "loaded table model"
        );
        Ok(model)
    }

    /// Constraint check run before any rendering is attempted.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.pivot_fields.len() > MAX_PIVOT_FIELDS {
            return Err(ModelError::TooManyPivots(self.pivot_fields.len()));
        }
        Ok(())
    }

    /// Pivoted layouts have a fixed column structure; drag-reorder is
    /// disabled entirely when this is true.
    pub fn has_pivots(&self) -> bool {
        !self.pivot_fields.is_empty()
    }

    /// Number of header tiers (depth of the pivot nesting).
    pub fn tier_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.levels.len())
            .max()
            .unwrap_or(0)
    }

    /// All columns in display order (ascending `pos`).
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut cols: Vec<&Column> = self.columns.iter().collect();
        cols.sort_by_key(|c| c.pos);
        cols
    }

    /// Columns visible at a tier, in display order. Columns covered by a
    /// neighbour's span carry no descriptor at that tier and are skipped.
    pub fn header_cells(&self, tier: usize) -> Vec<&Column> {
        self.ordered_columns()
            .into_iter()
            .filter(|c| matches!(c.levels.get(tier), Some(Some(_))))
            .collect()
    }

    pub fn data_rows(&self) -> &[Row] {
        &self.rows
    }

    /// Columns visible for a row, in display order. May be a subset in
    /// sparse or pivoted layouts.
    pub fn row_columns<'a>(&'a self, row: &Row) -> Vec<&'a Column> {
        self.ordered_columns()
            .into_iter()
            .filter(|c| row.cells.contains_key(&c.id))
            .collect()
    }

    pub fn column_by_id(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Move the whole group at `moving_group` to the slot currently held by
    /// `target_group`, renumber `pos`, and return the new column-id order.
    /// Equal boundaries are a no-op and return the current order unchanged.
    pub fn move_columns(&mut self, moving_group: u32, target_group: u32) -> Vec<String> {
        if moving_group == target_group {
            return self.column_order();
        }

        let mut groups = self.group_boundaries();
        let Some(moving_idx) = groups.iter().position(|&g| g == moving_group) else {
            return self.column_order();
        };
        let Some(target_idx) = groups.iter().position(|&g| g == target_group) else {
            return self.column_order();
        };

        // Standard list move: the moving group takes the target's slot and
        // everything in between shifts by one. After the removal the target
        // index lands the moved group after the target when moving right and
        // before it when moving left.
        let moved = groups.remove(moving_idx);
        groups.insert(target_idx, moved);

        self.renumber(&groups);
        self.column_order()
    }

    /// Reorder groups to match a persisted column-id order. Groups are
    /// ranked by the first appearance of any of their columns; ids that are
    /// unknown are ignored, groups not mentioned keep their relative order
    /// at the end.
    pub fn apply_column_order(&mut self, order: &[String]) {
        if order.is_empty() {
            return;
        }
        let mut ranked: Vec<u32> = Vec::new();
        for id in order {
            if let Some(col) = self.column_by_id(id) {
                let group = col.group();
                if !ranked.contains(&group) {
                    ranked.push(group);
                }
            }
        }
        for group in self.group_boundaries() {
            if !ranked.contains(&group) {
                ranked.push(group);
            }
        }
        self.renumber(&ranked);
    }

    /// Current column-id order (ascending `pos`).
    pub fn column_order(&self) -> Vec<String> {
        self.ordered_columns()
            .into_iter()
            .map(|c| c.id.clone())
            .collect()
    }

    /// Distinct group boundaries in display order.
    fn group_boundaries(&self) -> Vec<u32> {
        let mut boundaries: Vec<u32> = Vec::new();
        for col in self.ordered_columns() {
            let group = col.group();
            if boundaries.last() != Some(&group) {
                boundaries.push(group);
            }
        }
        boundaries
    }

    /// Renumber `pos` so the group at rank `i` starts at `i * GROUP_SIZE`.
    /// Within-group offsets are preserved.
    fn renumber(&mut self, group_order: &[u32]) {
        let new_boundary: HashMap<u32, u32> = group_order
            .iter()
            .enumerate()
            .map(|(rank, &old)| (old, rank as u32 * GROUP_SIZE))
            .collect();
        for col in &mut self.columns {
            let old_boundary = (col.pos / GROUP_SIZE) * GROUP_SIZE;
            if let Some(&boundary) = new_boundary.get(&old_boundary) {
                col.pos = boundary + (col.pos - old_boundary);
            }
        }
    }
}
