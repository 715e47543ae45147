// Grid construction
//
// Builds the header and body cell grids fresh on every render pass. These
// builders are pure: they read the table model and view config and never
// touch drag state or the terminal.

pub mod series;

use crate::app::config::{ViewConfig, BODY_FONT_MAX, BODY_FONT_MIN};
use crate::model::{Cell, CellValue, Link, SeriesData, TableModel};

/// Base style class carried by every header and body cell.
pub const BASE_CLASS: &str = "reportTable";

/// Marker class for series-valued body cells.
pub const SERIES_CLASS: &str = "cellSeries";

/// Non-breaking hyphen substituted for the first literal hyphen of every
/// resolved cell text.
pub const NO_BREAK_HYPHEN: &str = "\u{2011}";

/// One built header cell. Spans are passed through verbatim from the model;
/// the builder performs no span computation of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Anchor identity from the header-level descriptor.
    pub id: String,
    /// Owning column, used by the drag controller's hit-test.
    pub column_id: String,
    pub text: String,
    pub colspan: u16,
    pub rowspan: u16,
    pub classes: Vec<String>,
}

/// One built body cell with its resolved display text.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    pub column_id: String,
    pub text: String,
    pub colspan: u16,
    pub rowspan: u16,
    pub classes: Vec<String>,
    /// Body font size, present only when the configured value is in range.
    pub font_size: Option<u8>,
    /// Drill-through links surfaced on click.
    pub links: Vec<Link>,
    /// Series payload for the optional bar augmentation.
    pub series: Option<SeriesData>,
}

/// The fully built grid for one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    /// One row per header tier.
    pub header: Vec<Vec<HeaderCell>>,
    /// One row per data row; cells follow the row's visible columns.
    pub body: Vec<Vec<BodyCell>>,
}

pub fn build(model: &TableModel, config: &ViewConfig) -> Grid {
    Grid {
        header: build_header(model),
        body: build_body(model, config),
    }
}

/// One header row per tier; one cell per column visible at that tier.
pub fn build_header(model: &TableModel) -> Vec<Vec<HeaderCell>> {
    (0..model.tier_count())
        .map(|tier| {
            model
                .header_cells(tier)
                .into_iter()
                .filter_map(|col| {
                    let level = col.levels.get(tier)?.as_ref()?;
                    Some(HeaderCell {
                        id: level.id.clone(),
                        column_id: col.id.clone(),
                        text: level.label.clone(),
                        colspan: level.colspan,
                        rowspan: level.rowspan,
                        classes: compose_classes(
                            false,
                            level.align.as_deref(),
                            &level.cell_style,
                        ),
                    })
                })
                .collect()
        })
        .collect()
}

pub fn build_body(model: &TableModel, config: &ViewConfig) -> Vec<Vec<BodyCell>> {
    let font_size = body_font_size(config);
    model
        .data_rows()
        .iter()
        .map(|row| {
            model
                .row_columns(row)
                .into_iter()
                .map(|col| {
                    let cell = &row.cells[&col.id];
                    let is_series = matches!(cell.value, CellValue::Series(_));
                    BodyCell {
                        column_id: col.id.clone(),
                        text: substitute_first_hyphen(&resolve_text(cell)),
                        colspan: cell.colspan,
                        rowspan: cell.rowspan,
                        classes: compose_classes(
                            is_series,
                            cell.align.as_deref(),
                            &cell.cell_style,
                        ),
                        font_size,
                        links: cell.links.clone(),
                        series: match &cell.value {
                            CellValue::Series(s) => Some(s.series.clone()),
                            _ => None,
                        },
                    }
                })
                .collect()
        })
        .collect()
}

/// Resolve a cell's display text. Exactly one branch wins, in this order:
/// list join, series suppression, html text content, rendered override
/// (`Some("")` counts), raw value.
pub fn resolve_text(cell: &Cell) -> String {
    match &cell.value {
        CellValue::List(items) => match &cell.rendered {
            Some(r) => r.clone(),
            None => items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        },
        // Series cells carry no text; they are reserved for the bar overlay.
        CellValue::Series(_) => String::new(),
        CellValue::Scalar(_) | CellValue::Missing => {
            if let Some(html) = &cell.html {
                html_text(html)
            } else if let Some(r) = &cell.rendered {
                r.clone()
            } else {
                match &cell.value {
                    CellValue::Scalar(s) => s.to_string(),
                    _ => String::new(),
                }
            }
        }
    }
}

/// Replace only the first literal hyphen with a non-breaking hyphen so a
/// cell never wraps on its leading hyphen; later hyphens wrap normally.
pub fn substitute_first_hyphen(text: &str) -> String {
    text.replacen('-', NO_BREAK_HYPHEN, 1)
}

/// Composed style-class list: base class, optional series marker, optional
/// align, then every cell_style entry. Duplicates are kept.
pub fn compose_classes(series: bool, align: Option<&str>, cell_style: &[String]) -> Vec<String> {
    let mut classes = vec![BASE_CLASS.to_string()];
    if series {
        classes.push(SERIES_CLASS.to_string());
    }
    if let Some(align) = align {
        classes.push(align.to_string());
    }
    classes.extend(cell_style.iter().cloned());
    classes
}

/// The configured body font size, applied only inside the inclusive
/// 6..=20 range. Out-of-range values are silently ignored.
pub fn body_font_size(config: &ViewConfig) -> Option<u8> {
    (BODY_FONT_MIN..=BODY_FONT_MAX)
        .contains(&config.body_font_size)
        .then_some(config.body_font_size)
}

/// Extract the text content of an HTML fragment: tags stripped, the common
/// entities decoded.
pub fn html_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                for n in chars.by_ref() {
                    if n == '>' {
                        break;
                    }
                }
            }
            '&' => {
                let rest = chars.as_str();
                match rest.find(';').filter(|&i| i <= 8) {
                    Some(end) => {
                        let name = &rest[..end];
                        match decode_entity(name) {
                            Some(decoded) => out.push(decoded),
                            None => {
                                out.push('&');
                                out.push_str(name);
                                out.push(';');
                            }
                        }
                        // Skip past the entity body and the semicolon
                        for _ in 0..=end {
                            chars.next();
                        }
                    }
                    None => out.push('&'),
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
