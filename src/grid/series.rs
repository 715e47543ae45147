// Series augmentation
//
// Optional inline bar chart for series-valued cells. Pure leaf decorator:
// no state, no interaction, disabled by default via the minicharts config.

use crate::model::SeriesData;

/// Fixed number of bar slots a cell is divided into.
pub const BAR_SLOTS: usize = 10;

/// Value ceiling bars are scaled against.
pub const MAX_SCALE: f64 = 10_000.0;

/// Bar height in virtual units.
pub const BAR_HEIGHT: u32 = 16;

/// Series entry type that contributes a bar; every other type is filtered
/// out and leaves its slot empty.
pub const PLOTTABLE_TYPE: &str = "line_item";

const BLOCK_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One bar of the inline chart. `slot` keeps the entry's original series
/// index, so filtered-out entries leave gaps rather than compacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub slot: usize,
    /// 0..=BAR_HEIGHT, proportional to the entry value, capped at the max scale.
    pub height: u32,
}

/// One bar per plottable entry of the series.
pub fn series_bars(series: &SeriesData) -> Vec<Bar> {
    series
        .keys
        .iter()
        .enumerate()
        .filter(|(i, _)| series.types.get(*i).map(String::as_str) == Some(PLOTTABLE_TYPE))
        .map(|(i, _)| {
            let value = series.values.get(i).copied().unwrap_or(0.0).max(0.0);
            let scaled = (value / MAX_SCALE * BAR_HEIGHT as f64).floor();
            Bar {
                slot: i,
                height: scaled.min(BAR_HEIGHT as f64) as u32,
            }
        })
        .collect()
}

/// Paint the bars into a one-line string of block glyphs sized to the cell
/// width: each slot gets width / BAR_SLOTS columns, empty slots stay blank.
pub fn render_line(series: &SeriesData, width: u16) -> String {
    let slot_width = (width as usize / BAR_SLOTS).max(1);
    let mut glyphs = vec![' '; width as usize];
    for bar in series_bars(series) {
        let level = (bar.height as usize * (BLOCK_GLYPHS.len() - 1) + BAR_HEIGHT as usize / 2)
            / BAR_HEIGHT as usize;
        let glyph = BLOCK_GLYPHS[level.min(BLOCK_GLYPHS.len() - 1)];
        let start = bar.slot * slot_width;
        for x in start..(start + slot_width).min(glyphs.len()) {
            glyphs[x] = glyph;
        }
    }
    glyphs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: Vec<f64>, types: Vec<&str>) -> SeriesData {
        SeriesData {
            keys: (0..values.len()).map(|i| format!("k{i}")).collect(),
            values,
            types: types.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_only_line_items_contribute_bars() {
        let s = series(
            vec![5000.0, 5000.0, 5000.0],
            vec!["line_item", "subtotal", "line_item"],
        );
        let bars = series_bars(&s);
        assert_eq!(bars.len(), 2);
        // Original slot positions are kept, not compacted
        assert_eq!(bars[0].slot, 0);
        assert_eq!(bars[1].slot, 2);
    }

    #[test]
    fn test_bar_height_is_proportional_and_capped() {
        let s = series(
            vec![0.0, 5000.0, 10000.0, 250000.0],
            vec!["line_item"; 4],
        );
        let heights: Vec<u32> = series_bars(&s).iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![0, 8, 16, 16]);
    }

    #[test]
    fn test_empty_series_renders_blank() {
        let s = series(vec![], vec![]);
        assert!(series_bars(&s).is_empty());
        assert_eq!(render_line(&s, 10), " ".repeat(10));
    }

    #[test]
    fn test_render_line_fills_slot_width() {
        let s = series(vec![10000.0], vec!["line_item"]);
        let line = render_line(&s, 20);
        assert_eq!(line.chars().count(), 20);
        // Slot 0 spans the first two columns at width 20
        assert!(line.starts_with("██"));
        assert!(line.ends_with("  "));
    }
}
