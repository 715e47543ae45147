// Theme resolution
//
// One palette and one layout style are resolved at the start of every
// render pass, sequenced before grid construction. Unknown theme or layout
// names are silently ignored and leave the defaults in effect; that
// tolerance is intended behavior, not a bug.

pub mod presets;

use crate::app::config::ViewConfig;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::Path;

/// Name a theme must be set to for the custom palette path to be honored.
pub const CUSTOM_THEME: &str = "custom";

/// An RGB triple, deserializable from a `[r, g, b]` TOML array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

/// Color palette for the table surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Palette {
    pub border: Rgb,
    pub header_fg: Rgb,
    pub header_bg: Rgb,
    pub body_fg: Rgb,
    /// Highlight for the drag indicator and active affordances.
    pub accent: Rgb,
    /// Series bars and other secondary marks.
    pub series: Rgb,
    /// Error banner text.
    pub error: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        presets::traditional()
    }
}

/// Column width strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutStyle {
    /// Equal column widths.
    #[default]
    Fixed,
    /// Widths sized to content.
    Auto,
}

/// The theme in effect for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveTheme {
    pub palette: Palette,
    pub layout: LayoutStyle,
}

/// Resolve the configured theme and layout. The previous pass's theme is
/// discarded entirely; this is the one sequenced step before the grid is
/// built.
pub fn resolve(config: &ViewConfig) -> ActiveTheme {
    let mut active = ActiveTheme::default();
    match config.theme.as_str() {
        "traditional" => active.palette = presets::traditional(),
        "contemporary" => active.palette = presets::contemporary(),
        "minimal" => active.palette = presets::minimal(),
        CUSTOM_THEME => {
            if let Some(path) = &config.custom_theme {
                match load_custom(Path::new(path)) {
                    Ok(palette) => active.palette = palette,
                    Err(e) => {
                        tracing::warn!(error = %e, path = %path, "custom theme unreadable, keeping default");
                    }
                }
            }
        }
        // Unknown names keep the default palette
        _ => {}
    }
    match config.layout.as_str() {
        "fixed" => active.layout = LayoutStyle::Fixed,
        "auto" => active.layout = LayoutStyle::Auto,
        _ => {}
    }
    active
}

/// Load an externally supplied palette from a TOML file.
fn load_custom(path: &Path) -> anyhow::Result<Palette> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}
