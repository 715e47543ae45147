// View configuration
//
// Host-supplied settings read at startup and the one piece of state that
// outlives a render pass: the persisted column order, written back after
// every completed reorder.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// Inclusive lower bound for the body font size to be applied.
pub const BODY_FONT_MIN: u8 = 6;

/// Inclusive upper bound for the body font size to be applied.
pub const BODY_FONT_MAX: u8 = 20;

/// Default body font size.
pub const DEFAULT_BODY_FONT: u8 = 12;

// ============================================================================
// Configuration
// ============================================================================

/// View configuration, loaded from a TOML file with CLI overrides applied
/// on top. Unknown themes and layouts are tolerated at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Theme preset name, or "custom" to use `custom_theme`.
    pub theme: String,

    /// Path to an externally supplied palette, honored when theme = "custom".
    pub custom_theme: Option<String>,

    /// Layout style name: "fixed" or "auto".
    pub layout: String,

    /// Body font size; applied only inside BODY_FONT_MIN..=BODY_FONT_MAX.
    pub body_font_size: u8,

    /// Enable the inline bar augmentation on series cells.
    pub minicharts: bool,

    /// Persisted column-id order, re-applied to the model at startup.
    pub column_order: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            theme: "traditional".to_string(),
            custom_theme: None,
            layout: "fixed".to_string(),
            body_font_size: DEFAULT_BODY_FONT,
            minicharts: false,
            column_order: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a TOML file. A missing or malformed file
    /// degrades to the defaults; the view still renders.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no config file, using defaults");
                return Self::default();
            }
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the configuration back. Best-effort: failure is logged and
    /// the session continues with the in-memory order.
    pub fn save(&self, path: &Path) {
        let text = match toml::to_string_pretty(self) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "cannot serialize config");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, text) {
            tracing::warn!(path = %path.display(), error = %e, "cannot persist config");
        }
    }

    /// Host-side persistence of a completed reorder: record the new order
    /// and write it through if a config path is known.
    pub fn update_column_order(&mut self, order: Vec<String>, path: Option<&Path>) {
        self.column_order = order;
        if let Some(path) = path {
            self.save(path);
        }
    }
}
