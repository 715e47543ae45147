// Built-in theme presets
//
// Three named palettes selectable from configuration. Anything else goes
// through the custom-theme path or falls back to traditional.

use super::{Palette, Rgb};

/// Classic report look: warm grey chrome, dark ink on light cells.
pub fn traditional() -> Palette {
    Palette {
        border: Rgb(120, 120, 120),
        header_fg: Rgb(235, 235, 235),
        header_bg: Rgb(60, 66, 82),
        body_fg: Rgb(200, 200, 200),
        accent: Rgb(255, 184, 108),
        series: Rgb(70, 130, 180),
        error: Rgb(224, 108, 117),
    }
}

/// Higher-contrast look with a cool blue header band.
pub fn contemporary() -> Palette {
    Palette {
        border: Rgb(86, 95, 137),
        header_fg: Rgb(255, 255, 255),
        header_bg: Rgb(26, 115, 232),
        body_fg: Rgb(220, 223, 228),
        accent: Rgb(138, 180, 248),
        series: Rgb(26, 115, 232),
        error: Rgb(247, 118, 142),
    }
}

/// Quiet monochrome: no header band, low-key borders.
pub fn minimal() -> Palette {
    Palette {
        border: Rgb(80, 80, 80),
        header_fg: Rgb(180, 180, 180),
        header_bg: Rgb(30, 30, 30),
        body_fg: Rgb(160, 160, 160),
        accent: Rgb(200, 200, 200),
        series: Rgb(120, 120, 120),
        error: Rgb(200, 120, 120),
    }
}
