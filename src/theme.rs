//! Deck color schemes.
//!
//! Schemes are plain constant tables of `#RRGGBB` strings. Renderers parse
//! them with [`hex_to_rgb`] when they need component values.

use serde::Serialize;

/// A named color palette for slides and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    /// Scheme name for display and configuration
    pub name: &'static str,
    /// Titles and primary shapes
    pub primary: &'static str,
    /// Secondary shapes and connectors
    pub secondary: &'static str,
    /// Highlights
    pub accent: &'static str,
    /// Slide background
    pub background: &'static str,
    /// Body text
    pub text: &'static str,
    /// Chart series colors, in order
    pub series: [&'static str; 5],
}

pub const CORPORATE: ColorScheme = ColorScheme {
    name: "corporate",
    primary: "#0066CC",
    secondary: "#004C99",
    accent: "#FF6600",
    background: "#FFFFFF",
    text: "#333333",
    series: ["#0066CC", "#FF6600", "#00CC66", "#CC0066", "#6600CC"],
};

pub const TECHNICAL: ColorScheme = ColorScheme {
    name: "technical",
    primary: "#2C3E50",
    secondary: "#34495E",
    accent: "#E74C3C",
    background: "#FFFFFF",
    text: "#2C3E50",
    series: ["#3498DB", "#E74C3C", "#2ECC71", "#F39C12", "#9B59B6"],
};

pub const ACADEMIC: ColorScheme = ColorScheme {
    name: "academic",
    primary: "#003366",
    secondary: "#0055AA",
    accent: "#CC9900",
    background: "#FFFFFF",
    text: "#000000",
    series: ["#003366", "#CC9900", "#006633", "#990033", "#663399"],
};

impl Default for ColorScheme {
    fn default() -> Self {
        CORPORATE
    }
}

impl ColorScheme {
    /// Look up a built-in scheme, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "corporate" => Some(CORPORATE),
            "technical" => Some(TECHNICAL),
            "academic" => Some(ACADEMIC),
            _ => None,
        }
    }

    /// Look up a scheme, falling back to corporate for unknown names.
    pub fn by_name_or_default(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::debug!(theme = name, "Unknown color scheme, using corporate");
            CORPORATE
        })
    }

    /// Names of the built-in schemes.
    pub fn available() -> [&'static str; 3] {
        ["corporate", "technical", "academic"]
    }

    /// Series color for the `index`-th data series, cycling.
    pub fn series_color(&self, index: usize) -> &'static str {
        self.series[index % self.series.len()]
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Format components as lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_by_name() {
        assert_eq!(ColorScheme::by_name("technical"), Some(TECHNICAL));
        assert_eq!(ColorScheme::by_name("ACADEMIC"), Some(ACADEMIC));
        assert!(ColorScheme::by_name("neon").is_none());
        assert_eq!(ColorScheme::by_name_or_default("neon"), CORPORATE);
    }

    #[test]
    fn test_all_scheme_colors_parse() {
        for name in ColorScheme::available() {
            let scheme = ColorScheme::by_name(name).unwrap();
            for color in [scheme.primary, scheme.secondary, scheme.accent, scheme.background, scheme.text] {
                assert!(hex_to_rgb(color).is_some(), "{name}: {color}");
            }
            assert!(scheme.series.iter().all(|c| hex_to_rgb(c).is_some()));
        }
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#0066CC"), Some((0, 102, 204)));
        assert_eq!(hex_to_rgb("ff6600"), Some((255, 102, 0)));
        assert_eq!(hex_to_rgb("#FFF"), None);
        assert_eq!(hex_to_rgb("#GG0000"), None);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(0, 102, 204), "#0066cc");
        assert_eq!(hex_to_rgb(&rgb_to_hex(44, 62, 80)), Some((44, 62, 80)));
    }

    #[test]
    fn test_series_cycles() {
        assert_eq!(CORPORATE.series_color(0), "#0066CC");
        assert_eq!(CORPORATE.series_color(5), "#0066CC");
    }
}
