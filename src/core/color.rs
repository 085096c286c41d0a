//! Color string parsing for configuration values.
//!
//! Accepts `#rgb`/`#rrggbb` hex plus the small named set the report
//! configuration historically used.

use crate::core::error::SiteplotError;
use plotters::style::RGBColor;

/// Named colors the configuration surface accepts.
const NAMED: [(&str, (u8, u8, u8)); 12] = [
    ("black", (0x00, 0x00, 0x00)),
    ("white", (0xff, 0xff, 0xff)),
    ("whitesmoke", (0xf5, 0xf5, 0xf5)),
    ("gray", (0x80, 0x80, 0x80)),
    ("grey", (0x80, 0x80, 0x80)),
    ("lightgray", (0xd3, 0xd3, 0xd3)),
    ("lightgrey", (0xd3, 0xd3, 0xd3)),
    ("red", (0xff, 0x00, 0x00)),
    ("green", (0x00, 0x80, 0x00)),
    ("blue", (0x00, 0x00, 0xff)),
    ("navy", (0x00, 0x00, 0x80)),
    ("orange", (0xff, 0xa5, 0x00)),
];

/// Parse a configuration color string into an `RGBColor`.
pub fn parse_color(value: &str) -> Result<RGBColor, SiteplotError> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        let digits: Result<Vec<u8>, _> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or(());
        return match digits.as_deref() {
            Ok([r, g, b]) => Ok(RGBColor(r * 17, g * 17, b * 17)),
            Ok([r1, r2, g1, g2, b1, b2]) => {
                Ok(RGBColor(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2))
            }
            _ => Err(SiteplotError::ValidationError(format!(
                "invalid hex color '{}'",
                value
            ))),
        };
    }

    let lower = value.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, (r, g, b))| RGBColor(r, g, b))
        .ok_or_else(|| SiteplotError::ValidationError(format!("unknown color '{}'", value)))
}
