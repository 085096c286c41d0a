//! The external configuration document.
//!
//! A single JSON file drives every structural and cosmetic choice the
//! renderer makes: which groups to keep, how to order and relabel them, which
//! error panels to draw, and the full flat set of styling knobs. Every key
//! has a default, so `{}` is a valid document and produces the stock report.

use crate::core::error::SiteplotError;
use crate::core::metrics::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Top-level settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub customization: Customization,
    /// Display-name overrides per group, keyed by the raw group name.
    #[serde(rename = "customLabels")]
    pub custom_labels: BTreeMap<String, String>,
    /// Groups to keep; empty keeps everything. `Composite` is kept only if
    /// listed here, like any other group.
    pub groups: Vec<String>,
    /// Explicit axis order; groups not listed sort after the listed ones in
    /// their original order.
    #[serde(rename = "customOrder")]
    pub custom_order: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            customization: Customization::default(),
            custom_labels: BTreeMap::new(),
            groups: Vec::new(),
            custom_order: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, SiteplotError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Fully-populated document for scaffolding, every knob at its default.
    pub fn to_pretty_json(&self) -> Result<String, SiteplotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Seaborn-style grid presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Whitegrid,
    Darkgrid,
    White,
    Dark,
}

impl Style {
    /// Whether horizontal grid lines are drawn.
    pub fn has_grid(self) -> bool {
        matches!(self, Style::Whitegrid | Style::Darkgrid)
    }

    /// Grid line color for the gridded styles.
    pub fn grid_color(self) -> (u8, u8, u8) {
        match self {
            // whitegrid: light gray rules on a light panel
            Style::Whitegrid | Style::White => (0xcc, 0xcc, 0xcc),
            // darkgrid: white rules on a tinted panel
            Style::Darkgrid | Style::Dark => (0xff, 0xff, 0xff),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointPlotType {
    Beeswarm,
    Stripplot,
}

/// Median value label styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MedianLabel {
    pub show_median: bool,
    pub color: String,
    pub foreground_color: String,
    /// Falls back to the renderer's default text size when unset.
    pub font_size: Option<f64>,
    pub median_outline: bool,
}

impl Default for MedianLabel {
    fn default() -> Self {
        MedianLabel {
            show_median: true,
            color: "white".into(),
            foreground_color: "black".into(),
            font_size: None,
            median_outline: false,
        }
    }
}

/// The flat styling knob set. Field defaults mirror the documented defaults
/// of the report's configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Customization {
    pub style: Style,
    pub plot_bg_color: String,
    pub fig_bg_color: String,
    pub fig_width: f64,
    pub fig_height: f64,
    pub dpi: u32,
    pub label_wrap_width: usize,
    pub wrap_title: bool,
    pub x_tick_font_size: f64,
    pub y_tick_font_size: f64,
    pub output_format: OutputFormat,
    pub point_plot_type: PointPlotType,
    pub show_errors: Vec<ErrorKind>,
    pub median_label: MedianLabel,
    pub palette_vumc: String,
    pub palette_other: String,
    pub plot_color: String,
    pub plot_point_size: f64,
    pub stripplot_jitter: bool,
    pub x_label: String,
    pub font_size_title: f64,
    pub font_color_title: String,
    pub font_size_axes: f64,
    pub font_color_axes: String,
    pub detached_y_label: String,
    pub attached_y_label: String,
    pub total_y_label: String,
    pub detached_error_title: Option<String>,
    pub attached_error_title: Option<String>,
    pub total_error_title: Option<String>,
    pub detached_error_title_wrap_width: usize,
    pub attached_error_title_wrap_width: usize,
    pub total_error_title_wrap_width: usize,
}

impl Default for Customization {
    fn default() -> Self {
        Customization {
            style: Style::Whitegrid,
            plot_bg_color: "#f5f5f5".into(),
            fig_bg_color: "#ffffff".into(),
            fig_width: 15.0,
            fig_height: 6.0,
            dpi: 300,
            label_wrap_width: 10,
            wrap_title: false,
            x_tick_font_size: 10.0,
            y_tick_font_size: 10.0,
            output_format: OutputFormat::Png,
            point_plot_type: PointPlotType::Beeswarm,
            show_errors: vec![ErrorKind::Detached],
            median_label: MedianLabel::default(),
            palette_vumc: "#866D4B".into(),
            palette_other: "#5975a4".into(),
            plot_color: "black".into(),
            plot_point_size: 3.0,
            stripplot_jitter: true,
            // A bare space keeps the x axis label slot empty unless set.
            x_label: " ".into(),
            font_size_title: 12.0,
            font_color_title: "#000000".into(),
            font_size_axes: 12.0,
            font_color_axes: "#000000".into(),
            detached_y_label: ErrorKind::Detached.default_y_label().into(),
            attached_y_label: ErrorKind::Attached.default_y_label().into(),
            total_y_label: ErrorKind::Total.default_y_label().into(),
            detached_error_title: None,
            attached_error_title: None,
            total_error_title: None,
            detached_error_title_wrap_width: 10,
            attached_error_title_wrap_width: 10,
            total_error_title_wrap_width: 10,
        }
    }
}

impl Customization {
    pub fn title_for(&self, kind: ErrorKind) -> String {
        let custom = match kind {
            ErrorKind::Detached => &self.detached_error_title,
            ErrorKind::Attached => &self.attached_error_title,
            ErrorKind::Total => &self.total_error_title,
        };
        custom
            .clone()
            .unwrap_or_else(|| kind.default_title().to_string())
    }

    pub fn title_wrap_width(&self, kind: ErrorKind) -> usize {
        match kind {
            ErrorKind::Detached => self.detached_error_title_wrap_width,
            ErrorKind::Attached => self.attached_error_title_wrap_width,
            ErrorKind::Total => self.total_error_title_wrap_width,
        }
    }

    pub fn y_label_for(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::Detached => &self.detached_y_label,
            ErrorKind::Attached => &self.attached_y_label,
            ErrorKind::Total => &self.total_y_label,
        }
    }

    /// Panels to draw, in the fixed detached/attached/total order, keeping
    /// only the kinds named by `show_errors`.
    pub fn selected_errors(&self) -> Vec<ErrorKind> {
        ErrorKind::ALL
            .into_iter()
            .filter(|k| self.show_errors.contains(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_all_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("parse");
        let c = &settings.customization;
        assert_eq!(c.style, Style::Whitegrid);
        assert_eq!(c.plot_bg_color, "#f5f5f5");
        assert_eq!(c.fig_width, 15.0);
        assert_eq!(c.fig_height, 6.0);
        assert_eq!(c.dpi, 300);
        assert_eq!(c.output_format, OutputFormat::Png);
        assert_eq!(c.point_plot_type, PointPlotType::Beeswarm);
        assert_eq!(c.show_errors, vec![ErrorKind::Detached]);
        assert_eq!(c.x_label, " ");
        assert!(c.median_label.show_median);
        assert!(!c.median_label.median_outline);
        assert!(settings.groups.is_empty());
        assert!(settings.custom_order.is_empty());
    }

    #[test]
    fn camel_case_top_level_keys() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "customLabels": {"vumc": "Vanderbilt"},
                "customOrder": ["vumc", "site_b"],
                "groups": ["vumc"]
            }"#,
        )
        .expect("parse");
        assert_eq!(settings.custom_labels["vumc"], "Vanderbilt");
        assert_eq!(settings.custom_order, vec!["vumc", "site_b"]);
        assert_eq!(settings.groups, vec!["vumc"]);
    }

    #[test]
    fn show_errors_uses_column_names() {
        let settings: Settings = serde_json::from_str(
            r#"{"customization": {"show_errors": ["total_error", "detached_error"]}}"#,
        )
        .expect("parse");
        // Panel order is fixed regardless of listing order.
        assert_eq!(
            settings.customization.selected_errors(),
            vec![ErrorKind::Detached, ErrorKind::Total]
        );
    }

    #[test]
    fn per_error_titles_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{"customization": {"attached_error_title": "Attached, revised"}}"#,
        )
        .expect("parse");
        let c = &settings.customization;
        assert_eq!(c.title_for(ErrorKind::Detached), "Detached error by Site");
        assert_eq!(c.title_for(ErrorKind::Attached), "Attached, revised");
        assert_eq!(c.title_wrap_width(ErrorKind::Total), 10);
    }

    #[test]
    fn scaffold_round_trips() {
        let json = Settings::default().to_pretty_json().expect("serialize");
        let parsed: Settings = serde_json::from_str(&json).expect("reparse");
        assert_eq!(parsed.customization.palette_vumc, "#866D4B");
        assert_eq!(parsed.customization.output_format, OutputFormat::Png);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let err =
            serde_json::from_str::<Settings>(r#"{"customization": {"output_format": "pdf"}}"#);
        assert!(err.is_err());
    }
}
