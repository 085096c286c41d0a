//! Pure figure-model construction.
//!
//! Everything the renderer needs is decided here from the derived rows and
//! the settings document: which rows survive group filtering, the axis order,
//! per-group box statistics, tick labels, palette colors, titles, and y
//! ranges. No drawing happens in this module, which keeps the whole
//! composition step unit-testable.

use crate::core::color::parse_color;
use crate::core::error::SiteplotError;
use crate::core::layout::{tick_label, wrap_text};
use crate::core::metrics::{ErrorKind, ErrorRow};
use crate::core::settings::Settings;
use plotters::style::RGBColor;

/// Group name that receives the baseline palette color.
const BASELINE_GROUP: &str = "vumc";

/// Five-number box summary with whiskers clamped to the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub whisker_lo: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_hi: f64,
}

/// Linear-interpolation percentile over sorted values, `p` in `[0, 1]`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac
    }
}

/// Box statistics: interpolated quartiles, whiskers at the most extreme data
/// within 1.5·IQR of the box. Outliers beyond the whiskers are not drawn.
pub fn box_stats(values: &[f64]) -> BoxStats {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let whisker_lo = sorted
        .iter()
        .copied()
        .find(|v| *v >= lo_fence)
        .unwrap_or(q1);
    let whisker_hi = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3);

    BoxStats {
        whisker_lo,
        q1,
        median,
        q3,
        whisker_hi,
    }
}

/// One group's column on a panel.
#[derive(Debug, Clone)]
pub struct GroupSeries {
    pub name: String,
    /// Wrapped tick label lines, count appended to the last.
    pub label_lines: Vec<String>,
    pub fill: RGBColor,
    pub values: Vec<f64>,
    pub stats: BoxStats,
}

/// One subplot: a single error column across all kept groups.
#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: ErrorKind,
    pub title_lines: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<GroupSeries>,
    pub y_min: f64,
    pub y_max: f64,
}

/// The complete figure model.
#[derive(Debug, Clone)]
pub struct Figure {
    pub panels: Vec<Panel>,
}

/// Keep only the configured groups (when any are listed) and apply the
/// custom order as a stable sort; unlisted groups trail in original order.
pub fn select_rows(rows: &[ErrorRow], settings: &Settings) -> Vec<ErrorRow> {
    let mut kept: Vec<ErrorRow> = rows
        .iter()
        .filter(|r| settings.groups.is_empty() || settings.groups.contains(&r.group))
        .cloned()
        .collect();

    if !settings.custom_order.is_empty() {
        let rank = |group: &str| {
            settings
                .custom_order
                .iter()
                .position(|g| g == group)
                .unwrap_or(usize::MAX)
        };
        kept.sort_by_key(|r| rank(&r.group));
    }
    kept
}

/// Axis order: first appearance in the (filtered, sorted) rows.
pub fn group_order(rows: &[ErrorRow]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        if !order.iter().any(|g| *g == row.group) {
            order.push(row.group.clone());
        }
    }
    order
}

/// Build the figure model. Errors when no panels are selected or no rows
/// survive filtering.
pub fn build_figure(rows: &[ErrorRow], settings: &Settings) -> Result<Figure, SiteplotError> {
    let c = &settings.customization;

    let kinds = c.selected_errors();
    if kinds.is_empty() {
        return Err(SiteplotError::ValidationError(
            "show_errors selects no error columns".into(),
        ));
    }

    let kept = select_rows(rows, settings);
    if kept.is_empty() {
        return Err(SiteplotError::ValidationError(
            "no rows remain after group filtering".into(),
        ));
    }

    let order = group_order(&kept);
    let baseline_fill = parse_color(&c.palette_vumc)?;
    let other_fill = parse_color(&c.palette_other)?;

    let mut panels = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut groups = Vec::with_capacity(order.len());
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for name in &order {
            let values: Vec<f64> = kept
                .iter()
                .filter(|r| r.group == *name)
                .map(|r| kind.value(r))
                .collect();
            for v in &values {
                y_min = y_min.min(*v);
                y_max = y_max.max(*v);
            }

            let display = settings
                .custom_labels
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone());
            groups.push(GroupSeries {
                name: name.clone(),
                label_lines: tick_label(&display, c.label_wrap_width, values.len()),
                fill: if name == BASELINE_GROUP {
                    baseline_fill
                } else {
                    other_fill
                },
                stats: box_stats(&values),
                values,
            });
        }

        let span = y_max - y_min;
        let pad = if span > 0.0 { 0.05 * span } else { 1.0 };

        let title = c.title_for(kind);
        let title_lines = if c.wrap_title {
            wrap_text(&title, c.title_wrap_width(kind))
        } else {
            vec![title]
        };

        panels.push(Panel {
            kind,
            title_lines,
            x_label: c.x_label.clone(),
            y_label: c.y_label_for(kind).to_string(),
            groups,
            y_min: y_min - pad,
            y_max: y_max + pad,
        });
    }

    Ok(Figure { panels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::{COMPOSITE_GROUP, append_composite};
    use crate::core::settings::Settings;

    fn row(group: &str, v: f64) -> ErrorRow {
        ErrorRow {
            group: group.into(),
            detached_error: v,
            attached_error: v * 2.0,
            total_error: v * 3.0,
        }
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
    }

    #[test]
    fn whiskers_clamp_to_data_within_fences() {
        // IQR fences exclude the 100.0 outlier; whiskers stop at the data.
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        assert_eq!(stats.whisker_lo, 1.0);
        assert_eq!(stats.whisker_hi, 5.0);
    }

    #[test]
    fn single_value_box_collapses() {
        let stats = box_stats(&[7.0]);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.whisker_lo, 7.0);
        assert_eq!(stats.whisker_hi, 7.0);
    }

    #[test]
    fn filtering_keeps_only_listed_groups() {
        let rows = vec![row("vumc", 1.0), row("site_b", 2.0), row("site_c", 3.0)];
        let mut settings = Settings::default();
        settings.groups = vec!["vumc".into(), "site_c".into()];
        let kept = select_rows(&rows, &settings);
        assert_eq!(group_order(&kept), vec!["vumc", "site_c"]);
    }

    #[test]
    fn composite_is_filtered_like_any_group() {
        let mut rows = vec![row("vumc", 1.0), row("site_b", 2.0)];
        append_composite(&mut rows);
        let mut settings = Settings::default();
        settings.groups = vec!["vumc".into()];
        let kept = select_rows(&rows, &settings);
        assert!(kept.iter().all(|r| r.group != COMPOSITE_GROUP));
    }

    #[test]
    fn custom_order_is_stable_with_unlisted_groups_last() {
        let rows = vec![
            row("site_b", 1.0),
            row("vumc", 2.0),
            row("site_c", 3.0),
            row("site_b", 4.0),
        ];
        let mut settings = Settings::default();
        settings.custom_order = vec!["vumc".into(), "site_b".into()];
        let kept = select_rows(&rows, &settings);
        assert_eq!(group_order(&kept), vec!["vumc", "site_b", "site_c"]);
        // Rows inside a group keep their original order.
        let b_values: Vec<f64> = kept
            .iter()
            .filter(|r| r.group == "site_b")
            .map(|r| r.detached_error)
            .collect();
        assert_eq!(b_values, vec![1.0, 4.0]);
    }

    #[test]
    fn figure_carries_labels_counts_and_palette() {
        let rows = vec![row("vumc", 1.0), row("vumc", 3.0), row("site_b", 2.0)];
        let mut settings = Settings::default();
        settings
            .custom_labels
            .insert("site_b".into(), "General Hospital".into());
        let figure = build_figure(&rows, &settings).expect("figure");

        assert_eq!(figure.panels.len(), 1);
        let panel = &figure.panels[0];
        assert_eq!(panel.kind, ErrorKind::Detached);
        assert_eq!(panel.title_lines, vec!["Detached error by Site"]);
        assert_eq!(panel.y_label, "Detached Error (%)");

        let vumc = &panel.groups[0];
        assert_eq!(vumc.label_lines, vec!["vumc (2)"]);
        assert_eq!(vumc.fill, RGBColor(0x86, 0x6d, 0x4b));

        let other = &panel.groups[1];
        assert_eq!(other.label_lines, vec!["General", "Hospital (1)"]);
        assert_eq!(other.fill, RGBColor(0x59, 0x75, 0xa4));
    }

    #[test]
    fn y_range_pads_beyond_data() {
        let rows = vec![row("vumc", 0.0), row("vumc", 10.0)];
        let figure = build_figure(&rows, &Settings::default()).expect("figure");
        let panel = &figure.panels[0];
        assert!(panel.y_min < 0.0);
        assert!(panel.y_max > 10.0);
    }

    #[test]
    fn empty_selection_is_an_error() {
        let rows = vec![row("vumc", 1.0)];
        let mut settings = Settings::default();
        settings.groups = vec!["nowhere".into()];
        assert!(build_figure(&rows, &settings).is_err());

        let mut settings = Settings::default();
        settings.customization.show_errors = Vec::new();
        assert!(build_figure(&rows, &settings).is_err());
    }

    #[test]
    fn wrapped_titles_split_into_lines() {
        let rows = vec![row("vumc", 1.0)];
        let mut settings = Settings::default();
        settings.customization.wrap_title = true;
        settings.customization.detached_error_title = Some("Detached error by Site".into());
        let figure = build_figure(&rows, &settings).expect("figure");
        assert_eq!(
            figure.panels[0].title_lines,
            vec!["Detached", "error by", "Site"]
        );
    }
}
