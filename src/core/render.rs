//! Figure rendering with `plotters`.
//!
//! The figure model from [`crate::core::figure`] is drawn as one horizontal
//! strip of panels. Boxes, whiskers, and medians are drawn as primitives in
//! data coordinates; titles, tick labels, and median value labels are placed
//! as centered text in pixel space so multi-line labels work. PNG output is
//! sized at `fig_width · dpi` pixels; SVG renders at 96 px/inch.

use crate::core::color::parse_color;
use crate::core::error::SiteplotError;
use crate::core::figure::{Figure, Panel};
use crate::core::layout::{beeswarm_offsets, jitter_offsets};
use crate::core::settings::{Customization, OutputFormat, PointPlotType, Settings};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontStyle;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

/// Where the figure landed and the median of every drawn box, one list per
/// panel (empty when median labels are disabled).
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output_path: PathBuf,
    pub medians: Vec<Vec<f64>>,
}

/// Default text size (points) for median labels when the document leaves
/// `median_label.font_size` unset.
const DEFAULT_MEDIAN_FONT_PT: f64 = 10.0;

fn draw_err<E: std::fmt::Display>(e: E) -> SiteplotError {
    SiteplotError::RenderError(e.to_string())
}

/// Render `figure` to `<out_stem>.<ext>` per the configured output format.
pub fn render(
    figure: &Figure,
    settings: &Settings,
    out_stem: &Path,
) -> Result<RenderReport, SiteplotError> {
    let c = &settings.customization;
    let output_path = out_stem.with_extension(c.output_format.extension());

    let px_per_in = match c.output_format {
        OutputFormat::Png => c.dpi as f64,
        OutputFormat::Svg => 96.0,
    };
    let width = ((c.fig_width * px_per_in).round() as u32).max(10);
    let height = ((c.fig_height * px_per_in).round() as u32).max(10);

    let medians = match c.output_format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(&output_path, (width, height)).into_drawing_area();
            let medians = draw_figure(&root, figure, c, px_per_in)?;
            root.present().map_err(draw_err)?;
            medians
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(&output_path, (width, height)).into_drawing_area();
            let medians = draw_figure(&root, figure, c, px_per_in)?;
            root.present().map_err(draw_err)?;
            medians
        }
    };

    Ok(RenderReport {
        output_path,
        medians,
    })
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    c: &Customization,
    px_per_in: f64,
) -> Result<Vec<Vec<f64>>, SiteplotError> {
    // Point-to-pixel scale; matplotlib sizes are in points at the figure dpi.
    let s = px_per_in / 72.0;

    let fig_bg = parse_color(&c.fig_bg_color)?;
    let plot_bg = parse_color(&c.plot_bg_color)?;
    let point_color = parse_color(&c.plot_color)?;
    let title_color = parse_color(&c.font_color_title)?;
    let axes_color = parse_color(&c.font_color_axes)?;
    let median_fill = parse_color(&c.median_label.color)?;
    let median_outline = parse_color(&c.median_label.foreground_color)?;

    root.fill(&fig_bg).map_err(draw_err)?;

    let areas = root.split_evenly((1, figure.panels.len()));
    let mut medians = Vec::with_capacity(figure.panels.len());
    for (area, panel) in areas.iter().zip(&figure.panels) {
        medians.push(draw_panel(
            root, area, panel, c, s, plot_bg, point_color, title_color, axes_color, median_fill,
            median_outline,
        )?);
    }
    Ok(medians)
}

#[allow(clippy::too_many_arguments)]
fn draw_panel<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    c: &Customization,
    s: f64,
    plot_bg: RGBColor,
    point_color: RGBColor,
    title_color: RGBColor,
    axes_color: RGBColor,
    median_fill: RGBColor,
    median_outline: RGBColor,
) -> Result<Vec<f64>, SiteplotError> {
    let n_groups = panel.groups.len();

    let title_px = c.font_size_title * s;
    let axes_px = c.font_size_axes * s;
    let tick_x_px = c.x_tick_font_size * s;
    let tick_y_px = c.y_tick_font_size * s;

    let title_area = panel.title_lines.len() as f64 * title_px * 1.4 + 8.0 * s;
    let max_label_lines = panel
        .groups
        .iter()
        .map(|g| g.label_lines.len())
        .max()
        .unwrap_or(1);
    let x_label_area = max_label_lines as f64 * tick_x_px * 1.3 + axes_px * 1.5 + 12.0 * s;
    let y_label_area = axes_px * 1.5 + 7.0 * tick_y_px * 0.6 + 10.0 * s;

    let mut chart = ChartBuilder::on(area)
        .margin((6.0 * s) as u32)
        .margin_top(title_area as u32)
        .x_label_area_size(x_label_area as u32)
        .y_label_area_size(y_label_area as u32)
        .build_cartesian_2d(-0.5f64..(n_groups as f64 - 0.5), panel.y_min..panel.y_max)
        .map_err(draw_err)?;

    chart.plotting_area().fill(&plot_bg).map_err(draw_err)?;

    let grid_color = {
        let (r, g, b) = c.style.grid_color();
        RGBColor(r, g, b)
    };
    let axis_label_font = ("sans-serif", axes_px)
        .into_font()
        .color(&axes_color);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(0)
        .y_labels(7)
        .y_label_style(("sans-serif", tick_y_px).into_font())
        .x_desc(panel.x_label.clone())
        .y_desc(panel.y_label.clone())
        .axis_desc_style(axis_label_font);
    if c.style.has_grid() {
        mesh.bold_line_style(grid_color).light_line_style(TRANSPARENT);
    } else {
        mesh.bold_line_style(TRANSPARENT).light_line_style(TRANSPARENT);
    }
    mesh.draw().map_err(draw_err)?;

    let stroke = (s.round() as u32).max(1);
    let line_style = BLACK.stroke_width(stroke);
    let box_half = 0.4;
    let cap_half = 0.2;

    let plotting = chart.plotting_area();
    for (i, group) in panel.groups.iter().enumerate() {
        let x = i as f64;
        let st = &group.stats;

        plotting
            .draw(&Rectangle::new(
                [(x - box_half, st.q1), (x + box_half, st.q3)],
                group.fill.filled(),
            ))
            .map_err(draw_err)?;
        plotting
            .draw(&Rectangle::new(
                [(x - box_half, st.q1), (x + box_half, st.q3)],
                line_style,
            ))
            .map_err(draw_err)?;

        // Whiskers with end caps, then the median line on top of the box.
        for (from, to) in [(st.q3, st.whisker_hi), (st.q1, st.whisker_lo)] {
            plotting
                .draw(&PathElement::new(vec![(x, from), (x, to)], line_style))
                .map_err(draw_err)?;
            plotting
                .draw(&PathElement::new(
                    vec![(x - cap_half, to), (x + cap_half, to)],
                    line_style,
                ))
                .map_err(draw_err)?;
        }
        plotting
            .draw(&PathElement::new(
                vec![(x - box_half, st.median), (x + box_half, st.median)],
                line_style,
            ))
            .map_err(draw_err)?;
    }

    draw_points(&chart, panel, c, s, point_color)?;

    // Pixel-space decorations: title, tick labels, median value labels.
    let (x_range, y_range) = area.get_pixel_range();
    let (base_x, base_y) = (x_range.start, y_range.start);
    let area_w = x_range.end - x_range.start;

    let title_font = ("sans-serif", title_px)
        .into_font()
        .color(&title_color)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (li, line) in panel.title_lines.iter().enumerate() {
        let y = base_y + (4.0 * s + li as f64 * title_px * 1.4) as i32;
        root.draw(&Text::new(
            line.clone(),
            (base_x + area_w / 2, y),
            title_font.clone(),
        ))
        .map_err(draw_err)?;
    }

    let tick_font = ("sans-serif", tick_x_px)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, group) in panel.groups.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64, panel.y_min));
        for (li, line) in group.label_lines.iter().enumerate() {
            let y = py + (4.0 * s + li as f64 * tick_x_px * 1.3) as i32;
            root.draw(&Text::new(line.clone(), (px, y), tick_font.clone()))
                .map_err(draw_err)?;
        }
    }

    if !c.median_label.show_median {
        return Ok(Vec::new());
    }

    let median_px = c.median_label.font_size.unwrap_or(DEFAULT_MEDIAN_FONT_PT) * s;
    let median_font = ("sans-serif", median_px)
        .into_font()
        .style(FontStyle::Bold)
        .color(&median_fill)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let outline_font = ("sans-serif", median_px)
        .into_font()
        .style(FontStyle::Bold)
        .color(&median_outline)
        .pos(Pos::new(HPos::Center, VPos::Center));

    let mut medians = Vec::with_capacity(panel.groups.len());
    for (i, group) in panel.groups.iter().enumerate() {
        let value = group.stats.median;
        let text = format!("{:.2}", value);
        let (px, py) = chart.backend_coord(&(i as f64, value));
        if c.median_label.median_outline {
            let o = (s.round() as i32).max(1);
            for (dx, dy) in [
                (-o, 0),
                (o, 0),
                (0, -o),
                (0, o),
                (-o, -o),
                (-o, o),
                (o, -o),
                (o, o),
            ] {
                root.draw(&Text::new(text.clone(), (px + dx, py + dy), outline_font.clone()))
                    .map_err(draw_err)?;
            }
        }
        root.draw(&Text::new(text, (px, py), median_font.clone()))
            .map_err(draw_err)?;
        medians.push(value);
    }
    Ok(medians)
}

fn draw_points<DB: DrawingBackend>(
    chart: &ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    panel: &Panel,
    c: &Customization,
    s: f64,
    point_color: RGBColor,
) -> Result<(), SiteplotError> {
    let radius = ((c.plot_point_size * s / 2.0).round() as i32).max(1);

    // Pixels per x data unit, for converting swarm offsets back to data space.
    let probe_y = panel.y_min;
    let a = chart.backend_coord(&(-0.5, probe_y));
    let b = chart.backend_coord(&(0.5, probe_y));
    let px_per_unit = (b.0 - a.0) as f64;

    let plotting = chart.plotting_area();
    let mut rng = rand::rng();

    for (i, group) in panel.groups.iter().enumerate() {
        let x = i as f64;
        let offsets: Vec<f64> = match c.point_plot_type {
            PointPlotType::Beeswarm => {
                let y_px: Vec<f64> = group
                    .values
                    .iter()
                    .map(|v| chart.backend_coord(&(x, *v)).1 as f64)
                    .collect();
                // One point of breathing room between markers.
                let diameter = 2.0 * radius as f64 + s;
                beeswarm_offsets(&y_px, diameter)
                    .into_iter()
                    .map(|dx| (dx / px_per_unit).clamp(-0.45, 0.45))
                    .collect()
            }
            PointPlotType::Stripplot => {
                let amplitude = if c.stripplot_jitter { 0.08 } else { 0.0 };
                jitter_offsets(group.values.len(), amplitude, &mut rng)
            }
        };

        for (value, dx) in group.values.iter().zip(offsets) {
            plotting
                .draw(&Circle::new((x + dx, *value), radius, point_color.filled()))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}
