use crate::render::chart::{ChartSpec, Dash, GridLines, Marker, SeriesStyle};
use crate::render::RenderError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// Plot area as fractions of the canvas, measured from the top-left corner.
const PLOT_LEFT: f64 = 0.125;
const PLOT_RIGHT: f64 = 0.9;
const PLOT_TOP: f64 = 0.12;
const PLOT_BOTTOM: f64 = 0.89;

const GRID_COLOR: &str = "#d9d9d9";
const TEXT_COLOR: &str = "#111111";
const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";

/// Pixel rectangle of the data area.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Writes `<file_stem>.svg` into `dir` and returns its path.
pub fn write_svg(spec: &ChartSpec, dir: &Path) -> Result<PathBuf, RenderError> {
    spec.validate()?;
    let path = dir.join(format!("{}.svg", spec.file_stem));
    let file = fs::File::create(&path).map_err(|source| RenderError::Create {
        path: path.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    render_svg(spec, &mut out)?;
    out.flush()?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

pub fn render_svg<W: Write>(spec: &ChartSpec, out: &mut W) -> Result<(), RenderError> {
    spec.validate()?;

    let (width, height) = spec.canvas_size();
    let pt = spec.point_scale();
    let area = PlotArea {
        left: width * PLOT_LEFT,
        top: height * PLOT_TOP,
        width: width * (PLOT_RIGHT - PLOT_LEFT),
        height: height * (PLOT_BOTTOM - PLOT_TOP),
    };

    writeln!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{}in' height='{}in' viewBox='0 0 {:.0} {:.0}'>",
        spec.width_in, spec.height_in, width, height
    )?;
    writeln!(
        out,
        "<rect x='0' y='0' width='{:.0}' height='{:.0}' fill='#ffffff'/>",
        width, height
    )?;
    writeln!(
        out,
        "<defs><clipPath id='plot-area'><rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}'/></clipPath></defs>",
        area.left, area.top, area.width, area.height
    )?;

    write_grid_and_ticks(spec, &area, out)?;

    writeln!(out, "<g clip-path='url(#plot-area)'>")?;
    for series in &spec.series {
        write_polyline(spec, &area, &series.points, &series.style, out)?;
        if let Some(marker) = series.style.marker {
            for &(x, y) in &series.points {
                if let Some((px, py)) = project(spec, &area, x, y) {
                    write_marker(marker, px, py, &series.style, pt, out)?;
                }
            }
        }
    }
    for marker in &spec.vertical_markers {
        let Some(fx) = spec.x_axis.fraction(marker.x) else {
            continue;
        };
        let px = area.left + fx * area.width;
        writeln!(
            out,
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' {}/>",
            px,
            area.top,
            px,
            area.bottom(),
            stroke_attrs(&marker.style, pt)
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(
        out,
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='{}' stroke-width='{:.2}'/>",
        area.left,
        area.top,
        area.width,
        area.height,
        TEXT_COLOR,
        0.8 * pt
    )?;

    write_labels(spec, &area, width, height, out)?;
    write_legend(spec, &area, out)?;

    writeln!(out, "</svg>")?;
    Ok(())
}

fn project(spec: &ChartSpec, area: &PlotArea, x: f64, y: f64) -> Option<(f64, f64)> {
    let fx = spec.x_axis.fraction(x)?;
    let fy = spec.y_axis.fraction(y)?;
    Some((area.left + fx * area.width, area.top + (1.0 - fy) * area.height))
}

fn write_grid_and_ticks<W: Write>(
    spec: &ChartSpec,
    area: &PlotArea,
    out: &mut W,
) -> Result<(), RenderError> {
    let pt = spec.point_scale();
    let tick_font = spec.fonts.tick * pt;

    for tick in spec.x_axis.ticks() {
        let Some(fx) = spec.x_axis.fraction(tick.value) else {
            continue;
        };
        let px = area.left + fx * area.width;
        if draws_grid(spec.grid, tick.major) {
            writeln!(
                out,
                "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='{:.2}'/>",
                px,
                area.top,
                px,
                area.bottom(),
                GRID_COLOR,
                0.8 * pt
            )?;
        }
        let tick_len = if tick.major { 3.5 * pt } else { 2.0 * pt };
        writeln!(
            out,
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='{:.2}'/>",
            px,
            area.bottom(),
            px,
            area.bottom() + tick_len,
            TEXT_COLOR,
            0.8 * pt
        )?;
        if tick.major {
            writeln!(
                out,
                "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='{}' font-size='{:.1}' fill='{}'>{}</text>",
                px,
                area.bottom() + tick_len + tick_font * 1.1,
                FONT_FAMILY,
                tick_font,
                TEXT_COLOR,
                spec.x_axis.tick_label(tick.value)
            )?;
        }
    }

    for tick in spec.y_axis.ticks() {
        let Some(fy) = spec.y_axis.fraction(tick.value) else {
            continue;
        };
        let py = area.top + (1.0 - fy) * area.height;
        if draws_grid(spec.grid, tick.major) {
            writeln!(
                out,
                "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='{:.2}'/>",
                area.left,
                py,
                area.right(),
                py,
                GRID_COLOR,
                0.8 * pt
            )?;
        }
        let tick_len = if tick.major { 3.5 * pt } else { 2.0 * pt };
        writeln!(
            out,
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='{:.2}'/>",
            area.left - tick_len,
            py,
            area.left,
            py,
            TEXT_COLOR,
            0.8 * pt
        )?;
        if tick.major {
            writeln!(
                out,
                "<text x='{:.2}' y='{:.2}' text-anchor='end' font-family='{}' font-size='{:.1}' fill='{}'>{}</text>",
                area.left - tick_len - 3.5 * pt,
                py + tick_font * 0.35,
                FONT_FAMILY,
                tick_font,
                TEXT_COLOR,
                spec.y_axis.tick_label(tick.value)
            )?;
        }
    }
    Ok(())
}

fn draws_grid(grid: GridLines, major: bool) -> bool {
    match grid {
        GridLines::Off => false,
        GridLines::Major => major,
        GridLines::Both => true,
    }
}

fn write_labels<W: Write>(
    spec: &ChartSpec,
    area: &PlotArea,
    width: f64,
    height: f64,
    out: &mut W,
) -> Result<(), RenderError> {
    let pt = spec.point_scale();
    let title_font = spec.fonts.title * pt;
    let label_font = spec.fonts.axis_label * pt;
    let weight = if spec.fonts.title_bold { "bold" } else { "normal" };

    writeln!(
        out,
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='{}' font-size='{:.1}' font-weight='{}' fill='{}'>{}</text>",
        area.left + area.width / 2.0,
        area.top - title_font * 0.6,
        FONT_FAMILY,
        title_font,
        weight,
        TEXT_COLOR,
        xml_escape(&spec.title)
    )?;
    writeln!(
        out,
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='{}' font-size='{:.1}' fill='{}'>{}</text>",
        area.left + area.width / 2.0,
        height - (height - area.bottom()) * 0.25,
        FONT_FAMILY,
        label_font,
        TEXT_COLOR,
        xml_escape(&spec.x_axis.label)
    )?;
    let y_label_x = (area.left * 0.3).min(width * 0.04);
    let y_label_y = area.top + area.height / 2.0;
    writeln!(
        out,
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='{}' font-size='{:.1}' fill='{}' transform='rotate(-90 {:.2} {:.2})'>{}</text>",
        y_label_x,
        y_label_y,
        FONT_FAMILY,
        label_font,
        TEXT_COLOR,
        y_label_x,
        y_label_y,
        xml_escape(&spec.y_axis.label)
    )?;
    Ok(())
}

fn write_legend<W: Write>(spec: &ChartSpec, area: &PlotArea, out: &mut W) -> Result<(), RenderError> {
    let entries: Vec<(&str, &SeriesStyle)> = spec
        .series
        .iter()
        .map(|series| (series.label.as_str(), &series.style))
        .chain(
            spec.vertical_markers
                .iter()
                .map(|marker| (marker.label.as_str(), &marker.style)),
        )
        .filter(|(label, _)| !label.is_empty())
        .collect();
    if entries.is_empty() {
        return Ok(());
    }

    let pt = spec.point_scale();
    let font = spec.fonts.legend * pt;
    let row_h = font * 1.4;
    let handle_w = font * 2.0;
    let pad = font * 0.5;
    let longest = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0) as f64;
    // Approximate glyph advance; SVG has no text metrics to query.
    let box_w = pad * 3.0 + handle_w + longest * font * 0.55;
    let box_h = pad * 2.0 + row_h * entries.len() as f64;
    let box_x = area.right() - box_w - pad;
    let box_y = area.top + pad;

    writeln!(
        out,
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' rx='{:.2}' fill='#ffffff' fill-opacity='0.8' stroke='#cccccc' stroke-width='{:.2}'/>",
        box_x,
        box_y,
        box_w,
        box_h,
        pad * 0.5,
        0.8 * pt
    )?;

    for (idx, (label, style)) in entries.iter().enumerate() {
        let cy = box_y + pad + row_h * (idx as f64 + 0.5);
        let x0 = box_x + pad;
        writeln!(
            out,
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' {}/>",
            x0,
            cy,
            x0 + handle_w,
            cy,
            stroke_attrs(style, pt)
        )?;
        if let Some(marker) = style.marker {
            write_marker(marker, x0 + handle_w / 2.0, cy, style, pt, out)?;
        }
        writeln!(
            out,
            "<text x='{:.2}' y='{:.2}' font-family='{}' font-size='{:.1}' fill='{}'>{}</text>",
            x0 + handle_w + pad,
            cy + font * 0.35,
            FONT_FAMILY,
            font,
            TEXT_COLOR,
            xml_escape(label)
        )?;
    }
    Ok(())
}

fn write_polyline<W: Write>(
    spec: &ChartSpec,
    area: &PlotArea,
    points: &[(f64, f64)],
    style: &SeriesStyle,
    out: &mut W,
) -> Result<(), RenderError> {
    let pt = spec.point_scale();
    let mut segment: Vec<(f64, f64)> = Vec::new();
    for &(x, y) in points {
        match project(spec, area, x, y) {
            Some(pixel) => segment.push(pixel),
            None => {
                flush_segment(&mut segment, style, pt, out)?;
            }
        }
    }
    flush_segment(&mut segment, style, pt, out)
}

fn flush_segment<W: Write>(
    segment: &mut Vec<(f64, f64)>,
    style: &SeriesStyle,
    pt: f64,
    out: &mut W,
) -> Result<(), RenderError> {
    if segment.len() >= 2 {
        let coords = segment
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "<polyline points='{}' fill='none' stroke-linejoin='round' {}/>",
            coords,
            stroke_attrs(style, pt)
        )?;
    }
    segment.clear();
    Ok(())
}

fn stroke_attrs(style: &SeriesStyle, pt: f64) -> String {
    let width = style.line_width * pt;
    let dash = match style.dash {
        Dash::Solid => String::new(),
        Dash::Dashed => format!(" stroke-dasharray='{:.2},{:.2}'", 3.7 * width, 1.6 * width),
        Dash::Dotted => format!(" stroke-dasharray='{:.2},{:.2}'", width, 1.65 * width),
    };
    format!(
        "stroke='{}' stroke-width='{:.2}' stroke-opacity='{:.2}'{}",
        style.color, width, style.opacity, dash
    )
}

fn write_marker<W: Write>(
    marker: Marker,
    px: f64,
    py: f64,
    style: &SeriesStyle,
    pt: f64,
    out: &mut W,
) -> Result<(), RenderError> {
    let r = style.marker_size * pt / 2.0;
    match marker {
        Marker::Circle => writeln!(
            out,
            "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}' fill-opacity='{:.2}'/>",
            px, py, r, style.color, style.opacity
        )?,
        Marker::Triangle => {
            let half_base = r * 0.866;
            writeln!(
                out,
                "<polygon points='{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}' fill='{}' fill-opacity='{:.2}'/>",
                px,
                py - r,
                px - half_base,
                py + r / 2.0,
                px + half_base,
                py + r / 2.0,
                style.color,
                style.opacity
            )?
        }
    }
    Ok(())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::{Axis, ChartSeries, FontSizes, VerticalMarker};

    fn sample_chart() -> ChartSpec {
        ChartSpec {
            file_stem: "sample".into(),
            title: "Start & run".into(),
            width_in: 10.0,
            height_in: 6.0,
            dpi: 100.0,
            x_axis: Axis::log("Time (s)", 0.1, 1000.0),
            y_axis: Axis::log("Current (A)", 50.0, 2000.0),
            series: vec![ChartSeries::new(
                "Trip",
                vec![(3600.0, 70.0), (600.0, 77.0), (40.0, 123.8), (0.0, 500.0)],
                SeriesStyle::line("red", 2.5)
                    .dash(Dash::Dashed)
                    .marker(Marker::Triangle, 8.0),
            )],
            vertical_markers: vec![VerticalMarker {
                x: 0.75,
                label: "Start time (0.75s)".into(),
                style: SeriesStyle::line("darkgreen", 2.0).dash(Dash::Dotted),
            }],
            grid: GridLines::Both,
            fonts: FontSizes::default(),
        }
    }

    fn render_to_string(spec: &ChartSpec) -> String {
        let mut buffer = Vec::new();
        render_svg(spec, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn svg_declares_physical_size_and_dpi_viewbox() {
        let svg = render_to_string(&sample_chart());
        assert!(svg.starts_with(
            "<svg xmlns='http://www.w3.org/2000/svg' width='10in' height='6in' viewBox='0 0 1000 600'>"
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_escapes_text_and_labels_plain_ticks() {
        let svg = render_to_string(&sample_chart());
        assert!(svg.contains("Start &amp; run"));
        assert!(svg.contains(">0.1</text>"));
        assert!(svg.contains(">1000</text>"));
        assert!(!svg.contains("e-1"));
    }

    #[test]
    fn svg_draws_series_markers_and_legend() {
        let svg = render_to_string(&sample_chart());
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("stroke-dasharray"));
        // three plottable points plus one legend handle
        assert_eq!(svg.matches("<polygon").count(), 4);
        assert!(svg.contains(">Trip</text>"));
        assert!(svg.contains(">Start time (0.75s)</text>"));
    }

    #[test]
    fn invalid_axis_is_reported_before_writing() {
        let mut spec = sample_chart();
        spec.x_axis = Axis::log("Time (s)", 0.0, 10.0);
        let mut buffer = Vec::new();
        let err = render_svg(&spec, &mut buffer).unwrap_err();
        assert!(matches!(err, RenderError::InvalidChart { .. }));
        assert!(buffer.is_empty());
    }

    #[test]
    fn write_svg_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_svg(&sample_chart(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "sample.svg");
        assert!(fs::read_to_string(path).unwrap().contains("<svg"));
    }

    #[test]
    fn unwritable_directory_is_a_create_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = write_svg(&sample_chart(), &missing).unwrap_err();
        assert!(matches!(err, RenderError::Create { .. }));
    }
}
