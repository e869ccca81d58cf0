//! SVG rendering of `Chart` objects via plotters.

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chart::{Chart, ChartKind, SeriesColor};
use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Chart {
    /// Render as a standalone SVG document.
    pub fn to_svg(&self, size: ChartSize) -> Result<String, ReportError> {
        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (size.width, size.height))
                .into_drawing_area();
            draw(self, &root).map_err(|e| ReportError::Chart(e.to_string()))?;
            root.present()
                .map_err(|e| ReportError::Chart(e.to_string()))?;
        }
        Ok(out)
    }
}

fn draw<DB: DrawingBackend>(
    chart: &Chart,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let slots = chart.points.len().max(1) as i32;
    let (lo, hi) = chart.value_range();

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title.as_str(), ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((0..slots).into_segmented(), lo..hi)?;

    let labels: Vec<&str> = chart.labels().collect();
    let x_fmt = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let y_fmt = |v: &f64| format!("{v:.0}");

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        // one label per slot; fewer would skip categories
        .x_labels(labels.len() * 2 + 2)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .axis_desc_style(("sans-serif", 18).into_font())
        .label_style(("sans-serif", 14).into_font())
        .draw()?;

    match chart.kind {
        ChartKind::Bar => {
            ctx.draw_series(chart.points.iter().enumerate().map(|(i, p)| {
                let (r, g, b) = p.color.rgb();
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), p.value),
                    ],
                    RGBColor(r, g, b).filled(),
                );
                bar.set_margin(0, 0, 8, 8);
                bar
            }))?;
        }
        ChartKind::Line => {
            let color = chart
                .points
                .first()
                .map(|p| p.color.rgb())
                .unwrap_or(SeriesColor::Neutral.rgb());
            let color = RGBColor(color.0, color.1, color.2);
            let points = || {
                chart
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (SegmentValue::CenterOf(i as i32), p.value))
            };
            ctx.draw_series(LineSeries::new(points(), color.stroke_width(2)))?;
            ctx.draw_series(points().map(|pt| Circle::new(pt, 4, color.filled())))?;
        }
    }

    Ok(())
}
