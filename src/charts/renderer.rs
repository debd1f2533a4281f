//! Static Chart Renderer
//! Writes chart specifications to PNG files using plotters.
//!
//! Layout:
//! 1. Caption centered at the top
//! 2. Bar charts: one segment per category, labels under each bar
//! 3. Bubble charts: categories on x, circle radius from the point's relative size

use crate::charts::bindings::{BarChartSpec, BubbleChartSpec, ChartSpec};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const BAR_FILL: RGBColor = RGBColor(91, 155, 213);
const BUBBLE_FILL: RGBColor = RGBColor(237, 125, 49);
const MAX_BUBBLE_RADIUS: f64 = 40.0;
const MIN_BUBBLE_RADIUS: f64 = 3.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render for chart '{0}'")]
    EmptyChart(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Renders charts to bitmap files.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `spec` as a `width` x `height` PNG at `path`.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if spec.is_empty() {
            return Err(RenderError::EmptyChart(spec.id().to_string()));
        }
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match spec {
            ChartSpec::Bar(bar) => Self::draw_bar(&root, bar)?,
            ChartSpec::Bubble(bubble) => Self::draw_bubble(&root, bubble)?,
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Upper y bound with headroom above the tallest value.
    fn y_upper(values: impl Iterator<Item = f64>) -> f64 {
        let max = values.fold(0.0f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    fn draw_bar<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &BarChartSpec,
    ) -> Result<(), RenderError> {
        let n = spec.bars.len();
        let y_max = Self::y_upper(spec.bars.iter().map(|b| b.value));

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
            .map_err(draw_err)?;

        let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
        let x_label_fmt = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&x_label_fmt)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_FILL.filled())
                    .margin(8)
                    .data(spec.bars.iter().enumerate().map(|(i, b)| (i, b.value))),
            )
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_bubble<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &BubbleChartSpec,
    ) -> Result<(), RenderError> {
        let n = spec.points.len();
        let y_min = spec.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_max = spec.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((y_max - y_min) * 0.15).max(1.0);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), (y_min - pad)..(y_max + pad))
            .map_err(draw_err)?;

        let labels: Vec<String> = spec.points.iter().map(|p| p.label.clone()).collect();
        let x_label_fmt = |v: &f64| {
            let idx = v.round();
            if (v - idx).abs() > 1e-6 || idx < 0.0 {
                String::new()
            } else {
                labels.get(idx as usize).cloned().unwrap_or_default()
            }
        };

        chart
            .configure_mesh()
            .x_labels(n)
            .x_label_formatter(&x_label_fmt)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(spec.points.iter().map(|p| {
                let radius = MIN_BUBBLE_RADIUS + (MAX_BUBBLE_RADIUS - MIN_BUBBLE_RADIUS) * p.size;
                Circle::new((p.x, p.y), radius as i32, BUBBLE_FILL.mix(0.5).filled())
            }))
            .map_err(draw_err)?;

        Ok(())
    }
}
