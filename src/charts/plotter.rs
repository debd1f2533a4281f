//! Chart Plotter Module
//! Draws chart specifications interactively using egui_plot.

use crate::charts::bindings::{BarChartSpec, BubbleChartSpec, ChartSpec, TableSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Largest bubble radius in points.
const MAX_BUBBLE_RADIUS: f32 = 28.0;
const MIN_BUBBLE_RADIUS: f32 = 3.0;

/// Draws [`ChartSpec`]s with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color_for(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Axis label for a category position, or empty between categories.
    fn category_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if (value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        ui.label(RichText::new(spec.title()).size(14.0).strong());
        if spec.is_empty() {
            ui.label(RichText::new("No data for this selection").color(Color32::GRAY));
            return;
        }
        match spec {
            ChartSpec::Bar(bar) => Self::draw_bar_chart(ui, bar, height),
            ChartSpec::Bubble(bubble) => Self::draw_bubble_chart(ui, bubble, height),
        }
    }

    /// One colored bar per category, categories on the x-axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec, height: f32) {
        let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
        let per_category_color = spec.bars.len() <= 2;

        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let color = if per_category_color {
                    Self::color_for(i)
                } else {
                    BAR_COLOR
                };
                Bar::new(i as f64, b.value)
                    .name(&b.label)
                    .width(0.6)
                    .fill(color)
            })
            .collect();

        Plot::new(format!("bar_{}", spec.id))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&spec.y_label));
            });
    }

    /// Points at category positions with radius scaled by the point's relative size.
    pub fn draw_bubble_chart(ui: &mut egui::Ui, spec: &BubbleChartSpec, height: f32) {
        let labels: Vec<String> = spec.points.iter().map(|p| p.label.clone()).collect();

        Plot::new(format!("bubble_{}", spec.id))
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, point) in spec.points.iter().enumerate() {
                    let radius = MIN_BUBBLE_RADIUS
                        + (MAX_BUBBLE_RADIUS - MIN_BUBBLE_RADIUS) * point.size as f32;
                    plot_ui.points(
                        Points::new(vec![[point.x, point.y]])
                            .radius(radius)
                            .color(Self::color_for(i).gamma_multiply(0.6))
                            .name(&point.label),
                    );
                }
            });
    }

    /// Striped grid with the table header in bold.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableSpec) {
        egui::Grid::new(ui.make_persistent_id(format!("table_{}", id)))
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for cell in &table.header {
                    ui.label(RichText::new(cell).strong());
                }
                ui.end_row();

                for row in &table.rows {
                    for (i, cell) in row.iter().enumerate() {
                        if i == 0 {
                            ui.label(cell);
                        } else {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(cell);
                            });
                        }
                    }
                    ui.end_row();
                }
            });
    }
}
