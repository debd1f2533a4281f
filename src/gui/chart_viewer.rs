//! Chart Viewer Widget
//! Central scrollable panel with headline totals, the three charts and the sorted table.

use egui::{Color32, RichText, ScrollArea};
use registry_dashboard::charts::bindings::{format_value, group_thousands};
use registry_dashboard::charts::{ChartPlotter, DashboardCharts};
use registry_dashboard::data::NumericField;

const CHART_HEIGHT: f32 = 300.0;
const CARD_SPACING: f32 = 15.0;

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, charts: Option<&DashboardCharts>) {
        let Some(charts) = charts else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_totals(ui, charts);
                ui.add_space(CARD_SPACING);

                for spec in charts.charts() {
                    Self::card(ui, |ui| ChartPlotter::draw(ui, spec, CHART_HEIGHT));
                    ui.add_space(CARD_SPACING);
                }

                Self::card(ui, |ui| {
                    ui.label(RichText::new("All Regions (sorted)").size(14.0).strong());
                    ui.add_space(6.0);
                    ChartPlotter::draw_table(ui, "sorted", &charts.sorted_table);
                });
            });
    }

    fn draw_totals(ui: &mut egui::Ui, charts: &DashboardCharts) {
        ui.horizontal(|ui| {
            Self::metric(
                ui,
                "Total Population",
                &group_thousands(charts.totals.total_population),
            );
            ui.add_space(CARD_SPACING);
            Self::metric(
                ui,
                "Total Households",
                &group_thousands(charts.totals.total_households),
            );
            ui.add_space(CARD_SPACING);
            let per_household = if charts.totals.total_households > 0.0 {
                charts.totals.total_population / charts.totals.total_households
            } else {
                0.0
            };
            Self::metric(
                ui,
                "Population per Household",
                &format_value(NumericField::PopulationPerHousehold, per_household),
            );
        });
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(22.0).strong());
                });
            });
    }

    fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, add_contents);
    }
}
