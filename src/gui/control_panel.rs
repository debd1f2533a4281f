//! Control Panel Widget
//! Left side panel with data source, region selector, sort controls and exports.

use egui::{Color32, ComboBox, RichText};
use registry_dashboard::charts::SortSelection;
use registry_dashboard::data::NumericField;

/// Selection state the views are recomputed from on every frame.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub region: String,
    pub sort: SortSelection,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub regions: Vec<String>,
    pub source_label: Option<String>,
    pub status: String,
    pub has_data: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            regions: Vec::new(),
            source_label: None,
            status: "Ready".to_string(),
            has_data: false,
        }
    }
}

impl ControlPanel {
    pub fn new(top_n: usize) -> Self {
        let mut panel = Self::default();
        panel.settings.sort.n = top_n;
        panel
    }

    /// Replace the region list after a (re)load; selects the first region.
    pub fn update_regions(&mut self, regions: Vec<String>, source_label: String) {
        self.settings.region = regions.first().cloned().unwrap_or_default();
        self.regions = regions;
        self.source_label = Some(source_label);
        self.has_data = true;
    }

    /// Forget the current dataset (failed reload).
    pub fn clear_data(&mut self) {
        self.regions.clear();
        self.settings.region.clear();
        self.has_data = false;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Registry Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Population & Households")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let text = self
                        .source_label
                        .clone()
                        .unwrap_or_else(|| "No file loaded".to_string());
                    ui.label(RichText::new(text).size(12.0).color(if self.has_data {
                        Color32::WHITE
                    } else {
                        Color32::GRAY
                    }));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Upload").clicked() {
                            action = ControlPanelAction::UploadCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        ui.label(RichText::new("🔧 Selection").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 170.0;

        ui.add_enabled_ui(self.has_data, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Region:"));
                ComboBox::from_id_salt("region")
                    .width(combo_width)
                    .selected_text(&self.settings.region)
                    .show_ui(ui, |ui| {
                        for region in &self.regions {
                            ui.selectable_value(&mut self.settings.region, region.clone(), region);
                        }
                    });
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Sort By:"));
                ComboBox::from_id_salt("sort_field")
                    .width(combo_width)
                    .selected_text(self.settings.sort.field.label())
                    .show_ui(ui, |ui| {
                        for field in NumericField::ALL {
                            ui.selectable_value(&mut self.settings.sort.field, field, field.label());
                        }
                    });
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Rows:"));
                ui.add(egui::DragValue::new(&mut self.settings.sort.n).range(1..=500));
                ui.checkbox(&mut self.settings.sort.ascending, "Ascending");
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.has_data, |ui| {
                let csv_button = egui::Button::new(RichText::new("💾 Export Table (CSV)").size(14.0))
                    .min_size(egui::vec2(200.0, 30.0));
                if ui.add(csv_button).clicked() {
                    action = ControlPanelAction::ExportCsv;
                }

                ui.add_space(8.0);

                let png_button = egui::Button::new(RichText::new("🖼 Export Charts (PNG)").size(14.0))
                    .min_size(egui::vec2(200.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    UploadCsv,
    ExportCsv,
    ExportPng,
}
