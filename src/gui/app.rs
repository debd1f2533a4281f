//! Registry Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use registry_dashboard::charts::{DashboardCharts, StaticChartRenderer};
use registry_dashboard::{DashboardConfig, DashboardError, Session};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const PNG_WIDTH: u32 = 1400;
const PNG_HEIGHT: u32 = 900;

/// Main application window. Owns at most one session at a time.
pub struct DashboardApp {
    config: DashboardConfig,
    session: Option<Session>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(config.top_n),
            chart_viewer: ChartViewer::new(),
            session: None,
            config,
        };
        let result = Session::open_default(&app.config);
        app.install_session(result);
        app
    }

    /// Replace the current session with a load result, reporting failures in the status line.
    fn install_session(&mut self, result: Result<Session, DashboardError>) {
        match result {
            Ok(session) => {
                let regions: Vec<String> = session.regions().into_iter().map(str::to_string).collect();
                let status = format!("Loaded {} regions", regions.len());
                self.control_panel
                    .update_regions(regions, session.source().to_string());
                self.control_panel.set_status(&status);
                self.session = Some(session);
            }
            Err(e) => {
                error!(error = %e, "failed to load dataset");
                self.session = None;
                self.control_panel.clear_data();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle CSV upload; the new dataset replaces the old one wholesale.
    fn handle_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return; // User cancelled
        };

        let result = Self::open_upload(&self.config, &path);
        self.install_session(result);
    }

    fn open_upload(config: &DashboardConfig, path: &Path) -> Result<Session, DashboardError> {
        let file = File::open(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Session::open_upload(config, Some((name.as_str(), file)))
    }

    fn current_charts(&self) -> Option<DashboardCharts> {
        let settings = &self.control_panel.settings;
        self.session
            .as_ref()
            .map(|s| DashboardCharts::build(s, &settings.region, &settings.sort))
    }

    /// Export the table in the selected sort order as UTF-8 CSV.
    fn handle_export_csv(&mut self) {
        let Some(session) = &self.session else {
            self.control_panel.set_status("No data to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("registry_export.csv")
            .save_file()
        else {
            return;
        };

        let sort = &self.control_panel.settings.sort;
        let rows = session.sorted_by(sort.field, sort.ascending);
        match session.export_csv_file(&rows, &path) {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Exported {} rows to {}", rows.len(), path.display())),
            Err(e) => self.control_panel.set_status(&format!("Error: {}", e)),
        }
    }

    /// Render every non-empty chart to PNG in a chosen folder, then open the folder.
    fn handle_export_png(&mut self) {
        let Some(charts) = self.current_charts() else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let mut written: Vec<PathBuf> = Vec::new();
        for spec in charts.charts() {
            if spec.is_empty() {
                continue;
            }
            let path = dir.join(format!("{}.png", spec.id()));
            if let Err(e) = StaticChartRenderer::render_png(spec, &path, PNG_WIDTH, PNG_HEIGHT) {
                self.control_panel
                    .set_status(&format!("Error: rendering {}: {}", spec.id(), e));
                return;
            }
            written.push(path);
        }

        info!(count = written.len(), dir = %dir.display(), "exported chart images");
        self.control_panel
            .set_status(&format!("Exported {} charts to {}", written.len(), dir.display()));
        if let Err(e) = open::that(&dir) {
            error!(error = %e, "failed to open export folder");
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::UploadCsv => self.handle_upload(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Views are recomputed from the session on every frame
        let charts = self.current_charts();

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, charts.as_ref());
        });
    }
}
