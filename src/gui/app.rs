//! Dashboard Main Application
//! Owns the dataset and the current selection; recomputes charts on every change.

use egui::SidePanel;

use crate::charts::ChartData;
use crate::config::DashboardConfig;
use crate::data::{self, Dataset};
use crate::gui::{ChartViewer, FilterPanel, FilterPanelAction};
use crate::view::{filter, FilterSelection};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    dataset: Dataset,
    selection: FilterSelection,
    filter_panel: FilterPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig, dataset: Dataset) -> Self {
        let mut app = Self {
            selection: FilterSelection::default(),
            filter_panel: FilterPanel::new(),
            chart_viewer: ChartViewer::new(),
            dataset: Dataset::default(),
            config,
        };
        let path = app.config.data_path.clone();
        app.set_dataset(dataset, path);
        app
    }

    /// Install a dataset: reset the selection to everything and redraw.
    fn set_dataset(&mut self, dataset: Dataset, path: std::path::PathBuf) {
        self.selection = FilterSelection::all(&dataset);
        self.filter_panel.update_options(&dataset);
        self.filter_panel.csv_path = Some(path);
        self.filter_panel
            .set_status(format!("Loaded {} listings", dataset.len()));
        self.dataset = dataset;
        self.refresh_charts();
    }

    /// Recompute the view and every panel from the immutable dataset.
    fn refresh_charts(&mut self) {
        let chart_data = filter(&self.dataset, &self.selection).and_then(|view| {
            ChartData::from_view(&view, self.dataset.has_superhost(), self.config.histogram_bins)
        });
        match chart_data {
            Ok(chart_data) => self.chart_viewer.set_chart_data(chart_data),
            Err(e) => {
                log::error!("Failed to compute charts: {e}");
                self.filter_panel.set_status(format!("Error: {e}"));
            }
        }
    }

    /// Let the user pick another CSV; keep the current data if it fails to load.
    fn handle_open_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        log::info!("Opening {}", path.display());
        match data::load(&path, &self.config.cleaning_options()) {
            Ok(dataset) => self.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.filter_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters
        SidePanel::left("filter_panel")
            .min_width(260.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.filter_panel.show(ui, &mut self.selection) {
                        FilterPanelAction::OpenCsv => self.handle_open_csv(),
                        FilterPanelAction::SelectionChanged => self.refresh_charts(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
