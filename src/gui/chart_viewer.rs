//! Chart Viewer Widget
//! Central scrollable area with the six dashboard panels.

use egui::{RichText, ScrollArea};

use crate::charts::{ChartData, ChartPlotter};
use crate::stats::GroupStats;

const HALF_HEIGHT: f32 = 320.0;
const FULL_HEIGHT: f32 = 360.0;
const SECTION_SPACING: f32 = 15.0;

/// One-line price summary shown above the panels.
fn price_summary_line(data: &ChartData) -> String {
    let GroupStats {
        count,
        mean,
        median,
        std,
        q1,
        q3,
        p05,
        p95,
    } = data.price_summary;
    format!(
        "{count} listings selected | price mean {mean:.2}, median {median:.2}, std {std:.2} \
         | IQR {q1:.2} to {q3:.2} | 5th to 95th percentile {p05:.2} to {p95:.2}"
    )
}

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    pub chart_data: Option<ChartData>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chart_data(&mut self, chart_data: ChartData) {
        self.chart_data = Some(chart_data);
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(16.0).strong());
        ui.add_space(4.0);
    }

    /// Draw all panels
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(data) = &self.chart_data else {
            ui.centered_and_justified(|ui| {
                ui.label("No data loaded");
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Airbnb Listings Dashboard");
                if data.is_empty() {
                    ui.label("No listings match the current selection");
                } else {
                    ui.label(price_summary_line(data));
                }

                ui.columns(2, |columns| {
                    Self::section(&mut columns[0], "Price Distribution");
                    ChartPlotter::draw_price_histogram(&mut columns[0], data, HALF_HEIGHT);

                    Self::section(&mut columns[1], "Avg Price by Neighbourhood");
                    ChartPlotter::draw_neighbourhood_bars(&mut columns[1], data, HALF_HEIGHT);
                });

                Self::section(ui, "Room Type vs Price");
                ChartPlotter::draw_room_type_boxes(ui, data, FULL_HEIGHT);

                if let Some(violins) = &data.superhost {
                    Self::section(ui, "Superhost vs Price");
                    ChartPlotter::draw_superhost_violins(ui, violins, FULL_HEIGHT);
                }

                Self::section(ui, "Reviews vs Price");
                ChartPlotter::draw_reviews_scatter(ui, data, FULL_HEIGHT);

                Self::section(ui, "Beds and Bathrooms vs Price");
                ChartPlotter::draw_beds_bathrooms_heatmap(ui, data, FULL_HEIGHT);
                ui.add_space(SECTION_SPACING);
            });
    }
}
