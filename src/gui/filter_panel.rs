//! Filter Panel Widget
//! Left side panel with the data source and the two multi-select filters.

use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::data::Dataset;
use crate::view::FilterSelection;

/// Sidebar with the data source and neighbourhood / room type filters.
#[derive(Default)]
pub struct FilterPanel {
    pub csv_path: Option<PathBuf>,
    /// Neighbourhood options, sorted.
    pub neighbourhoods: Vec<String>,
    /// Room type options, in order of first appearance.
    pub room_types: Vec<String>,
    pub status: String,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self {
            status: "Ready".to_string(),
            ..Self::default()
        }
    }

    /// Refresh the options after a dataset is loaded.
    pub fn update_options(&mut self, dataset: &Dataset) {
        self.neighbourhoods = dataset.neighbourhoods();
        self.room_types = dataset.room_types();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Checkbox list for one field. Returns true when the selection changed.
    fn multi_select(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        options: &[String],
        selected: &mut BTreeSet<String>,
    ) -> bool {
        let mut changed = false;
        let header = format!("{title}  ({}/{})", selected.len(), options.len());

        egui::CollapsingHeader::new(RichText::new(header).strong())
            .id_salt(id)
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.small_button("All").clicked() {
                        selected.extend(options.iter().cloned());
                        changed = true;
                    }
                    if ui.small_button("None").clicked() {
                        selected.clear();
                        changed = true;
                    }
                });

                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(220.0)
                    .show(ui, |ui| {
                        for option in options {
                            let mut checked = selected.contains(option);
                            if ui.checkbox(&mut checked, option.as_str()).changed() {
                                if checked {
                                    selected.insert(option.clone());
                                } else {
                                    selected.remove(option);
                                }
                                changed = true;
                            }
                        }
                    });
            });

        changed
    }

    /// Draw the filter panel
    pub fn show(&mut self, ui: &mut egui::Ui, selection: &mut FilterSelection) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(RichText::new("Airbnb Listings").size(20.0).strong());
        });
        ui.add_space(8.0);
        ui.separator();

        // ===== Data Source Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.horizontal(|ui| {
            let path_text = self
                .csv_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "No file loaded".to_string());
            ui.label(path_text);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Open CSV").clicked() {
                    action = FilterPanelAction::OpenCsv;
                }
            });
        });

        ui.add_space(10.0);
        ui.separator();

        // ===== Filters Section =====
        ui.label(RichText::new("Filters").size(14.0).strong());
        ui.add_space(5.0);

        let neighbourhoods_changed = Self::multi_select(
            ui,
            "neighbourhoods",
            "Neighbourhood(s)",
            &self.neighbourhoods,
            &mut selection.neighbourhoods,
        );
        ui.add_space(5.0);
        let room_types_changed = Self::multi_select(
            ui,
            "room_types",
            "Room type(s)",
            &self.room_types,
            &mut selection.room_types,
        );

        if neighbourhoods_changed || room_types_changed {
            action = FilterPanelAction::SelectionChanged;
        }

        ui.add_space(10.0);
        ui.separator();

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    OpenCsv,
    SelectionChanged,
}
