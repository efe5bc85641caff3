//! Chart Plotter Module
//! Draws the six dashboard panels with egui_plot.

use egui::{Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Points, Polygon, Text,
};
use std::ops::RangeInclusive;

use super::chart_data::{ChartData, Violin};
use crate::stats::BoxStats;

/// Half the horizontal room a violin may take around its slot.
const VIOLIN_HALF_WIDTH: f64 = 0.4;

/// Endpoints of the heatmap ramp (low, mid, high).
const HEAT_LOW: [f32; 3] = [59.0, 76.0, 192.0];
const HEAT_MID: [f32; 3] = [221.0, 221.0, 221.0];
const HEAT_HIGH: [f32; 3] = [180.0, 4.0, 38.0];

/// Axis formatter that labels integer slots with category names.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// Format a bed/bathroom count without a trailing `.0`.
fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn box_elem(slot: f64, stats: &BoxStats, width: f64) -> BoxElem {
    BoxElem::new(
        slot,
        BoxSpread::new(
            stats.whisker_low,
            stats.q1,
            stats.median,
            stats.q3,
            stats.whisker_high,
        ),
    )
    .box_width(width)
}

/// Map `t` in `[0, 1]` onto a blue-grey-red ramp.
pub fn heat_color(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.5 };
    let (from, to, f) = if t < 0.5 {
        (HEAT_LOW, HEAT_MID, t * 2.0)
    } else {
        (HEAT_MID, HEAT_HIGH, (t - 0.5) * 2.0)
    };
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * f).round() as u8;
    Color32::from_rgb(channel(0), channel(1), channel(2))
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Placeholder for a panel with nothing to draw.
    pub fn draw_no_data(ui: &mut egui::Ui, height: f32) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No data for the current selection").color(Color32::GRAY));
            });
        });
    }

    /// Price histogram with the density curve on top.
    pub fn draw_price_histogram(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        let histogram = &data.distribution.histogram;
        if histogram.is_empty() {
            Self::draw_no_data(ui, height);
            return;
        }

        let width = histogram.bin_width();
        let bars: Vec<Bar> = histogram
            .bars()
            .map(|(centre, count)| Bar::new(centre, count as f64).width(width))
            .collect();

        Plot::new("price_histogram")
            .height(height)
            .x_axis_label("Price")
            .y_axis_label("Count")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Listings"));
                if !data.distribution.kde_curve.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(data.distribution.kde_curve.clone()))
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// Mean price per neighbourhood, highest first.
    pub fn draw_neighbourhood_bars(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        if data.neighbourhood_prices.is_empty() {
            Self::draw_no_data(ui, height);
            return;
        }

        let labels: Vec<String> = data
            .neighbourhood_prices
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        let bars: Vec<Bar> = data
            .neighbourhood_prices
            .iter()
            .enumerate()
            .map(|(i, (name, mean))| Bar::new(i as f64, *mean).width(0.8).name(name))
            .collect();

        Plot::new("neighbourhood_bars")
            .height(height)
            .y_axis_label("Average price")
            .allow_scroll(false)
            .x_axis_formatter(category_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Average price"));
            });
    }

    /// Price box plot per room type.
    pub fn draw_room_type_boxes(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        if data.room_type_boxes.is_empty() {
            Self::draw_no_data(ui, height);
            return;
        }

        let labels: Vec<String> = data
            .room_type_boxes
            .iter()
            .map(|b| b.room_type.clone())
            .collect();

        Plot::new("room_type_boxes")
            .height(height)
            .y_axis_label("Price")
            .allow_scroll(false)
            .x_axis_formatter(category_formatter(labels))
            .show(ui, |plot_ui| {
                for (i, room) in data.room_type_boxes.iter().enumerate() {
                    let slot = i as f64;
                    plot_ui.box_plot(
                        BoxPlot::new(vec![box_elem(slot, &room.stats, 0.5)
                            .name(format!("{} (n={})", room.room_type, room.count))])
                        .name(&room.room_type),
                    );

                    if !room.stats.outliers.is_empty() {
                        let outliers: Vec<[f64; 2]> =
                            room.stats.outliers.iter().map(|&y| [slot, y]).collect();
                        plot_ui.points(
                            Points::new(PlotPoints::from(outliers))
                                .radius(2.0)
                                .name(&room.room_type),
                        );
                    }
                }
            });
    }

    fn violin_outline(violin: &Violin, slot: f64) -> Vec<[f64; 2]> {
        let peak = violin.peak();
        if peak <= 0.0 {
            return Vec::new();
        }
        let scale = VIOLIN_HALF_WIDTH / peak;

        let right = violin.density.iter().map(|&[y, d]| [slot + d * scale, y]);
        let left = violin
            .density
            .iter()
            .rev()
            .map(|&[y, d]| [slot - d * scale, y]);
        right.chain(left).collect()
    }

    /// Price violins per superhost value.
    pub fn draw_superhost_violins(ui: &mut egui::Ui, violins: &[Violin], height: f32) {
        if violins.is_empty() {
            Self::draw_no_data(ui, height);
            return;
        }

        let labels: Vec<String> = violins.iter().map(|v| v.label.clone()).collect();

        Plot::new("superhost_violins")
            .height(height)
            .x_axis_label("host_is_superhost")
            .y_axis_label("Price")
            .allow_scroll(false)
            .x_axis_formatter(category_formatter(labels))
            .show(ui, |plot_ui| {
                for (i, violin) in violins.iter().enumerate() {
                    let slot = i as f64;
                    let outline = Self::violin_outline(violin, slot);
                    if !outline.is_empty() {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(outline))
                                .stroke(Stroke::new(1.0, Color32::GRAY))
                                .name(&violin.label),
                        );
                    }
                    plot_ui.box_plot(
                        BoxPlot::new(vec![box_elem(slot, &violin.stats, 0.08)])
                            .name(&violin.label),
                    );
                }
            });
    }

    /// Number of reviews against price.
    pub fn draw_reviews_scatter(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        if data.reviews_vs_price.is_empty() {
            Self::draw_no_data(ui, height);
            return;
        }

        Plot::new("reviews_scatter")
            .height(height)
            .x_axis_label("number_of_reviews")
            .y_axis_label("Price")
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(data.reviews_vs_price.clone()))
                        .radius(2.0)
                        .name("Listings"),
                );
            });
    }

    /// Mean price heatmap: bathrooms across, beds up, mean written in each cell.
    pub fn draw_beds_bathrooms_heatmap(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        let pivot = &data.beds_bathrooms;
        let Some((lo, hi)) = pivot.value_range() else {
            Self::draw_no_data(ui, height);
            return;
        };
        let span = hi - lo;

        let x_labels: Vec<String> = pivot.col_keys.iter().map(|&k| format_count(k)).collect();
        let y_labels: Vec<String> = pivot.row_keys.iter().map(|&k| format_count(k)).collect();

        Plot::new("beds_bathrooms_heatmap")
            .height(height)
            .x_axis_label("bathrooms")
            .y_axis_label("beds")
            .allow_scroll(false)
            .show_grid(false)
            .x_axis_formatter(category_formatter(x_labels))
            .y_axis_formatter(category_formatter(y_labels))
            .show(ui, |plot_ui| {
                for (row, &beds) in pivot.row_keys.iter().enumerate() {
                    for (col, &bathrooms) in pivot.col_keys.iter().enumerate() {
                        let Some(mean) = pivot.get(beds, bathrooms) else {
                            continue;
                        };
                        let (x, y) = (col as f64, row as f64);
                        let t = if span > 0.0 { (mean - lo) / span } else { 0.5 };
                        let rect = vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ];
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(rect))
                                .fill_color(heat_color(t))
                                .stroke(Stroke::NONE),
                        );
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(format!("{mean:.0}")).color(Color32::BLACK),
                        ));
                    }
                }
            });
    }
}
