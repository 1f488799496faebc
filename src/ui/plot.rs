use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

use crate::chart::{percent_text, ChangePoint, ComparisonSeries};
use crate::color::{delta_color, generate_palette, survey_colors};
use crate::data::kpi::KpiResult;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics and charts for the current selection.
pub fn report_view(ui: &mut Ui, state: &AppState) {
    let report = match &state.view {
        View::Report(report) => report,
        View::NoData => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(
                    RichText::new("No data available for selected filters.")
                        .color(Color32::from_rgb(200, 150, 40)),
                );
            });
            return;
        }
        View::Warning(msg) => {
            ui.colored_label(
                Color32::from_rgb(200, 150, 40),
                format!("⚠ Cannot show values for this selection: {msg}"),
            );
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics(ui, &report.kpi);
            if report.matched_rows > 1 {
                ui.small(format!(
                    "{} rows match this selection; showing the first.",
                    report.matched_rows
                ));
            }
            ui.separator();

            ui.strong("NFHS 4 vs NFHS 5 Comparison");
            comparison_plot(ui, &report.comparison);
            ui.add_space(12.0);

            ui.heading("📌 All Indicators for Selected District");
            ui.strong("Change Across Indicators");
            let changes = &report.category_changes;
            if !changes.skipped.is_empty() {
                ui.colored_label(
                    Color32::from_rgb(200, 150, 40),
                    format!("⚠ Non-numeric Change left out: {}", changes.skipped.join(", ")),
                );
            }
            category_change_plot(ui, &changes.points);
            ui.add_space(8.0);
            change_table(ui, &changes.points);
        });
}

// ---------------------------------------------------------------------------
// KPI metrics
// ---------------------------------------------------------------------------

fn metrics(ui: &mut Ui, kpi: &KpiResult) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "NFHS 5", &percent_text(kpi.nfhs5), None);
        metric(&mut cols[1], "NFHS 4", &percent_text(kpi.nfhs4), None);
        metric(&mut cols[2], "Change", &percent_text(kpi.change), Some(kpi.change));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str, delta: Option<f64>) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(28.0).strong());
    if let Some(delta) = delta {
        ui.label(RichText::new(delta_text(delta)).color(delta_color(delta)));
    }
}

/// Arrow plus the same percent text the metric itself uses.
fn delta_text(delta: f64) -> String {
    let arrow = if delta > 0.0 {
        "⬆"
    } else if delta < 0.0 {
        "⬇"
    } else {
        "•"
    };
    format!("{arrow} {}", percent_text(delta))
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Two bars with their value printed above each.
fn comparison_plot(ui: &mut Ui, series: &ComparisonSeries) {
    let names: Vec<String> = series
        .points
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    let colors = survey_colors();

    let bars: Vec<Bar> = series
        .points
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((name, value), color))| {
            Bar::new(i as f64, *value).name(*name).fill(color).width(0.6)
        })
        .collect();

    Plot::new("comparison_plot")
        .height(260.0)
        .legend(Legend::default())
        .y_axis_label("Value")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| category_tick(&names, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Survey"));
            for (i, (_, value)) in series.points.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, *value), series.label(*value))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// One bar per indicator of the selected category.
fn category_change_plot(ui: &mut Ui, points: &[ChangePoint]) {
    let names: Vec<String> = points.iter().map(|p| p.indicator.clone()).collect();
    let palette = generate_palette(points.len());

    let bars: Vec<Bar> = points
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (p, color))| {
            Bar::new(i as f64, p.change)
                .name(&p.indicator)
                .fill(color)
                .width(0.7)
        })
        .collect();

    Plot::new("category_change_plot")
        .height(300.0)
        .y_axis_label("Change")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| category_tick(&names, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Change"));
        });
}

/// Axis label for an integer tick that lands on a bar.
fn category_tick(names: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Indicator / change table
// ---------------------------------------------------------------------------

fn change_table(ui: &mut Ui, points: &[ChangePoint]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().at_least(240.0))
        .column(Column::auto().at_least(80.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Indicator");
            });
            header.col(|ui| {
                ui.strong("Change");
            });
        })
        .body(|mut body| {
            for p in points {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(p.indicator.as_str());
                    });
                    row.col(|ui| {
                        let layout = egui::Layout::right_to_left(egui::Align::Center);
                        ui.with_layout(layout, |ui| {
                            ui.colored_label(delta_color(p.change), format!("{:+.2}", p.change));
                        });
                    });
                });
            }
        });
}
