use std::f64::consts::{FRAC_PI_4, TAU};

use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use screentime_viewer::analysis::{BasicStats, CorrelationMatrix, FrequencyTable, GroupAggregate};

use crate::color::{coolwarm, ColorMap, UNDEFINED_CELL};
use crate::state::{AppState, View};

/// Bar colours of the gender chart, cycled.
const BAR_COLORS: [Color32; 2] = [
    Color32::from_rgb(0x66, 0xb3, 0xff),
    Color32::from_rgb(0xff, 0x99, 0x99),
];

const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

/// Pie wedges start at this angle, counter-clockwise.
const PIE_START_DEG: f64 = 140.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render whatever the last action produced.
pub fn current_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load a survey file to begin  (File → Open…)");
        });
        return;
    }

    match &state.view {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Pick an analysis on the left");
            });
        }
        Some(View::Stats(stats)) => stats_view(ui, stats),
        Some(View::DeviceShare(table)) => {
            ui.heading("Primary Device Usage");
            pie_chart(ui, table);
        }
        Some(View::GenderCounts(table)) => {
            ui.heading("Gender Distribution");
            bar_chart(ui, table);
        }
        Some(View::ScreenTimeByAge(agg)) => {
            ui.heading("Average Screen Time by Age");
            line_chart(ui, agg);
        }
        Some(View::Correlation(matrix)) => {
            ui.heading("Correlation Heatmap");
            heatmap(ui, matrix);
        }
    }
}

fn stats_view(ui: &mut Ui, stats: &BasicStats) {
    ui.heading("Basic Statistics");
    ui.add_space(8.0);
    egui::Grid::new("basic_stats")
        .num_columns(2)
        .spacing([24.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Total Records");
            ui.strong(stats.count.to_string());
            ui.end_row();

            ui.label("Average Age");
            ui.strong(format!("{:.2}", stats.mean_age));
            ui.end_row();

            ui.label("Average Daily Screen Time");
            ui.strong(format!("{:.2} hrs", stats.mean_screen_time));
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Pie chart (device share)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, table: &FrequencyTable) {
    let counts = table.sorted_by_count();
    let shares = table.shares();
    let colors = ColorMap::new(counts.iter().map(|(v, _)| v));
    let total = table.total() as f64;

    Plot::new("device_pie")
        .height(ui.available_height() * 0.65)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.3)
        .include_y(1.3)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = PIE_START_DEG.to_radians();
            for ((value, count), (_, percent)) in counts.iter().zip(&shares) {
                let sweep = *count as f64 / total * TAU;
                let label = value.to_string();
                let color = colors.color_for(value);

                for piece in wedge_pieces(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(piece))
                            .name(&label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{percent:.1}%")).color(Color32::BLACK),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()), label)
                        .anchor(Align2::CENTER_CENTER),
                );

                start += sweep;
            }
        });

    ui.add_space(6.0);
    frequency_table(ui, table);
}

/// Split a wedge into convex slices of at most 45°.
fn wedge_pieces(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    const ARC_STEPS: usize = 12;
    let pieces = (sweep / FRAC_PI_4).ceil().max(1.0) as usize;
    (0..pieces)
        .map(|p| {
            let a0 = start + sweep * p as f64 / pieces as f64;
            let a1 = start + sweep * (p + 1) as f64 / pieces as f64;
            let mut points = vec![[0.0, 0.0]];
            points.extend((0..=ARC_STEPS).map(|s| {
                let a = a0 + (a1 - a0) * s as f64 / ARC_STEPS as f64;
                [a.cos(), a.sin()]
            }));
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bar chart (gender counts)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, table: &FrequencyTable) {
    let counts = table.sorted_by_count();

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            Bar::new(i as f64, *count as f64)
                .name(value.to_string())
                .fill(BAR_COLORS[i % BAR_COLORS.len()])
                .width(0.6)
        })
        .collect();

    Plot::new("gender_bars")
        .height(ui.available_height() * 0.65)
        .x_axis_label("Gender")
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Count"));
            for (i, (value, _)) in counts.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, 0.0), value.to_string())
                        .anchor(Align2::CENTER_TOP),
                );
            }
        });

    ui.add_space(6.0);
    frequency_table(ui, table);
}

fn frequency_table(ui: &mut Ui, table: &FrequencyTable) {
    let counts = table.sorted_by_count();
    let shares = table.shares();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(table.column.as_str());
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for ((value, count), (_, percent)) in counts.iter().zip(&shares) {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(value.to_string());
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{percent:.1}%"));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Line chart (screen time by age)
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, agg: &GroupAggregate) {
    let points = agg.points();

    Plot::new("screen_time_by_age")
        .legend(Legend::default())
        .x_axis_label(agg.group_column.as_str())
        .y_axis_label("Avg Daily Screen Time (hrs)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&agg.value_column)
                    .color(SKY_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(&agg.value_column)
                    .color(SKY_BLUE)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();

    Plot::new("correlation_heatmap")
        .height(ui.available_height() * 0.65)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_x(-4.0)
        .include_x(n as f64)
        .include_y(2.0)
        .include_y(-(n as f64))
        .show(ui, |plot_ui| {
            for i in 0..n {
                for j in 0..n {
                    let coefficient = matrix.get(i, j);
                    let fill = coefficient.value().map(coolwarm).unwrap_or(UNDEFINED_CELL);
                    let (x, y) = (j as f64, -(i as f64));
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]))
                        .fill_color(fill)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(coefficient.to_string()).color(Color32::BLACK),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
            }

            for (k, name) in matrix.columns().iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(-0.6, -(k as f64)), name.as_str())
                        .anchor(Align2::RIGHT_CENTER),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(k as f64, 0.6 + 0.4 * (k % 2) as f64), name.as_str())
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    ui.add_space(6.0);
    correlation_table(ui, matrix);
}

fn correlation_table(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(60.0), n)
        .header(20.0, |mut header| {
            header.col(|_ui| {});
            for name in matrix.columns() {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|mut body| {
            for (i, name) in matrix.columns().iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(name.as_str());
                    });
                    for j in 0..n {
                        row.col(|ui| {
                            ui.label(matrix.get(i, j).to_string());
                        });
                    }
                });
            }
        });
}
