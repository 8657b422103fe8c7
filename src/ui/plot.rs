use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::SERIES_COLORS;
use crate::data::model::ChartData;
use crate::state::ChartStatus;

const UNIT: &str = "GtCO₂";

// ---------------------------------------------------------------------------
// Emissions chart (central panel, Analytics page)
// ---------------------------------------------------------------------------

/// Render the two-series chart and its data table.
pub fn emissions_chart(ui: &mut Ui, status: &ChartStatus) {
    let Some(chart) = status.chart() else {
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Loading…");
        });
        return;
    };

    line_plot(ui, chart);
    ui.add_space(8.0);
    data_table(ui, chart);
}

fn line_plot(ui: &mut Ui, chart: &ChartData) {
    Plot::new("emissions_plot")
        .legend(Legend::default())
        .height(360.0)
        .x_axis_label("Year")
        .y_axis_label(format!("Emissions ({UNIT})"))
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .y_axis_formatter(|mark, _range| format!("{:.2}", mark.value))
        .label_formatter(|name, point| {
            if name.is_empty() {
                format!("Year: {:.0}", point.x)
            } else {
                format!("Year: {:.0}\n{name}: {:.2} {UNIT}", point.x, point.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let series = chart.series.labels().iter().zip(SERIES_COLORS);
            for (i, (label, color)) in series.enumerate() {
                // Nulls are dropped, so the line joins the surrounding years.
                let points = chart.series_points(i);

                let line = Line::new(PlotPoints::from(points.clone()))
                    .name(label)
                    .color(color)
                    .width(2.0);
                plot_ui.line(line);

                let markers = Points::new(PlotPoints::from(points))
                    .name(label)
                    .color(color)
                    .radius(3.0);
                plot_ui.points(markers);
            }
        });
}

fn data_table(ui: &mut Ui, chart: &ChartData) {
    let labels = chart.series.labels();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(100.0), labels.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Year");
            });
            for label in labels {
                header.col(|ui| {
                    ui.strong(format!("{label} ({UNIT})"));
                });
            }
        })
        .body(|mut body| {
            for row in &chart.rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.year.to_string());
                    });
                    for value in row.values {
                        table_row.col(|ui| {
                            ui.label(format_cell(value));
                        });
                    }
                });
            }
        });
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
    }
}
