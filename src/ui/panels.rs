use chrono::{Datelike, Local};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::catalog::{Category, CATEGORIES};
use crate::data::filter::search;
use crate::state::{AppState, ChartStatus, Page};

// ---------------------------------------------------------------------------
// Navigation bar and footer
// ---------------------------------------------------------------------------

/// Render the brand and one entry per page.
pub fn nav_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("GreenPath").strong().size(18.0));
        ui.separator();

        for page in Page::ALL {
            let active = state.page == page;
            let text = if active {
                RichText::new(page.title()).strong().underline()
            } else {
                RichText::new(page.title())
            };
            if ui.selectable_label(active, text).clicked() {
                state.navigate(page);
            }
        }
    });
}

pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.small(format!("© {} GreenPath", Local::now().year()));
    });
}

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

pub fn home_page(ui: &mut Ui) {
    ui.heading("Welcome to GreenPath");
    ui.add_space(4.0);
    ui.label(
        "Explore sustainable product categories, view emissions analytics, \
         and ask the AI assistant for guidance.",
    );
}

pub fn chat_page(ui: &mut Ui) {
    ui.heading("Chat");
    ui.add_space(4.0);
    ui.label(RichText::new("The assistant is not available yet.").italics());
}

// ---------------------------------------------------------------------------
// Categories page
// ---------------------------------------------------------------------------

pub fn categories_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sustainable Product Categories");
    ui.add_space(8.0);

    ui.label("Search categories");
    ui.add(
        egui::TextEdit::singleline(&mut state.search_query)
            .hint_text("Search…")
            .desired_width(384.0),
    );
    ui.add_space(8.0);

    let found = search(CATEGORIES, &state.search_query);
    if found.is_empty() {
        ui.label(RichText::new("No results.").color(Color32::GRAY));
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for category in found {
                category_card(ui, category);
                ui.add_space(6.0);
            }
        });
}

fn category_card(ui: &mut Ui, category: &Category) {
    ui.push_id(category.id, |ui: &mut Ui| {
        egui::Frame::group(ui.style())
            .inner_margin(12.0)
            .show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(category.name).strong().size(16.0));
                ui.label(category.description);
            });
    });
}

// ---------------------------------------------------------------------------
// Analytics header
// ---------------------------------------------------------------------------

/// Heading, unit line, failure notice, and the reload / open controls.
pub fn analytics_header(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Emissions Analytics");

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Values shown in");
        ui.label(RichText::new("GtCO₂").strong());
        if let Some(msg) = state.chart.notice() {
            ui.label(RichText::new(format!("(Note: {msg})")).color(Color32::RED));
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let idle = !state.is_loading();
        if ui.add_enabled(idle, egui::Button::new("Reload")).clicked() {
            state.request_reload();
        }
        if ui.add_enabled(idle, egui::Button::new("Open CSV…")).clicked() {
            open_file_dialog(state);
        }
        ui.label(
            RichText::new(state.dataset_path.display().to_string())
                .small()
                .color(Color32::GRAY),
        );
    });

    if let ChartStatus::Ready { chart, totals } = &state.chart {
        let caption = chart
            .series
            .labels()
            .iter()
            .map(|label| {
                let total = totals
                    .iter()
                    .find(|(c, _)| c == label)
                    .map(|(_, t)| *t)
                    .unwrap_or(0.0);
                format!("{label} (total {total:.2})")
            })
            .collect::<Vec<_>>()
            .join(", ");
        ui.label(RichText::new(format!("Top sectors: {caption}")).small());
    }

    ui.separator();
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open emissions data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Switching dataset to {}", path.display());
        state.set_dataset_path(path);
    }
}
