use eframe::egui;

use crate::config::AppConfig;
use crate::data::loader::spawn_fetch;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GreenPathApp {
    pub state: AppState,
}

impl GreenPathApp {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(config.dataset_path.clone()),
        }
    }

    /// Start a background load if one was requested this frame.
    fn drive_loading(&mut self, ctx: &egui::Context) {
        if self.state.take_reload_request() {
            let rx = spawn_fetch(self.state.dataset_path.clone(), ctx.clone());
            self.state.begin_load(rx);
        }
        self.state.poll_load();
    }
}

impl eframe::App for GreenPathApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_loading(ctx);

        // ---- Top panel: navigation ----
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            panels::nav_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => panels::home_page(ui),
            Page::Categories => panels::categories_page(ui, &mut self.state),
            Page::Analytics => {
                panels::analytics_header(ui, &mut self.state);
                plot::emissions_chart(ui, &self.state.chart);
            }
            Page::Chat => panels::chat_page(ui),
        });
    }
}
