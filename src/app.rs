use std::time::Instant;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FieldReplayApp {
    pub state: AppState,
}

impl FieldReplayApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FieldReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.tick(now);

        // ---- Top panel: menu bar + playback controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series info + legend ----
        egui::SidePanel::left("info_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: field charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::field_plot(ui, &self.state);
        });

        if let Some(delay) = self.state.next_repaint(Instant::now()) {
            ctx.request_repaint_after(delay);
        }
    }
}
