use std::time::Instant;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::playback::PlaybackState;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series summary and legend
// ---------------------------------------------------------------------------

/// Render the left info panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Series");
    ui.separator();

    let Some(series) = &state.series else {
        ui.label("No series loaded.");
        return;
    };

    if let Some(path) = &state.source {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ui.label(RichText::new(name).strong());
    }

    let (t0, t1) = series.time_span();
    egui::Grid::new("series_info").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Frames");
        ui.label(series.len().to_string());
        ui.end_row();
        ui.label("Samples");
        ui.label(series.sample_count().to_string());
        ui.end_row();
        ui.label("Time");
        ui.label(format!("{t0:.3} … {t1:.3}"));
        ui.end_row();
    });

    let Some(driver) = &state.driver else {
        return;
    };
    let renderer = driver.renderer();

    ui.add_space(8.0);
    ui.strong("Channels");
    for (name, [r, g, b]) in renderer.palette().legend_entries().iter().cloned() {
        ui.label(RichText::new(format!("━━ {name}")).color(Color32::from_rgb(r, g, b)));
    }

    ui.add_space(8.0);
    ui.strong("Axes");
    let x = renderer.x_bounds();
    ui.label(format!("x: {:.3} … {:.3}", x.min, x.max));
    for (i, panel) in renderer.panels().iter().enumerate() {
        let name = panel
            .label
            .clone()
            .unwrap_or_else(|| format!("panel {}", i + 1));
        ui.label(format!(
            "{name}: {:.3} … {:.3}",
            panel.y_bounds.min, panel.y_bounds.max
        ));
    }

    if driver.skipped() > 0 {
        ui.add_space(8.0);
        ui.label(format!("{} frames skipped (late repaint)", driver.skipped()));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match state.playback_state() {
            Some(PlaybackState::Idle) => {
                if ui.button("▶ Play").clicked() {
                    state.play(Instant::now());
                }
            }
            Some(PlaybackState::Running) | Some(PlaybackState::Finished) => {
                if ui.button("⟲ Restart").clicked() {
                    state.restart(Instant::now());
                }
            }
            None => {
                ui.add_enabled(false, egui::Button::new("▶ Play"));
            }
        }

        if let Some(driver) = &state.driver {
            if let Some(cursor) = driver.cursor() {
                ui.label(format!("frame {} / {}", cursor + 1, driver.frame_count()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open simulation dump")
        .add_filter("Text dumps", &["txt", "dat", "out"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
        if let Some(series) = &state.series {
            log::info!(
                "Opened {} ({} frames, channels {:?})",
                path.display(),
                series.len(),
                series.channel_names()
            );
        }
    }
}
