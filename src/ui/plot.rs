use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Field charts (central panel)
// ---------------------------------------------------------------------------

/// Render the renderer's current frame, one fixed-bounds chart per panel.
pub fn field_plot(ui: &mut Ui, state: &AppState) {
    let Some(driver) = &state.driver else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a simulation dump to replay it  (File → Open…)");
        });
        return;
    };

    let renderer = driver.renderer();
    if renderer.current().is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Press ▶ Play to start");
        });
        return;
    }

    ui.heading(renderer.time_label());

    let panels = renderer.panels();
    let x = renderer.x_bounds();
    let spacing = ui.spacing().item_spacing.y;
    let height =
        ((ui.available_height() - spacing * panels.len() as f32) / panels.len() as f32).max(80.0);

    for (i, panel) in panels.iter().enumerate() {
        let y = panel.y_bounds;
        let mut chart = Plot::new(("field_panel", i))
            .height(height)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false);
        if let Some(label) = &panel.label {
            chart = chart.y_axis_label(label.as_str());
        }

        chart.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x.min, y.min], [x.max, y.max]));
            for trace in &panel.traces {
                let [r, g, b] = trace.color;
                let points: PlotPoints = trace.points.iter().map(|&(px, py)| [px, py]).collect();
                let line = Line::new(points)
                    .name(&trace.channel)
                    .color(Color32::from_rgb(r, g, b))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
    }
}
