//! Off-screen chart drawing with plotters into an RGB buffer.

use anyhow::{Context, Result};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{Panel, Renderer};
use crate::color::{generate_palette, Rgb};
use crate::data::{AxisBounds, AxisScaler, FrameSeries};

const FONT: &str = "sans-serif";
const HEADER_HEIGHT: i32 = 32;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

/// Allocate a white RGB buffer, let `draw` paint into it, and wrap it as an image.
fn paint<F>(size: (u32, u32), draw: F) -> Result<RgbImage>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    RgbImage::from_raw(width, height, buffer).context("chart buffer has the wrong size")
}

// ---------------------------------------------------------------------------
// Animation frame
// ---------------------------------------------------------------------------

/// Draw the renderer's current state: time label on top, panels stacked below.
pub fn frame_image(renderer: &Renderer, size: (u32, u32)) -> Result<RgbImage> {
    paint(size, |root| {
        let (header, body) = root.split_vertically(HEADER_HEIGHT);
        header.draw_text(
            renderer.time_label(),
            &(FONT, 20).into_font().color(&BLACK),
            (12, 8),
        )?;

        let areas = body.split_evenly((renderer.panels().len().max(1), 1));
        for (area, panel) in areas.iter().zip(renderer.panels()) {
            draw_panel(area, panel, renderer.x_bounds())?;
        }
        Ok(())
    })
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    x: AxisBounds,
) -> Result<()> {
    let y = panel.y_bounds;
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60);
    if let Some(label) = &panel.label {
        builder.caption(label, (FONT, 16));
    }
    let mut chart = builder.build_cartesian_2d(x.min..x.max, y.min..y.max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()?;

    for trace in &panel.traces {
        let color = rgb(trace.color);
        chart
            .draw_series(LineSeries::new(
                trace.points.iter().copied().filter(|(_, v)| v.is_finite()),
                color.stroke_width(2),
            ))?
            .label(trace.channel.as_str())
            .legend(move |(px, py)| PathElement::new(vec![(px, py), (px + 20, py)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Static overlay
// ---------------------------------------------------------------------------

/// Draw several timesteps of one channel on a single chart, one colour each.
///
/// Index 0 is labelled as the initial state, the others by their time.
pub fn overlay_image(
    series: &FrameSeries,
    channel: &str,
    indices: &[usize],
    y_bounds: AxisBounds,
    size: (u32, u32),
) -> Result<RgbImage> {
    let x = AxisScaler::new(series).grid_bounds();
    let colors = generate_palette(indices.len());

    paint(size, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(channel, (FONT, 22))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(x.min..x.max, y_bounds.min..y_bounds.max)?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc(channel)
            .draw()?;

        for (&index, &c) in indices.iter().zip(&colors) {
            let frame = series.frame(index)?;
            let samples = frame
                .channel(channel)
                .with_context(|| format!("frame {index} has no channel '{channel}'"))?;
            let label = if index == 0 {
                "initial state".to_string()
            } else {
                format!("t={}", frame.timestamp)
            };
            let color = rgb(c);
            chart
                .draw_series(LineSeries::new(
                    series
                        .grid()
                        .iter()
                        .copied()
                        .zip(samples.iter().copied())
                        .filter(|(_, v)| v.is_finite()),
                    color.stroke_width(1),
                ))?
                .label(label)
                .legend(move |(px, py)| PathElement::new(vec![(px, py), (px + 20, py)], color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}
