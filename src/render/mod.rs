//! Frame-indexed drawable state.
//!
//! The [`Renderer`] owns one [`Trace`] per displayed channel. Axis bounds are
//! fixed at construction; [`Renderer::update`] only swaps y-data and the time
//! label, so a step costs O(channels × samples) regardless of series length.
//! Drawing backends (`bitmap` for exports, `ui::plot` for the viewer) read
//! the current state and never mutate it.

pub mod bitmap;

use std::sync::Arc;

use crate::color::{ChannelPalette, Rgb};
use crate::config::PanelConfig;
use crate::data::{AxisBounds, AxisScaler, FrameError, FrameSeries};

// ---------------------------------------------------------------------------
// RenderState
// ---------------------------------------------------------------------------

/// One drawable line: fixed x (the grid), y replaced every step.
#[derive(Debug, Clone)]
pub struct Trace {
    pub channel: String,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// One chart with a shared y-axis.
#[derive(Debug, Clone)]
pub struct Panel {
    pub label: Option<String>,
    pub y_bounds: AxisBounds,
    pub traces: Vec<Trace>,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Holds the mutable per-channel drawables for a read-only series.
#[derive(Debug, Clone)]
pub struct Renderer {
    series: Arc<FrameSeries>,
    x_bounds: AxisBounds,
    panels: Vec<Panel>,
    palette: ChannelPalette,
    time_label: String,
    current: Option<usize>,
}

impl Renderer {
    /// Resolve every panel's axis once and bind traces to the grid.
    ///
    /// Fails with `UnknownChannel` when a panel names a channel the series
    /// does not carry.
    pub fn new(series: Arc<FrameSeries>, layout: &[PanelConfig]) -> Result<Self, FrameError> {
        let palette = ChannelPalette::new(series.channel_names());
        let x_bounds = AxisScaler::new(&series).grid_bounds();

        let panels = layout
            .iter()
            .map(|cfg| {
                let y_bounds = cfg.axis.resolve(&series, &cfg.channels)?;
                let traces = cfg
                    .channels
                    .iter()
                    .map(|channel| Trace {
                        channel: channel.clone(),
                        color: palette.color_for(channel),
                        points: series.grid().iter().map(|&x| (x, 0.0)).collect(),
                    })
                    .collect();
                Ok(Panel {
                    label: cfg.label.clone(),
                    y_bounds,
                    traces,
                })
            })
            .collect::<Result<Vec<_>, FrameError>>()?;

        Ok(Renderer {
            series,
            x_bounds,
            panels,
            palette,
            time_label: String::new(),
            current: None,
        })
    }

    /// Bind the drawables to frame `index`.
    pub fn update(&mut self, index: usize) -> Result<(), FrameError> {
        let frame = self.series.frame(index)?;

        for panel in &mut self.panels {
            for trace in &mut panel.traces {
                let samples = frame
                    .channel(&trace.channel)
                    .ok_or_else(|| FrameError::UnknownChannel(trace.channel.clone()))?;
                for (point, &y) in trace.points.iter_mut().zip(samples) {
                    point.1 = y;
                }
            }
        }

        self.time_label = format!("t = {:.3}", frame.timestamp);
        self.current = Some(index);
        Ok(())
    }

    /// Index of the frame currently bound, `None` before the first update.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn x_bounds(&self) -> AxisBounds {
        self.x_bounds
    }

    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub fn palette(&self) -> &ChannelPalette {
        &self.palette
    }

    pub fn frame_count(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::AxisMode;
    use crate::data::Frame;

    fn series(frames: usize) -> Arc<FrameSeries> {
        let frames = (0..frames)
            .map(|i| Frame {
                index: i,
                timestamp: i as f64 * 0.5,
                channels: BTreeMap::from([
                    ("E".to_string(), vec![i as f64, -(i as f64)]),
                    ("H".to_string(), vec![1.0, 1.0]),
                ]),
            })
            .collect();
        Arc::new(
            FrameSeries::new(vec![0.0, 1.0], vec!["E".into(), "H".into()], frames).unwrap(),
        )
    }

    fn panels() -> Vec<PanelConfig> {
        vec![
            PanelConfig {
                channels: vec!["E".into()],
                label: Some("Electric".into()),
                axis: AxisMode::Auto,
            },
            PanelConfig {
                channels: vec!["H".into()],
                label: None,
                axis: AxisMode::Fixed { min: -2.0, max: 2.0 },
            },
        ]
    }

    #[test]
    fn test_update_replaces_y_data() {
        let mut renderer = Renderer::new(series(3), &panels()).unwrap();
        renderer.update(2).unwrap();
        let trace = &renderer.panels()[0].traces[0];
        assert_eq!(trace.points, vec![(0.0, 2.0), (1.0, -2.0)]);
        assert_eq!(renderer.time_label(), "t = 1.000");
        assert_eq!(renderer.current(), Some(2));
    }

    #[test]
    fn test_bounds_fixed_at_construction() {
        let mut renderer = Renderer::new(series(3), &panels()).unwrap();
        let before = renderer.panels()[0].y_bounds;
        renderer.update(0).unwrap();
        assert_eq!(renderer.panels()[0].y_bounds, before);
        assert_eq!(before, AxisBounds { min: -2.0, max: 2.0 });
        assert_eq!(renderer.panels()[1].y_bounds, AxisBounds { min: -2.0, max: 2.0 });
    }

    #[test]
    fn test_update_out_of_range() {
        let mut renderer = Renderer::new(series(3), &panels()).unwrap();
        assert_eq!(
            renderer.update(5).unwrap_err(),
            FrameError::FrameIndexOutOfRange { index: 5, len: 3 }
        );
        assert_eq!(renderer.current(), None);
    }

    #[test]
    fn test_unknown_panel_channel() {
        let layout = vec![PanelConfig {
            channels: vec!["B".into()],
            label: None,
            axis: AxisMode::Auto,
        }];
        assert_eq!(
            Renderer::new(series(1), &layout).unwrap_err(),
            FrameError::UnknownChannel("B".into())
        );
    }
}
