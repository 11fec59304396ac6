//! # field-replay
//!
//! Replays time-stepped 1-D field simulations (wave amplitude, electric and
//! magnetic field components) from the text dumps a simulation writes.
//!
//! Pipeline:
//! - [`data`]: parse a tabular, marker or blocked dump into a validated
//!   [`FrameSeries`], compute fixed [`AxisBounds`] for the whole run
//! - [`render`]: per-channel drawables bound to one frame index at a time
//! - [`playback`]: strictly forward, single-pass walk over frame indices
//! - [`export`]: GIF animation, PNG frames, overlay snapshot
//! - [`app`]: the viewer window
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use field_replay::{config::ReplayConfig, data, export, PlaybackDriver};
//!
//! let config = ReplayConfig::load("replay.json".as_ref())?;
//! let series = Arc::new(data::load_file("datos_simulacion.txt".as_ref(), &config.parser)?);
//! let mut driver = PlaybackDriver::from_config(series, &config)?;
//! export::export_animation(&mut driver, "fields.gif".as_ref(), (800, 600), config.frame_delay())?;
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod playback;
pub mod render;
pub mod state;
pub mod ui;

pub use config::{AxisMode, PanelConfig, ParserConfig, ReplayConfig};
pub use data::{AxisBounds, AxisScaler, Frame, FrameError, FrameParser, FrameSeries, Layout};
pub use playback::{PlaybackDriver, PlaybackState};
pub use render::Renderer;
