use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{AxisBounds, AxisScaler, FrameError, FrameSeries, Layout};

/// Longest accepted time between rendered steps (one hour).
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

// ---------------------------------------------------------------------------
// Parser options
// ---------------------------------------------------------------------------

/// Closed interval used to build a linspace x-axis for marker files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRange {
    pub min: f64,
    pub max: f64,
}

/// Everything the [`FrameParser`](crate::data::FrameParser) needs to know
/// about the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub layout: Layout,
    /// Rows (tabular) or samples (marker / blocked) per frame.
    pub samples_per_frame: Option<usize>,
    /// channel name → zero-based column; columns 0 and 1 are time and position.
    pub channels: Option<BTreeMap<String, usize>>,
    pub marker_tag: String,
    /// Name given to the single data channel of a marker file.
    pub marker_channel: String,
    /// Lines containing this token are skipped in blocked files.
    pub header_token: String,
    pub grid: Option<GridRange>,
    /// Reject blocks whose rows disagree on the time column.
    pub strict_block_time: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Auto,
            samples_per_frame: None,
            channels: None,
            marker_tag: "FRAME".to_string(),
            marker_channel: "u".to_string(),
            header_token: "Tiempo".to_string(),
            grid: None,
            strict_block_time: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Display options
// ---------------------------------------------------------------------------

/// How a panel's y-axis is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AxisMode {
    /// Computed once from the whole series.
    #[default]
    Auto,
    /// Fixed by the user.
    Fixed { min: f64, max: f64 },
}

impl AxisMode {
    /// Display bounds for a group of channels sharing an axis.
    pub fn resolve(
        &self,
        series: &FrameSeries,
        channels: &[String],
    ) -> Result<AxisBounds, FrameError> {
        match *self {
            AxisMode::Auto => AxisScaler::new(series).shared_bounds(channels),
            AxisMode::Fixed { min, max } => {
                for c in channels {
                    if !series.has_channel(c) {
                        return Err(FrameError::UnknownChannel(c.clone()));
                    }
                }
                Ok(AxisBounds::new(min, max).unwrap_or_default().padded())
            }
        }
    }
}

/// One chart: the channels drawn on it share a y-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub channels: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub axis: AxisMode,
}

/// Static overlay of several timesteps of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Defaults to the series' first channel.
    pub channel: Option<String>,
    /// Number of timesteps drawn besides the initial one.
    pub count: usize,
    /// Seeded random selection instead of even spacing.
    pub seed: Option<u64>,
    /// Explicit frame indices; wins over `count` / `seed`.
    pub indices: Option<Vec<usize>>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            channel: None,
            count: 10,
            seed: None,
            indices: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ReplayConfig – the whole run
// ---------------------------------------------------------------------------

/// Configuration of one replay run, loadable from JSON.
///
/// ```json
/// {
///   "input": "datos_simulacion.txt",
///   "samples_per_frame": 200,
///   "interval_ms": 50,
///   "panels": [
///     { "channels": ["E", "Ex", "Ey"], "label": "Electric field" },
///     { "channels": ["H"], "axis": { "mode": "fixed", "min": -1.0, "max": 1.0 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub input: Option<PathBuf>,
    #[serde(flatten)]
    pub parser: ParserConfig,
    /// Render at most this many frames (preview).
    pub frames: Option<usize>,
    /// Time between rendered steps.
    pub interval_ms: u64,
    /// Export frame rate; derived from `interval_ms` when absent.
    pub fps: Option<u32>,
    /// Empty means one panel with every channel.
    pub panels: Vec<PanelConfig>,
    /// Overrides the axis of every panel when set.
    pub axis: Option<AxisMode>,
    pub width: u32,
    pub height: u32,
    pub output: Option<PathBuf>,
    pub snapshot: SnapshotConfig,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input: None,
            parser: ParserConfig::default(),
            frames: None,
            interval_ms: 50,
            fps: None,
            panels: Vec::new(),
            axis: None,
            width: 800,
            height: 600,
            output: None,
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl ReplayConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ReplayConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject option combinations that can never produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            bail!("interval_ms must be positive");
        }
        if self.interval_ms > MAX_INTERVAL_MS {
            bail!("interval_ms {} exceeds {MAX_INTERVAL_MS}", self.interval_ms);
        }
        if self.fps == Some(0) {
            bail!("fps must be positive");
        }
        if self.parser.samples_per_frame == Some(0) {
            bail!("samples_per_frame must be positive");
        }
        if self.frames == Some(0) {
            bail!("frames must be positive");
        }
        if self.width < 64 || self.height < 64 {
            bail!("image size {}x{} is too small", self.width, self.height);
        }
        if let Some(AxisMode::Fixed { min, max }) = self.axis {
            if AxisBounds::new(min, max).is_none() {
                bail!("fixed axis min {min} must not exceed max {max}");
            }
        }
        for (i, panel) in self.panels.iter().enumerate() {
            if panel.channels.is_empty() {
                bail!("panel {i} has no channels");
            }
            if let AxisMode::Fixed { min, max } = panel.axis {
                if AxisBounds::new(min, max).is_none() {
                    bail!("panel {i}: fixed axis min {min} must not exceed max {max}");
                }
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    /// Time each exported animation frame stays on screen: `1 / fps` when
    /// `fps` is set, else the playback interval itself.
    pub fn frame_delay(&self) -> Duration {
        match self.fps {
            Some(fps) => Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            None => self.interval(),
        }
    }

    /// Configured panels, or a single panel with every channel, with the
    /// global `axis` override applied.
    pub fn panels_for(&self, series: &FrameSeries) -> Vec<PanelConfig> {
        let mut panels = if self.panels.is_empty() {
            vec![PanelConfig {
                channels: series.channel_names().to_vec(),
                label: None,
                axis: AxisMode::Auto,
            }]
        } else {
            self.panels.clone()
        };
        if let Some(axis) = self.axis {
            for panel in &mut panels {
                panel.axis = axis;
            }
        }
        panels
    }
}
