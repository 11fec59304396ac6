use super::error::FrameError;
use super::model::FrameSeries;

/// Relative margin applied around a constant channel value.
const DEGENERATE_MARGIN: f64 = 0.05;
/// Absolute margin used when the constant value is (near) zero.
const DEGENERATE_FLOOR: f64 = 1e-3;

// ---------------------------------------------------------------------------
// AxisBounds
// ---------------------------------------------------------------------------

/// A closed display range `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// Fails (returns `None`) when `min > max` or either end is not finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min <= max).then_some(AxisBounds { min, max })
    }

    /// Min/max over the finite values of an iterator.
    ///
    /// NaN and infinities are skipped; `None` when nothing finite is left.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<AxisBounds>, v| {
                Some(match acc {
                    Some(b) => AxisBounds {
                        min: b.min.min(v),
                        max: b.max.max(v),
                    },
                    None => AxisBounds { min: v, max: v },
                })
            })
    }

    /// Smallest range containing both.
    pub fn union(self, other: AxisBounds) -> AxisBounds {
        AxisBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Widen a single-point range so a chart never gets a zero-height axis.
    ///
    /// Non-degenerate ranges are returned unchanged.
    pub fn padded(self) -> AxisBounds {
        if !self.is_degenerate() {
            return self;
        }
        let margin = (self.min.abs() * DEGENERATE_MARGIN).max(DEGENERATE_FLOOR);
        AxisBounds {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        AxisBounds {
            min: -1.0,
            max: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AxisScaler – fixed display ranges for a whole playback
// ---------------------------------------------------------------------------

/// Derives display bounds from a series once, before the first render.
///
/// The returned ranges are always usable by a chart: degenerate ranges are
/// padded and channels without any finite sample fall back to `[-1, 1]`.
pub struct AxisScaler<'a> {
    series: &'a FrameSeries,
}

impl<'a> AxisScaler<'a> {
    pub fn new(series: &'a FrameSeries) -> Self {
        Self { series }
    }

    /// Display bounds of a single channel.
    pub fn bounds(&self, channel: &str) -> Result<AxisBounds, FrameError> {
        self.shared_bounds(&[channel])
    }

    /// One range covering several channels (min of mins, max of maxes), so
    /// e.g. a total field and its components share a y-axis.
    pub fn shared_bounds<S: AsRef<str>>(&self, channels: &[S]) -> Result<AxisBounds, FrameError> {
        let mut combined: Option<AxisBounds> = None;
        for channel in channels {
            let channel = channel.as_ref();
            if !self.series.has_channel(channel) {
                return Err(FrameError::UnknownChannel(channel.to_string()));
            }
            if let Some(b) = self.series.bounds(channel) {
                combined = Some(combined.map_or(b, |c| c.union(b)));
            }
        }
        Ok(combined.map(AxisBounds::padded).unwrap_or_default())
    }

    /// Display bounds of the spatial grid (x-axis).
    pub fn grid_bounds(&self) -> AxisBounds {
        self.series
            .grid_bounds()
            .map(AxisBounds::padded)
            .unwrap_or_default()
    }
}
