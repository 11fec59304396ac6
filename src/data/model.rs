use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::bounds::AxisBounds;
use super::error::FrameError;

// ---------------------------------------------------------------------------
// Frame – one timestep of the simulation
// ---------------------------------------------------------------------------

/// One timestep's measurement set.
///
/// Every channel holds one value per spatial grid point, so all channel
/// vectors have the same length as the owning series' grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Ordinal position inside the series (0-based, dense).
    pub index: usize,
    /// Simulation time of this snapshot.
    pub timestamp: f64,
    /// channel_name → samples along the grid.
    pub channels: BTreeMap<String, Vec<f64>>,
}

impl Frame {
    /// Samples of one channel, if present.
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels.get(name).map(Vec::as_slice)
    }
}

// ---------------------------------------------------------------------------
// FrameSeries – the complete, validated run
// ---------------------------------------------------------------------------

/// An immutable, time-ordered sequence of frames sharing one spatial grid
/// and one channel set.
///
/// Construction validates every structural invariant; afterwards the series
/// is only ever read, so it is shared behind an `Arc` by the renderer and the
/// viewer.
#[derive(Debug, Clone)]
pub struct FrameSeries {
    frames: Vec<Frame>,
    /// Spatial coordinate of each sample (x-axis), fixed for the run.
    grid: Vec<f64>,
    /// Channel names in source column order.
    channel_names: Vec<String>,
    /// Raw per-channel (min, max), computed on first request.
    bounds: OnceLock<BTreeMap<String, AxisBounds>>,
}

impl FrameSeries {
    /// Validate and freeze a sequence of frames.
    ///
    /// `channel_names` fixes the display order; every frame must carry
    /// exactly this channel set with `grid.len()` samples per channel.
    pub fn new(
        grid: Vec<f64>,
        channel_names: Vec<String>,
        frames: Vec<Frame>,
    ) -> Result<Self, FrameError> {
        if frames.is_empty() {
            return Err(FrameError::EmptyInput);
        }

        let expected = grid.len();
        let mut previous_time = f64::NEG_INFINITY;

        for (pos, frame) in frames.iter().enumerate() {
            if frame.index != pos {
                return Err(FrameError::FrameIndexOutOfRange {
                    index: frame.index,
                    len: frames.len(),
                });
            }

            for name in &channel_names {
                let samples = frame
                    .channels
                    .get(name)
                    .ok_or_else(|| FrameError::UnknownChannel(name.clone()))?;
                if samples.len() != expected {
                    return Err(FrameError::FrameSizeMismatch {
                        frame: pos,
                        expected,
                        found: samples.len(),
                    });
                }
            }
            if let Some(extra) = frame
                .channels
                .keys()
                .find(|k| !channel_names.contains(k))
            {
                return Err(FrameError::UnknownChannel(extra.clone()));
            }

            if !frame.timestamp.is_finite() || frame.timestamp < previous_time {
                return Err(FrameError::NonMonotonicTime {
                    frame: pos,
                    previous: previous_time,
                    found: frame.timestamp,
                });
            }
            previous_time = frame.timestamp;
        }

        Ok(FrameSeries {
            frames,
            grid,
            channel_names,
            bounds: OnceLock::new(),
        })
    }

    /// Number of frames (never zero).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, or the renderer-facing out-of-range error.
    pub fn frame(&self, index: usize) -> Result<&Frame, FrameError> {
        self.frames
            .get(index)
            .ok_or(FrameError::FrameIndexOutOfRange {
                index,
                len: self.frames.len(),
            })
    }

    /// Spatial coordinates shared by every frame.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Samples per channel per frame.
    pub fn sample_count(&self) -> usize {
        self.grid.len()
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channel_names.iter().any(|c| c == name)
    }

    /// First and last frame time.
    pub fn time_span(&self) -> (f64, f64) {
        let first = self.frames.first().map_or(0.0, |f| f.timestamp);
        let last = self.frames.last().map_or(0.0, |f| f.timestamp);
        (first, last)
    }

    /// Raw (unpadded) min/max of one channel over every frame.
    ///
    /// All channels are scanned together on the first call and cached for
    /// the lifetime of the series.
    pub fn bounds(&self, channel: &str) -> Option<AxisBounds> {
        self.bounds
            .get_or_init(|| self.scan_bounds())
            .get(channel)
            .copied()
    }

    /// Raw min/max of the spatial grid.
    pub fn grid_bounds(&self) -> Option<AxisBounds> {
        AxisBounds::from_values(self.grid.iter().copied())
    }

    fn scan_bounds(&self) -> BTreeMap<String, AxisBounds> {
        log::debug!(
            "Scanning bounds of {} channels over {} frames",
            self.channel_names.len(),
            self.frames.len()
        );
        self.channel_names
            .iter()
            .filter_map(|name| {
                let values = self
                    .frames
                    .iter()
                    .filter_map(|f| f.channels.get(name))
                    .flat_map(|samples| samples.iter().copied());
                AxisBounds::from_values(values).map(|b| (name.clone(), b))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize, timestamp: f64, u: Vec<f64>) -> Frame {
        Frame {
            index,
            timestamp,
            channels: BTreeMap::from([("u".to_string(), u)]),
        }
    }

    #[test]
    fn test_new_rejects_empty() {
        let result = FrameSeries::new(vec![0.0], vec!["u".into()], Vec::new());
        assert_eq!(result.unwrap_err(), FrameError::EmptyInput);
    }

    #[test]
    fn test_new_rejects_size_mismatch() {
        let frames = vec![frame(0, 0.0, vec![1.0, 2.0]), frame(1, 1.0, vec![1.0])];
        let err = FrameSeries::new(vec![0.0, 1.0], vec!["u".into()], frames).unwrap_err();
        assert_eq!(
            err,
            FrameError::FrameSizeMismatch {
                frame: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_time_going_backwards() {
        let frames = vec![frame(0, 1.0, vec![0.0]), frame(1, 0.5, vec![0.0])];
        let err = FrameSeries::new(vec![0.0], vec!["u".into()], frames).unwrap_err();
        assert!(matches!(err, FrameError::NonMonotonicTime { frame: 1, .. }));
    }

    #[test]
    fn test_new_rejects_non_finite_time() {
        let frames = vec![
            frame(0, 5.0, vec![0.0]),
            frame(1, f64::NAN, vec![0.0]),
            frame(2, 1.0, vec![0.0]),
        ];
        let err = FrameSeries::new(vec![0.0], vec!["u".into()], frames).unwrap_err();
        assert!(matches!(err, FrameError::NonMonotonicTime { frame: 1, .. }));

        let frames = vec![frame(0, f64::INFINITY, vec![0.0])];
        let err = FrameSeries::new(vec![0.0], vec!["u".into()], frames).unwrap_err();
        assert!(matches!(err, FrameError::NonMonotonicTime { frame: 0, .. }));
    }

    #[test]
    fn test_repeated_timestamps_are_legal() {
        let frames = vec![frame(0, 1.0, vec![0.0]), frame(1, 1.0, vec![0.0])];
        assert!(FrameSeries::new(vec![0.0], vec!["u".into()], frames).is_ok());
    }

    #[test]
    fn test_new_rejects_index_gap() {
        let frames = vec![frame(0, 0.0, vec![0.0]), frame(2, 1.0, vec![0.0])];
        let err = FrameSeries::new(vec![0.0], vec!["u".into()], frames).unwrap_err();
        assert!(matches!(err, FrameError::FrameIndexOutOfRange { index: 2, .. }));
    }

    #[test]
    fn test_bounds_cover_every_frame() {
        let frames = vec![
            frame(0, 0.0, vec![0.5, -2.0]),
            frame(1, 0.1, vec![3.0, 0.0]),
        ];
        let series = FrameSeries::new(vec![0.0, 1.0], vec!["u".into()], frames).unwrap();
        let b = series.bounds("u").unwrap();
        assert_eq!(b.min, -2.0);
        assert_eq!(b.max, 3.0);
        assert!(series.bounds("missing").is_none());
    }

    #[test]
    fn test_frame_out_of_range() {
        let series =
            FrameSeries::new(vec![0.0], vec!["u".into()], vec![frame(0, 0.0, vec![1.0])]).unwrap();
        assert_eq!(
            series.frame(5).unwrap_err(),
            FrameError::FrameIndexOutOfRange { index: 5, len: 1 }
        );
    }
}
