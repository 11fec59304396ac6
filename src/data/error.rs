use thiserror::Error;

// ---------------------------------------------------------------------------
// FrameError – structural problems with a frame stream
// ---------------------------------------------------------------------------

/// Everything that can be wrong with the *shape* of an input dump, plus the
/// renderer's index check. None of these are recovered from: the caller gets
/// the error and the run stops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// No frame could be assembled from the input.
    #[error("input contains no frames")]
    EmptyInput,

    /// A token in a data position is not a number, or a row is missing columns.
    #[error("line {line}: {reason}")]
    MalformedFrameData { line: usize, reason: String },

    /// Sample count of a frame disagrees with the spatial grid size.
    #[error("frame {frame}: expected {expected} samples, found {found}")]
    FrameSizeMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },

    /// A frame index outside `[0, len)` reached the renderer.
    #[error("frame index {index} out of range (series has {len} frames)")]
    FrameIndexOutOfRange { index: usize, len: usize },

    /// A panel or snapshot asked for a channel the series does not carry.
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),

    /// Simulation time decreased between two consecutive frames, or is not finite.
    #[error("frame {frame}: time {found} is not finite or precedes previous frame time {previous}")]
    NonMonotonicTime {
        frame: usize,
        previous: f64,
        found: f64,
    },

    /// The position column of a frame differs from the first frame's grid.
    #[error("frame {frame}: position of sample {sample} differs from the first frame's grid")]
    GridMismatch { frame: usize, sample: usize },

    /// A row inside a blank-line block carries a different time than the block's first row.
    #[error("line {line}: block time {found} differs from block start time {expected}")]
    InconsistentBlockTime {
        line: usize,
        expected: f64,
        found: f64,
    },
}

impl FrameError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FrameError::MalformedFrameData {
            line,
            reason: reason.into(),
        }
    }
}
