//! Data layer: frame types, parsing, axis scaling and serialization.
//!
//! Architecture:
//! ```text
//!  tabular / marker / blocked text dump
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  sniff layout, parse → FrameSeries
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  FrameSeries  │  Vec<Frame>, shared grid, cached raw bounds
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  bounds   │  AxisScaler → fixed, padded display ranges
//!   └──────────┘
//! ```
//!
//! `writer` goes the other way and emits a series as a tabular dump.

pub mod bounds;
pub mod error;
pub mod loader;
pub mod model;
pub mod writer;

pub use bounds::{AxisBounds, AxisScaler};
pub use error::FrameError;
pub use loader::{load_file, FrameParser, Layout};
pub use model::{Frame, FrameSeries};
