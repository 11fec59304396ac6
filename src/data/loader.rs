use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::FrameError;
use super::model::{Frame, FrameSeries};
use crate::config::{GridRange, ParserConfig};

/// Relative tolerance when comparing a frame's positions to the grid.
const GRID_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a frame series from a text dump.
///
/// The layout is taken from `config.layout`; `Layout::Auto` sniffs it from
/// the file content.
pub fn load_file(path: &Path, config: &ParserConfig) -> Result<FrameSeries> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let parser = FrameParser::new(config.clone());
    let series = parser
        .parse_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Loaded {} frames x {} samples, channels {:?} from {}",
        series.len(),
        series.sample_count(),
        series.channel_names(),
        path.display()
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// Layout selector
// ---------------------------------------------------------------------------

/// How frames are laid out in the input text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Decide from the content.
    #[default]
    Auto,
    /// One header line, then `time position ch…` rows, K rows per frame.
    Tabular,
    /// `FRAME n` marker lines, each followed by whitespace-separated samples.
    Marker,
    /// Blank-line separated blocks of `time position ch…` rows.
    Blocked,
}

impl Layout {
    /// Guess the layout from the text.
    ///
    /// * first non-blank line starts with the marker tag → `Marker`
    /// * a blank line separates two runs of data lines → `Blocked`
    /// * otherwise → `Tabular`
    pub fn sniff(text: &str, marker_tag: &str) -> Layout {
        let mut lines = text.lines().map(str::trim).skip_while(|l| l.is_empty());

        let Some(first) = lines.next() else {
            return Layout::Tabular;
        };
        if first.split_whitespace().next() == Some(marker_tag) {
            return Layout::Marker;
        }

        let mut seen_blank = false;
        for line in lines {
            if line.is_empty() {
                seen_blank = true;
            } else if seen_blank {
                return Layout::Blocked;
            }
        }
        Layout::Tabular
    }
}

// ---------------------------------------------------------------------------
// FrameParser – picks a strategy and runs it
// ---------------------------------------------------------------------------

/// One parsing strategy per layout.
pub trait LayoutParser {
    fn parse(&self, text: &str) -> Result<FrameSeries, FrameError>;
}

/// Parses a text dump into a validated [`FrameSeries`].
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    config: ParserConfig,
}

impl FrameParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The layout that `parse_str` would use for this text.
    pub fn resolve_layout(&self, text: &str) -> Layout {
        match self.config.layout {
            Layout::Auto => Layout::sniff(text, &self.config.marker_tag),
            fixed => fixed,
        }
    }

    pub fn parse_str(&self, text: &str) -> Result<FrameSeries, FrameError> {
        if text.trim().is_empty() {
            return Err(FrameError::EmptyInput);
        }
        let layout = self.resolve_layout(text);
        log::debug!("Parsing input as {layout:?} layout");

        match layout {
            Layout::Marker => MarkerParser::new(&self.config).parse(text),
            Layout::Blocked => BlockedParser::new(&self.config).parse(text),
            Layout::Tabular | Layout::Auto => TabularParser::new(&self.config).parse(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Tabular layout
// ---------------------------------------------------------------------------

/// ```text
/// Tiempo X E Ex Ey H          ← exactly one header line
/// 0 0.000 0.1 0.1 0.0 0.02    ← K rows per frame
/// 0 0.005 0.2 0.1 0.1 0.03
/// …
/// ```
///
/// Rows are grouped by count. When `samples_per_frame` is not configured, K
/// is the number of rows before the position column returns to its first
/// value. Time is not used for this since frames may share a timestamp.
pub struct TabularParser<'a> {
    config: &'a ParserConfig,
}

impl<'a> TabularParser<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }
}

impl LayoutParser for TabularParser<'_> {
    fn parse(&self, text: &str) -> Result<FrameSeries, FrameError> {
        let mut lines = numbered_lines(text);
        let header: Vec<&str> = lines
            .next()
            .map(|(_, l)| l.split_whitespace().collect())
            .unwrap_or_default();

        let mut reader = RowReader::default();
        for (line_no, line) in lines {
            if !line.is_empty() {
                reader.push(line_no, line)?;
            }
        }
        let (width, rows) = reader.finish()?;
        let channels =
            resolve_channels(self.config, Some(header.as_slice()), width, rows[0].line)?;

        let per_frame = match self.config.samples_per_frame {
            Some(k) => k,
            None => infer_rows_per_frame(&rows),
        };
        if per_frame == 0 || rows.len() % per_frame != 0 {
            return Err(FrameError::FrameSizeMismatch {
                frame: rows.len().checked_div(per_frame).unwrap_or(0),
                expected: per_frame,
                found: rows.len().checked_rem(per_frame).unwrap_or(rows.len()),
            });
        }

        let groups: Vec<&[Row]> = rows.chunks(per_frame).collect();
        assemble_frames(&groups, &channels, per_frame, false)
    }
}

// ---------------------------------------------------------------------------
// Blocked layout
// ---------------------------------------------------------------------------

/// ```text
/// Tiempo X E Ex Ey H          ← any line containing the header token is skipped
/// 0 0.000 0.1 0.1 0.0 0.02
/// 0 0.005 0.2 0.1 0.1 0.03
///                             ← blank line closes the block (one frame)
/// 0.01 0.000 0.1 …
/// ```
pub struct BlockedParser<'a> {
    config: &'a ParserConfig,
}

impl<'a> BlockedParser<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }
}

impl LayoutParser for BlockedParser<'_> {
    fn parse(&self, text: &str) -> Result<FrameSeries, FrameError> {
        let token = self.config.header_token.as_str();
        let mut header: Option<Vec<&str>> = None;
        let mut reader = RowReader::default();
        // Row ranges [start, end) of each block inside the reader.
        let mut blocks: Vec<(usize, usize)> = Vec::new();
        let mut block_start = 0;

        for (line_no, line) in numbered_lines(text) {
            if line.is_empty() {
                if reader.len() > block_start {
                    blocks.push((block_start, reader.len()));
                    block_start = reader.len();
                }
            } else if !token.is_empty() && line.contains(token) {
                header.get_or_insert_with(|| line.split_whitespace().collect());
            } else {
                reader.push(line_no, line)?;
            }
        }
        if reader.len() > block_start {
            blocks.push((block_start, reader.len()));
        }

        let (width, rows) = reader.finish()?;
        let channels = resolve_channels(self.config, header.as_deref(), width, rows[0].line)?;

        let expected = self
            .config
            .samples_per_frame
            .unwrap_or(blocks[0].1 - blocks[0].0);
        let groups: Vec<&[Row]> = blocks.iter().map(|&(s, e)| &rows[s..e]).collect();
        assemble_frames(&groups, &channels, expected, self.config.strict_block_time)
    }
}

// ---------------------------------------------------------------------------
// Marker layout
// ---------------------------------------------------------------------------

/// ```text
/// FRAME 0
/// 0.000000 0.000012 0.000340 …
///
/// FRAME 1
/// …
/// ```
///
/// Samples may span several lines; a frame ends at the next marker or at the
/// end of input. The marker's number is the frame time.
pub struct MarkerParser<'a> {
    config: &'a ParserConfig,
}

impl<'a> MarkerParser<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }

    fn parse_marker(&self, line_no: usize, line: &str, ordinal: usize) -> Result<f64, FrameError> {
        match line.split_whitespace().nth(1) {
            Some(tok) => parse_number(tok, line_no),
            None => Ok(ordinal as f64),
        }
    }
}

impl LayoutParser for MarkerParser<'_> {
    fn parse(&self, text: &str) -> Result<FrameSeries, FrameError> {
        let tag = self.config.marker_tag.as_str();
        // (time, samples) per marker, in order of appearance.
        let mut pending: Vec<(f64, Vec<f64>)> = Vec::new();

        for (line_no, line) in numbered_lines(text) {
            if line.is_empty() {
                continue;
            }
            if line.split_whitespace().next() == Some(tag) {
                let time = self.parse_marker(line_no, line, pending.len())?;
                pending.push((time, Vec::new()));
                continue;
            }
            let Some((_, samples)) = pending.last_mut() else {
                return Err(FrameError::malformed(
                    line_no,
                    format!("data before the first '{tag}' marker"),
                ));
            };
            for tok in line.split_whitespace() {
                samples.push(parse_number(tok, line_no)?);
            }
        }

        if pending.is_empty() {
            return Err(FrameError::EmptyInput);
        }

        let expected = self
            .config
            .samples_per_frame
            .unwrap_or(pending[0].1.len());
        let name = self.config.marker_channel.clone();

        let mut frames = Vec::with_capacity(pending.len());
        for (index, (timestamp, samples)) in pending.into_iter().enumerate() {
            if samples.len() != expected {
                return Err(FrameError::FrameSizeMismatch {
                    frame: index,
                    expected,
                    found: samples.len(),
                });
            }
            frames.push(Frame {
                index,
                timestamp,
                channels: BTreeMap::from([(name.clone(), samples)]),
            });
        }

        let grid = match self.config.grid {
            Some(range) => linspace(range, expected),
            None => (0..expected).map(|i| i as f64).collect(),
        };
        FrameSeries::new(grid, vec![name], frames)
    }
}

// ---------------------------------------------------------------------------
// Shared row handling (tabular + blocked)
// ---------------------------------------------------------------------------

/// One `time position v2 v3 …` line.
#[derive(Debug, Clone)]
struct Row {
    line: usize,
    time: f64,
    position: f64,
    values: Vec<f64>,
}

/// Collects rows and checks they all have the same column count.
#[derive(Default)]
struct RowReader {
    width: Option<usize>,
    rows: Vec<Row>,
}

impl RowReader {
    fn push(&mut self, line_no: usize, line: &str) -> Result<(), FrameError> {
        let fields = line
            .split_whitespace()
            .map(|tok| parse_number(tok, line_no))
            .collect::<Result<Vec<f64>, FrameError>>()?;

        let width = *self.width.get_or_insert(fields.len());
        if fields.len() != width {
            return Err(FrameError::malformed(
                line_no,
                format!("expected {width} columns, found {}", fields.len()),
            ));
        }
        if width < 3 {
            return Err(FrameError::malformed(
                line_no,
                "need at least time, position and one channel column",
            ));
        }

        self.rows.push(Row {
            line: line_no,
            time: fields[0],
            position: fields[1],
            values: fields,
        });
        Ok(())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn finish(self) -> Result<(usize, Vec<Row>), FrameError> {
        match self.width {
            Some(width) if !self.rows.is_empty() => Ok((width, self.rows)),
            _ => Err(FrameError::EmptyInput),
        }
    }
}

/// Map channel names to row columns.
///
/// An explicit mapping wins; otherwise names come from a header with one
/// token per column, falling back to `ch2`, `ch3`, ….
fn resolve_channels(
    config: &ParserConfig,
    header: Option<&[&str]>,
    width: usize,
    first_line: usize,
) -> Result<Vec<(String, usize)>, FrameError> {
    if let Some(mapping) = &config.channels {
        let mut channels: Vec<(String, usize)> =
            mapping.iter().map(|(n, &c)| (n.clone(), c)).collect();
        channels.sort_by_key(|&(_, c)| c);
        if let Some((name, col)) = channels.iter().find(|&&(_, c)| c < 2 || c >= width) {
            return Err(FrameError::malformed(
                first_line,
                format!("channel '{name}' maps to column {col}, rows have columns 2..{width}"),
            ));
        }
        if channels.is_empty() {
            return Err(FrameError::malformed(first_line, "channel mapping is empty"));
        }
        return Ok(channels);
    }

    let names: Vec<String> = match header {
        Some(tokens) if tokens.len() == width => {
            tokens[2..].iter().map(|t| t.to_string()).collect()
        }
        _ => (2..width).map(|c| format!("ch{c}")).collect(),
    };

    let mut channels: Vec<(String, usize)> = Vec::with_capacity(names.len());
    for (offset, name) in names.into_iter().enumerate() {
        let col = offset + 2;
        let name = if channels.iter().any(|(n, _)| *n == name) {
            format!("{name}_{col}")
        } else {
            name
        };
        channels.push((name, col));
    }
    Ok(channels)
}

/// Turn row groups (one per frame) into a validated series.
fn assemble_frames(
    groups: &[&[Row]],
    channels: &[(String, usize)],
    expected: usize,
    strict_time: bool,
) -> Result<FrameSeries, FrameError> {
    let grid: Vec<f64> = groups
        .first()
        .ok_or(FrameError::EmptyInput)?
        .iter()
        .map(|r| r.position)
        .collect();

    let mut frames = Vec::with_capacity(groups.len());
    for (index, rows) in groups.iter().enumerate() {
        if rows.len() != expected {
            return Err(FrameError::FrameSizeMismatch {
                frame: index,
                expected,
                found: rows.len(),
            });
        }

        // First row's time is authoritative for the whole frame.
        let timestamp = rows[0].time;
        if strict_time {
            if let Some(r) = rows.iter().find(|r| r.time != timestamp) {
                return Err(FrameError::InconsistentBlockTime {
                    line: r.line,
                    expected: timestamp,
                    found: r.time,
                });
            }
        }

        if let Some(sample) = rows
            .iter()
            .zip(&grid)
            .position(|(r, &g)| !same_position(r.position, g))
        {
            return Err(FrameError::GridMismatch {
                frame: index,
                sample,
            });
        }

        let channel_map = channels
            .iter()
            .map(|(name, col)| (name.clone(), rows.iter().map(|r| r.values[*col]).collect()))
            .collect();

        frames.push(Frame {
            index,
            timestamp,
            channels: channel_map,
        });
    }

    let names = channels.iter().map(|(n, _)| n.clone()).collect();
    FrameSeries::new(grid, names, frames)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed lines with 1-based line numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()))
}

/// Rows of the first frame: up to the next row back at the starting position.
fn infer_rows_per_frame(rows: &[Row]) -> usize {
    let Some(first) = rows.first() else {
        return 0;
    };
    rows.iter()
        .skip(1)
        .position(|r| same_position(r.position, first.position))
        .map_or(rows.len(), |p| p + 1)
}

fn parse_number(tok: &str, line: usize) -> Result<f64, FrameError> {
    tok.parse::<f64>()
        .map_err(|_| FrameError::malformed(line, format!("'{tok}' is not a number")))
}

fn same_position(a: f64, b: f64) -> bool {
    (a - b).abs() <= GRID_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// `n` evenly spaced points from `range.min` to `range.max` inclusive.
pub fn linspace(range: GridRange, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![range.min],
        _ => {
            let step = (range.max - range.min) / (n - 1) as f64;
            (0..n).map(|i| range.min + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabular_text(header: &str, frames: usize, samples: usize) -> String {
        let mut text = format!("{header}\n");
        for f in 0..frames {
            let t = f as f64 * 0.01;
            for i in 0..samples {
                let x = i as f64 * 0.005;
                let e = (x + t).sin();
                text.push_str(&format!(
                    "{t} {x} {e} {} {} {}\n",
                    e * 0.6,
                    e * 0.8,
                    e * 0.5
                ));
            }
        }
        text
    }

    fn parse(text: &str, config: ParserConfig) -> Result<FrameSeries, FrameError> {
        FrameParser::new(config).parse_str(text)
    }

    #[test]
    fn test_tabular_em_scenario() {
        let text = tabular_text("Tiempo X E Ex Ey H", 2, 200);
        let config = ParserConfig {
            layout: Layout::Tabular,
            samples_per_frame: Some(200),
            ..Default::default()
        };
        let series = parse(&text, config).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.channel_names(), ["E", "Ex", "Ey", "H"]);
        for frame in series.frames() {
            assert_eq!(frame.channels.len(), 4);
            for samples in frame.channels.values() {
                assert_eq!(samples.len(), 200);
            }
        }
        assert_eq!(series.frames()[1].timestamp, 0.01);
    }

    #[test]
    fn test_tabular_row_count_not_multiple() {
        let text = tabular_text("t X E Ex Ey H", 2, 10);
        let config = ParserConfig {
            layout: Layout::Tabular,
            samples_per_frame: Some(7),
            ..Default::default()
        };
        let err = parse(&text, config).unwrap_err();
        assert_eq!(
            err,
            FrameError::FrameSizeMismatch {
                frame: 2,
                expected: 7,
                found: 6
            }
        );
    }

    #[test]
    fn test_tabular_infers_rows_per_frame() {
        let text = tabular_text("t X E Ex Ey H", 3, 25);
        let series = parse(&text, ParserConfig::default()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.sample_count(), 25);
    }

    #[test]
    fn test_tabular_frames_sharing_a_timestamp() {
        let text = "t X E\n0 0 1\n0 1 2\n0 2 3\n0 0 4\n0 1 5\n0 2 6\n";
        let series = parse(text, ParserConfig::default()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.sample_count(), 3);
        assert_eq!(series.frames()[1].channel("E").unwrap(), [4.0, 5.0, 6.0]);
        assert_eq!(series.frames()[1].timestamp, 0.0);
    }

    #[test]
    fn test_tabular_inferred_size_with_short_last_frame() {
        let text = "t X E\n0 0 1\n0 1 2\n1 0 3\n";
        assert_eq!(
            parse(text, ParserConfig::default()).unwrap_err(),
            FrameError::FrameSizeMismatch {
                frame: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_tabular_non_numeric_reports_line() {
        let text = "t X E\n0 0 1.0\n0 1 abc\n";
        let config = ParserConfig {
            layout: Layout::Tabular,
            ..Default::default()
        };
        match parse(text, config).unwrap_err() {
            FrameError::MalformedFrameData { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_tabular_explicit_channel_mapping() {
        let text = tabular_text("t X E Ex Ey H", 1, 4);
        let config = ParserConfig {
            samples_per_frame: Some(4),
            channels: Some(BTreeMap::from([
                ("magnetic".to_string(), 5),
                ("field_total".to_string(), 2),
            ])),
            ..Default::default()
        };
        let series = parse(&text, config).unwrap();
        assert_eq!(series.channel_names(), ["field_total", "magnetic"]);
    }

    #[test]
    fn test_tabular_mapping_out_of_range() {
        let text = tabular_text("t X E Ex Ey H", 1, 4);
        let config = ParserConfig {
            channels: Some(BTreeMap::from([("B".to_string(), 9)])),
            ..Default::default()
        };
        assert!(matches!(
            parse(&text, config),
            Err(FrameError::MalformedFrameData { line: 2, .. })
        ));
    }

    #[test]
    fn test_tabular_header_only_is_empty() {
        let config = ParserConfig {
            layout: Layout::Tabular,
            ..Default::default()
        };
        assert_eq!(parse("t X E\n", config).unwrap_err(), FrameError::EmptyInput);
    }

    #[test]
    fn test_tabular_grid_change_is_rejected() {
        let text = "t X E\n0 0 1\n0 1 2\n1 0 1\n1 5 2\n";
        let config = ParserConfig {
            samples_per_frame: Some(2),
            ..Default::default()
        };
        assert_eq!(
            parse(text, config).unwrap_err(),
            FrameError::GridMismatch {
                frame: 1,
                sample: 1
            }
        );
    }

    #[test]
    fn test_marker_scenario() {
        let text = "FRAME 0\n1 2 3 4 5\nFRAME 1\n1 2 3 4 5\nFRAME 2\n1 2 3 4 5\n";
        let series = parse(text, ParserConfig::default()).unwrap();
        assert_eq!(series.len(), 3);
        for frame in series.frames() {
            assert_eq!(frame.channel("u").unwrap().len(), 5);
        }
    }

    #[test]
    fn test_marker_dangling_block_and_multiline() {
        let text = "FRAME 0\n0.1 0.2\n0.3\n\nFRAME 5\n0.4 0.5 0.6\n\n";
        let series = parse(text, ParserConfig::default()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.frames()[0].channel("u").unwrap(), [0.1, 0.2, 0.3]);
        assert_eq!(series.frames()[1].timestamp, 5.0);
    }

    #[test]
    fn test_marker_nan_time_is_rejected() {
        let text = "FRAME 5\n1 2\nFRAME NaN\n1 2\nFRAME 1\n1 2\n";
        assert!(matches!(
            parse(text, ParserConfig::default()),
            Err(FrameError::NonMonotonicTime { frame: 1, .. })
        ));
    }

    #[test]
    fn test_marker_empty_frame_is_size_mismatch() {
        let text = "FRAME 0\n1 2\nFRAME 1\n";
        assert_eq!(
            parse(text, ParserConfig::default()).unwrap_err(),
            FrameError::FrameSizeMismatch {
                frame: 1,
                expected: 2,
                found: 0
            }
        );
    }

    #[test]
    fn test_marker_data_before_marker() {
        let config = ParserConfig {
            layout: Layout::Marker,
            ..Default::default()
        };
        assert!(matches!(
            parse("1 2 3\nFRAME 0\n1 2 3\n", config),
            Err(FrameError::MalformedFrameData { line: 1, .. })
        ));
    }

    #[test]
    fn test_marker_grid_linspace() {
        let config = ParserConfig {
            grid: Some(GridRange {
                min: -100.0,
                max: 100.0,
            }),
            ..Default::default()
        };
        let series = parse("FRAME 0\n0 0 0 0 0\n", config).unwrap();
        assert_eq!(series.grid(), [-100.0, -50.0, 0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_blocked_layout() {
        let text = "Tiempo X E Ex Ey H\n\
                    0 0 1 2 3 4\n\
                    0 1 1 2 3 4\n\
                    \n\
                    0.5 0 5 6 7 8\n\
                    0.5 1 5 6 7 8\n\
                    \n";
        let parser = FrameParser::new(ParserConfig::default());
        assert_eq!(parser.resolve_layout(text), Layout::Blocked);
        let series = parser.parse_str(text).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.channel_names(), ["E", "Ex", "Ey", "H"]);
        assert_eq!(series.frames()[1].channel("H").unwrap(), [8.0, 8.0]);
        assert_eq!(series.frames()[1].timestamp, 0.5);
    }

    #[test]
    fn test_blocked_size_mismatch() {
        let text = "0 0 1\n0 1 1\n\n1 0 1\n";
        let config = ParserConfig {
            layout: Layout::Blocked,
            ..Default::default()
        };
        assert_eq!(
            parse(text, config).unwrap_err(),
            FrameError::FrameSizeMismatch {
                frame: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_blocked_strict_time() {
        let text = "0 0 1\n0.1 1 1\n\n1 0 1\n1 1 1\n";
        let lenient = ParserConfig {
            layout: Layout::Blocked,
            ..Default::default()
        };
        assert!(parse(text, lenient.clone()).is_ok());

        let strict = ParserConfig {
            strict_block_time: true,
            ..lenient
        };
        assert_eq!(
            parse(text, strict).unwrap_err(),
            FrameError::InconsistentBlockTime {
                line: 2,
                expected: 0.0,
                found: 0.1
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse("  \n\n", ParserConfig::default()).unwrap_err(),
            FrameError::EmptyInput
        );
    }

    #[test]
    fn test_sniff() {
        assert_eq!(Layout::sniff("\nFRAME 0\n1 2\n", "FRAME"), Layout::Marker);
        assert_eq!(Layout::sniff("t X E\n0 0 1\n0 1 2\n\n", "FRAME"), Layout::Tabular);
        assert_eq!(Layout::sniff("t X E\n0 0 1\n\n1 0 2\n", "FRAME"), Layout::Blocked);
    }
}
