use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::FrameSeries;

/// Header name of the time column.
const TIME_COLUMN: &str = "t";
/// Header name of the position column.
const POSITION_COLUMN: &str = "X";

/// Write a series as a tabular dump: one header line, then one
/// `time position ch…` row per sample, frames back to back.
///
/// Values use Rust's shortest round-trip float formatting, so re-parsing the
/// output with `samples_per_frame = series.sample_count()` reproduces the
/// series exactly.
pub fn write_tabular<W: Write>(series: &FrameSeries, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(out);

    let mut header = vec![TIME_COLUMN.to_string(), POSITION_COLUMN.to_string()];
    header.extend(series.channel_names().iter().cloned());
    writer.write_record(&header).context("writing header")?;

    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for frame in series.frames() {
        let channels: Vec<&[f64]> = series
            .channel_names()
            .iter()
            .filter_map(|name| frame.channel(name))
            .collect();

        for (i, x) in series.grid().iter().enumerate() {
            record.clear();
            record.push(frame.timestamp.to_string());
            record.push(x.to_string());
            record.extend(channels.iter().map(|samples| samples[i].to_string()));
            writer
                .write_record(&record)
                .with_context(|| format!("writing frame {} sample {i}", frame.index))?;
        }
    }

    writer.flush().context("flushing tabular output")?;
    Ok(())
}

/// [`write_tabular`] into a file.
pub fn write_tabular_file(series: &FrameSeries, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_tabular(series, std::io::BufWriter::new(file))?;
    log::info!("Wrote {} frames to {}", series.len(), path.display());
    Ok(())
}
