//! Output artifacts: GIF animation, PNG frame sequence, PNG overlay snapshot.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{AxisMode, SnapshotConfig};
use crate::data::{FrameError, FrameSeries};
use crate::playback::PlaybackDriver;
use crate::render::{bitmap, Renderer};

/// NeuQuant sampling factor: 1 is best quality, 30 fastest.
const GIF_SPEED: i32 = 10;

/// Encode the full playback as a looping GIF, one image per frame index,
/// each shown for `delay`. Returns the number of frames written.
pub fn export_animation(
    driver: &mut PlaybackDriver,
    path: &Path,
    size: (u32, u32),
    delay: Duration,
) -> Result<usize> {
    encode_gif(driver, path, delay, |renderer| bitmap::frame_image(renderer, size))
}

/// GIF encoding with a caller-supplied painter for each rendered frame.
pub fn encode_gif<P>(
    driver: &mut PlaybackDriver,
    path: &Path,
    delay: Duration,
    mut paint: P,
) -> Result<usize>
where
    P: FnMut(&Renderer) -> Result<RgbImage>,
{
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
    encoder
        .set_repeat(Repeat::Infinite)
        .context("configuring GIF looping")?;
    let frame_delay = Delay::from_saturating_duration(delay);

    let written = driver.run(|renderer: &Renderer, index: usize| -> Result<()> {
        let rgba = DynamicImage::ImageRgb8(paint(renderer)?).into_rgba8();
        encoder
            .encode_frame(image::Frame::from_parts(rgba, 0, 0, frame_delay))
            .with_context(|| format!("encoding frame {index}"))?;
        log::trace!("Encoded frame {index}");
        Ok(())
    })?;
    drop(encoder);

    log::info!(
        "Wrote {written} frames, {} ms apart, to {}",
        delay.as_millis(),
        path.display()
    );
    Ok(written)
}

/// Write every frame of the playback as `frame_00000.png`, … into `dir`.
pub fn export_frames(
    driver: &mut PlaybackDriver,
    dir: &Path,
    size: (u32, u32),
) -> Result<usize> {
    write_png_frames(driver, dir, |renderer| bitmap::frame_image(renderer, size))
}

/// PNG sequence with a caller-supplied painter.
pub fn write_png_frames<P>(
    driver: &mut PlaybackDriver,
    dir: &Path,
    mut paint: P,
) -> Result<usize>
where
    P: FnMut(&Renderer) -> Result<RgbImage>,
{
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let written = driver.run(|renderer: &Renderer, index: usize| -> Result<()> {
        let path = dir.join(format!("frame_{index:05}.png"));
        paint(renderer)?
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    })?;

    log::info!("Wrote {written} PNG frames to {}", dir.display());
    Ok(written)
}

/// Frame indices for the overlay: always frame 0, then either the explicit
/// indices, a seeded random sample, or evenly spaced frames.
pub fn snapshot_indices(len: usize, config: &SnapshotConfig) -> Result<Vec<usize>, FrameError> {
    let mut indices = vec![0];

    if let Some(explicit) = &config.indices {
        for &i in explicit {
            if i >= len {
                return Err(FrameError::FrameIndexOutOfRange { index: i, len });
            }
            indices.push(i);
        }
    } else {
        let others = len.saturating_sub(1);
        let count = config.count.min(others);
        match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                indices.extend(
                    rand::seq::index::sample(&mut rng, others, count)
                        .into_iter()
                        .map(|i| i + 1),
                );
            }
            None => indices.extend((1..=count).map(|k| k * others / count)),
        }
    }

    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

/// Draw the selected timesteps of one channel into a single PNG.
pub fn export_snapshot(
    series: &FrameSeries,
    config: &SnapshotConfig,
    axis: AxisMode,
    path: &Path,
    size: (u32, u32),
) -> Result<Vec<usize>> {
    let channel = match &config.channel {
        Some(c) => c.clone(),
        None => series
            .channel_names()
            .first()
            .cloned()
            .ok_or(FrameError::EmptyInput)?,
    };
    let indices = snapshot_indices(series.len(), config)?;
    let y_bounds = axis.resolve(series, std::slice::from_ref(&channel))?;

    bitmap::overlay_image(series, &channel, &indices, y_bounds, size)?
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!(
        "Wrote overlay of {} timesteps of '{channel}' to {}",
        indices.len(),
        path.display()
    );
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_selection() {
        let cfg = SnapshotConfig {
            count: 3,
            ..Default::default()
        };
        assert_eq!(snapshot_indices(10, &cfg).unwrap(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_count_clamped_to_series() {
        let cfg = SnapshotConfig {
            count: 50,
            ..Default::default()
        };
        assert_eq!(snapshot_indices(4, &cfg).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(snapshot_indices(1, &cfg).unwrap(), vec![0]);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let cfg = SnapshotConfig {
            count: 5,
            seed: Some(7),
            ..Default::default()
        };
        let a = snapshot_indices(100, &cfg).unwrap();
        let b = snapshot_indices(100, &cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
        assert_eq!(a[0], 0);
        assert!(a.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_explicit_indices_out_of_range() {
        let cfg = SnapshotConfig {
            indices: Some(vec![2, 8]),
            ..Default::default()
        };
        assert_eq!(
            snapshot_indices(5, &cfg).unwrap_err(),
            FrameError::FrameIndexOutOfRange { index: 8, len: 5 }
        );
    }
}
