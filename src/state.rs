use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ReplayConfig;
use crate::data::{load_file, FrameSeries};
use crate::playback::{PlaybackDriver, PlaybackState};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    pub config: ReplayConfig,

    /// Loaded series (None until a file is opened).
    pub series: Option<Arc<FrameSeries>>,

    /// The single playback over `series`; replaced, never rewound, on restart.
    pub driver: Option<PlaybackDriver>,

    /// File the series came from.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReplayConfig::default())
    }
}

impl AppState {
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            config,
            series: None,
            driver: None,
            source: None,
            status_message: None,
        }
    }

    /// Parse a file with the current parser options and prepare playback.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path, &self.config.parser) {
            Ok(series) => {
                self.source = Some(path.to_path_buf());
                self.set_series(Arc::new(series));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a series and build an idle driver for it.
    pub fn set_series(&mut self, series: Arc<FrameSeries>) {
        self.series = Some(series);
        self.driver = None;
        self.status_message = None;
        self.rebuild_driver();
    }

    fn rebuild_driver(&mut self) {
        let Some(series) = &self.series else {
            return;
        };
        match PlaybackDriver::from_config(Arc::clone(series), &self.config) {
            Ok(driver) => self.driver = Some(driver),
            Err(e) => {
                log::error!("Cannot render series: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.driver = None;
            }
        }
    }

    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.driver.as_ref().map(PlaybackDriver::state)
    }

    /// Start the idle playback.
    pub fn play(&mut self, now: Instant) {
        let result = match &mut self.driver {
            Some(driver) => driver.start(now),
            None => return,
        };
        if let Err(e) = result {
            self.fail(e);
        }
    }

    /// Throw the finished (or running) playback away and play from frame 0.
    pub fn restart(&mut self, now: Instant) {
        self.rebuild_driver();
        self.play(now);
    }

    /// Advance on the fixed-rate clock. Call once per UI frame.
    pub fn tick(&mut self, now: Instant) {
        let result = match &mut self.driver {
            Some(driver) => driver.poll(now),
            None => return,
        };
        if let Err(e) = result {
            self.fail(e);
        }
    }

    /// Delay until the UI should repaint for the next frame.
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        self.driver.as_ref().and_then(|d| d.next_due_in(now))
    }

    fn fail(&mut self, e: crate::data::FrameError) {
        log::error!("Playback stopped: {e}");
        self.status_message = Some(format!("Error: {e}"));
        self.driver = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_and_play() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "FRAME 0\n1 2 3\nFRAME 1\n3 2 1\n").unwrap();

        let mut state = AppState::default();
        state.load_path(file.path());
        assert!(state.status_message.is_none());
        assert_eq!(state.playback_state(), Some(PlaybackState::Idle));

        let t0 = Instant::now();
        state.play(t0);
        state.tick(t0 + Duration::from_secs(1));
        assert_eq!(state.playback_state(), Some(PlaybackState::Finished));

        state.restart(t0);
        assert_eq!(state.playback_state(), Some(PlaybackState::Running));
        assert_eq!(state.driver.as_ref().unwrap().cursor(), Some(0));
    }

    #[test]
    fn test_load_failure_sets_status() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "FRAME 0\n1 x 3\n").unwrap();

        let mut state = AppState::default();
        state.load_path(file.path());
        assert!(state.series.is_none());
        assert!(state.status_message.unwrap().contains("not a number"));
    }
}
