//! Linear, single-pass playback over a series.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ReplayConfig;
use crate::data::{FrameError, FrameSeries};
use crate::render::Renderer;

/// Current state of the playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Constructed, nothing rendered yet
    Idle,
    /// Walking frame indices forward
    Running,
    /// Last frame rendered; terminal
    Finished,
}

/// Drives a [`Renderer`] through frame indices `0, 1, …, last` exactly once.
///
/// The driver owns the renderer, so only one caller can ever advance it.
/// Two ways to advance:
/// - [`step`](Self::step) / [`run`](Self::run): every index in order (export).
/// - [`poll`](Self::poll): fixed-rate clock; when the caller falls behind,
///   the frames it missed are skipped, never queued, and the index never
///   decreases (viewer).
#[derive(Debug)]
pub struct PlaybackDriver {
    renderer: Renderer,
    state: PlaybackState,
    /// Last index that will be rendered.
    last: usize,
    /// Last index rendered so far.
    cursor: Option<usize>,
    interval: Duration,
    started_at: Option<Instant>,
    skipped: usize,
}

impl PlaybackDriver {
    /// `frame_limit` caps playback to the first N frames (preview); it is
    /// clamped to the series length.
    pub fn new(renderer: Renderer, frame_limit: Option<usize>, interval: Duration) -> Self {
        let len = renderer.frame_count();
        let count = match frame_limit {
            Some(n) if n > len => {
                log::warn!("Requested {n} frames but the series has {len}; playing {len}");
                len
            }
            Some(n) => n.max(1),
            None => len,
        };
        Self {
            renderer,
            state: PlaybackState::Idle,
            last: count.saturating_sub(1),
            cursor: None,
            interval: interval.max(Duration::from_millis(1)),
            started_at: None,
            skipped: 0,
        }
    }

    /// Renderer over the configured panels, limited and paced per `config`.
    pub fn from_config(
        series: Arc<FrameSeries>,
        config: &ReplayConfig,
    ) -> Result<Self, FrameError> {
        let panels = config.panels_for(&series);
        let renderer = Renderer::new(series, &panels)?;
        Ok(Self::new(renderer, config.frames, config.interval()))
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of frames this playback covers.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.last + 1
    }

    /// Index of the most recently rendered frame.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frames passed over by [`poll`](Self::poll) because the caller was late.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Idle → Running; renders frame 0. A no-op returning `None` otherwise.
    pub fn start(&mut self, now: Instant) -> Result<Option<usize>, FrameError> {
        if self.state != PlaybackState::Idle {
            return Ok(None);
        }
        log::debug!("Playback started over {} frames", self.frame_count());
        self.state = PlaybackState::Running;
        self.started_at = Some(now);
        self.render(0)?;
        Ok(Some(0))
    }

    /// Render exactly the next index. Starts an idle playback; `None` once
    /// finished.
    pub fn step(&mut self) -> Result<Option<usize>, FrameError> {
        match self.state {
            PlaybackState::Idle => self.start(Instant::now()),
            PlaybackState::Running => {
                let next = self.cursor.map_or(0, |c| c + 1);
                self.render(next)?;
                Ok(Some(next))
            }
            PlaybackState::Finished => Ok(None),
        }
    }

    /// Render the frame due at `now` on the fixed-rate schedule, if it is
    /// later than the one already shown.
    pub fn poll(&mut self, now: Instant) -> Result<Option<usize>, FrameError> {
        if self.state != PlaybackState::Running {
            return Ok(None);
        }
        let Some(started) = self.started_at else {
            return Ok(None);
        };
        let elapsed = now.saturating_duration_since(started);
        let steps = elapsed.as_nanos() / self.interval.as_nanos();
        let due = usize::try_from(steps).unwrap_or(usize::MAX).min(self.last);
        let current = self.cursor.unwrap_or(0);
        if due <= current {
            return Ok(None);
        }

        let missed = due - current - 1;
        if missed > 0 {
            log::debug!("Playback behind schedule, skipping {missed} frames");
            self.skipped += missed;
        }
        self.render(due)?;
        Ok(Some(due))
    }

    /// Time left until [`poll`](Self::poll) would render something new.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        if self.state != PlaybackState::Running {
            return None;
        }
        let started = self.started_at?;
        let next = u32::try_from(self.cursor.map_or(0, |c| c + 1)).ok()?;
        let due_at = started.checked_add(self.interval.checked_mul(next)?)?;
        Some(due_at.saturating_duration_since(now))
    }

    /// Walk every remaining index in order, handing the renderer to
    /// `on_frame` after each update. Returns the number of frames visited.
    pub fn run<E, F>(&mut self, mut on_frame: F) -> Result<usize, E>
    where
        E: From<FrameError>,
        F: FnMut(&Renderer, usize) -> Result<(), E>,
    {
        let mut visited = 0;
        while let Some(index) = self.step()? {
            on_frame(&self.renderer, index)?;
            visited += 1;
        }
        Ok(visited)
    }

    fn render(&mut self, index: usize) -> Result<(), FrameError> {
        debug_assert!(self.cursor.map_or(true, |c| index > c));
        self.renderer.update(index)?;
        self.cursor = Some(index);
        if index >= self.last {
            log::debug!("Playback finished at frame {index}");
            self.state = PlaybackState::Finished;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::{AxisMode, PanelConfig};
    use crate::data::Frame;

    fn driver(frames: usize, limit: Option<usize>) -> PlaybackDriver {
        let frames = (0..frames)
            .map(|i| Frame {
                index: i,
                timestamp: i as f64,
                channels: BTreeMap::from([("u".to_string(), vec![i as f64; 4])]),
            })
            .collect();
        let series =
            FrameSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec!["u".into()], frames).unwrap();
        let layout = vec![PanelConfig {
            channels: vec!["u".into()],
            label: None,
            axis: AxisMode::Auto,
        }];
        let renderer = Renderer::new(Arc::new(series), &layout).unwrap();
        PlaybackDriver::new(renderer, limit, Duration::from_millis(10))
    }

    #[test]
    fn test_run_visits_every_index_once_in_order() {
        let mut d = driver(7, None);
        assert_eq!(d.state(), PlaybackState::Idle);

        let mut seen = Vec::new();
        let visited = d
            .run(|r, i| {
                assert_eq!(r.current(), Some(i));
                seen.push(i);
                Ok::<(), FrameError>(())
            })
            .unwrap();

        assert_eq!(visited, 7);
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
        assert_eq!(d.state(), PlaybackState::Finished);
        assert_eq!(d.step().unwrap(), None);
    }

    #[test]
    fn test_frame_limit() {
        let mut d = driver(10, Some(3));
        let mut seen = Vec::new();
        d.run(|_, i| {
            seen.push(i);
            Ok::<(), FrameError>(())
        })
        .unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_limit_larger_than_series_is_clamped() {
        let d = driver(4, Some(300));
        assert_eq!(d.frame_count(), 4);
    }

    #[test]
    fn test_single_frame_finishes_on_start() {
        let mut d = driver(1, None);
        assert_eq!(d.start(Instant::now()).unwrap(), Some(0));
        assert_eq!(d.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_poll_skips_but_never_goes_back() {
        let mut d = driver(20, None);
        let t0 = Instant::now();
        assert_eq!(d.start(t0).unwrap(), Some(0));

        assert_eq!(d.poll(t0 + Duration::from_millis(5)).unwrap(), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(12)).unwrap(), Some(1));
        // Late by two frames: 2 and 3 are skipped.
        assert_eq!(d.poll(t0 + Duration::from_millis(41)).unwrap(), Some(4));
        assert_eq!(d.skipped(), 2);
        // Clock jitter backwards renders nothing.
        assert_eq!(d.poll(t0 + Duration::from_millis(30)).unwrap(), None);
        assert_eq!(d.cursor(), Some(4));

        assert_eq!(d.poll(t0 + Duration::from_secs(10)).unwrap(), Some(19));
        assert_eq!(d.state(), PlaybackState::Finished);
        assert_eq!(d.poll(t0 + Duration::from_secs(11)).unwrap(), None);
    }

    #[test]
    fn test_poll_before_start_does_nothing() {
        let mut d = driver(3, None);
        assert_eq!(d.poll(Instant::now()).unwrap(), None);
        assert_eq!(d.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut d = driver(3, None);
        let t0 = Instant::now();
        d.start(t0).unwrap();
        assert_eq!(d.start(t0).unwrap(), None);
        assert_eq!(d.cursor(), Some(0));
    }

    #[test]
    fn test_next_due_in_huge_interval_does_not_overflow() {
        let mut d = driver(3, None);
        d.interval = Duration::MAX;
        let t0 = Instant::now();
        d.start(t0).unwrap();
        assert_eq!(d.next_due_in(t0), None);
        assert_eq!(d.poll(t0 + Duration::from_secs(1)).unwrap(), None);
    }

    #[test]
    fn test_next_due_in() {
        let mut d = driver(3, None);
        let t0 = Instant::now();
        d.start(t0).unwrap();
        assert_eq!(
            d.next_due_in(t0 + Duration::from_millis(4)),
            Some(Duration::from_millis(6))
        );
    }
}
