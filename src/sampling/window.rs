use anyhow::{ensure, Result};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::audio::energy;

/// Default length of a sampling window, in seconds (2 minutes).
pub const DEFAULT_WINDOW_SECS: f64 = 120.0;

/// Mid-range bounds as fractions of total duration.
const MID_RANGE_LO: f64 = 0.20;
const MID_RANGE_HI: f64 = 0.80;

/// Maximum number of randomly placed mid windows.
const MAX_MID_WINDOWS: usize = 3;

/// A candidate time interval for sampling transcript segments,
/// seconds from the start of the recording. Ephemeral: planned fresh
/// per recording, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Window planning strategy
///
/// Strategies:
/// - `MultiWindowPlanner`: long-form recordings; windows over the
///   lead, a random subset of the middle, the energy peak, and the
///   tail
/// - `WholeClipPlanner`: short clips; a single window spanning the
///   whole duration
///
/// The caller picks the strategy from expected content length; it is
/// not inferred from the duration.
pub trait WindowPlanner: Send + Sync {
    /// Plan candidate windows for one recording.
    ///
    /// Windows may overlap (a short recording's lead, peak, and tail
    /// often coincide); overlap is resolved downstream by segment
    /// deduplication, not by merging intervals here.
    fn plan(
        &self,
        duration_secs: f64,
        sample_rate: u32,
        waveform: &[f32],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Window>>;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

/// Planner for long-form recordings.
pub struct MultiWindowPlanner {
    window_secs: f64,
}

impl MultiWindowPlanner {
    pub fn new(window_secs: f64) -> Self {
        Self { window_secs }
    }

    /// Non-overlapping slot start times tiling the middle 20%–80% of
    /// the recording. Empty when the mid range does not exceed one
    /// window length.
    fn mid_slots(&self, duration_secs: f64) -> Vec<f64> {
        let mid_start = duration_secs * MID_RANGE_LO;
        let mid_end = duration_secs * MID_RANGE_HI;

        let mut slots = Vec::new();
        if mid_end - mid_start > self.window_secs {
            let stop = mid_end - self.window_secs;
            let mut t = mid_start;
            while t < stop {
                slots.push(t);
                t += self.window_secs;
            }
        }
        slots
    }
}

impl Default for MultiWindowPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

impl WindowPlanner for MultiWindowPlanner {
    fn plan(
        &self,
        duration_secs: f64,
        sample_rate: u32,
        waveform: &[f32],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Window>> {
        ensure!(duration_secs > 0.0, "duration must be positive");
        ensure!(sample_rate > 0, "sample rate must be positive");
        ensure!(self.window_secs > 0.0, "window length must be positive");

        let mut windows = Vec::new();

        // Lead: the opening of the recording.
        windows.push(Window::new(0.0, self.window_secs.min(duration_secs)));

        // Mid: up to 3 slots drawn without replacement from the
        // middle of the recording.
        let slots = self.mid_slots(duration_secs);
        let picked = slots.choose_multiple(rng, MAX_MID_WINDOWS.min(slots.len()));
        for &start in picked {
            windows.push(Window::new(start, start + self.window_secs));
        }

        // Peak: the loudest contiguous span.
        let peak_start = energy::peak_window_start(waveform, sample_rate, self.window_secs)?;
        windows.push(Window::new(
            peak_start,
            (peak_start + self.window_secs).min(duration_secs),
        ));

        // Tail: the close of the recording.
        windows.push(Window::new(
            (duration_secs - self.window_secs).max(0.0),
            duration_secs,
        ));

        Ok(windows)
    }

    fn name(&self) -> &str {
        "multi-window"
    }
}

/// Planner for short clips: one window covering everything.
pub struct WholeClipPlanner;

impl WindowPlanner for WholeClipPlanner {
    fn plan(
        &self,
        duration_secs: f64,
        sample_rate: u32,
        _waveform: &[f32],
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<Window>> {
        ensure!(duration_secs > 0.0, "duration must be positive");
        ensure!(sample_rate > 0, "sample rate must be positive");

        Ok(vec![Window::new(0.0, duration_secs)])
    }

    fn name(&self) -> &str {
        "whole-clip"
    }
}
