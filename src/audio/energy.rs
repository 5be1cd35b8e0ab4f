//! Short-time energy analysis
//!
//! Computes an RMS loudness curve over the waveform and locates the
//! highest-energy contiguous span of a target duration. Used by the
//! window planner to aim one sampling window at the most energetic
//! part of a recording.

use anyhow::{ensure, Result};

/// Analysis frame length and hop, in seconds. Frame == hop, so frames
/// tile the waveform without overlap.
const FRAME_SECS: f64 = 0.05;

/// RMS energy per analysis frame, at a fixed hop spacing.
///
/// Internal to the energy analyzer; callers only see the peak start
/// time it produces.
pub(crate) struct EnergyCurve {
    rms: Vec<f64>,
    hop_secs: f64,
}

impl EnergyCurve {
    /// Build the curve from a mono waveform.
    ///
    /// Frame length is derived from the actual sample rate so the
    /// curve's time axis is invariant to it.
    pub(crate) fn from_waveform(waveform: &[f32], sample_rate: u32) -> Result<Self> {
        ensure!(sample_rate > 0, "sample rate must be positive");

        let frame_len = ((sample_rate as f64) * FRAME_SECS) as usize;
        let frame_len = frame_len.max(1);
        let hop_secs = frame_len as f64 / sample_rate as f64;

        let rms = waveform
            .chunks(frame_len)
            .map(|frame| {
                let sum_sq: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
                (sum_sq / frame.len() as f64).sqrt()
            })
            .collect();

        Ok(Self { rms, hop_secs })
    }

    /// Time offset of frame `i` from the start of the waveform.
    fn frame_time(&self, i: usize) -> f64 {
        i as f64 * self.hop_secs
    }

    /// Start time of the highest-energy contiguous span of
    /// `window_secs` seconds.
    ///
    /// Slides a window of consecutive frames across the curve and sums
    /// RMS values at each position. Strict greater-than comparison:
    /// the first maximum wins on ties. If the curve is shorter than
    /// one window the scan range is empty and the start of the
    /// recording is returned.
    pub(crate) fn peak_start(&self, window_secs: f64) -> f64 {
        let frames_per_win = (window_secs / self.hop_secs).round() as usize;
        let frames_per_win = frames_per_win.max(1);

        let mut best_energy = -1.0_f64;
        let mut best_start = 0.0_f64;

        let scan_len = self.rms.len().saturating_sub(frames_per_win);
        for (i, win) in self.rms.windows(frames_per_win).take(scan_len).enumerate() {
            let energy: f64 = win.iter().sum();
            if energy > best_energy {
                best_energy = energy;
                best_start = self.frame_time(i);
            }
        }

        best_start
    }
}

/// Start time (seconds) of the loudest `window_secs`-long span of the
/// waveform. Falls back to 0.0 for waveforms shorter than one window.
pub fn peak_window_start(waveform: &[f32], sample_rate: u32, window_secs: f64) -> Result<f64> {
    ensure!(window_secs > 0.0, "window length must be positive");

    let curve = EnergyCurve::from_waveform(waveform, sample_rate)?;
    Ok(curve.peak_start(window_secs))
}
