use anyhow::{ensure, Result};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;
use tracing::info;

use crate::transcript::{Segment, SegmentKey};

use super::filter::segments_in_window;
use super::window::Window;

/// Default maximum number of segments kept per recording.
pub const DEFAULT_CAP: usize = 300;

/// Collect segments from the planned windows, deduplicated and capped.
///
/// Windows are visited in planner order; each segment is admitted the
/// first time its `(start, end)` identity appears, so the accumulated
/// list is in encounter order. If more than `cap` distinct segments
/// accumulate, a uniform sample of exactly `cap` is drawn without
/// replacement (and the output order no longer tracks transcript
/// order). At or below the cap the list is returned unchanged.
///
/// Empty segment or window lists are not errors; they yield an empty
/// result.
pub fn select_segments(
    segments: &[Segment],
    windows: &[Window],
    cap: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Segment>> {
    ensure!(cap > 0, "cap must be positive");

    let mut seen: HashSet<SegmentKey> = HashSet::new();
    let mut selected: Vec<Segment> = Vec::new();

    for window in windows {
        for seg in segments_in_window(segments, window) {
            if seen.insert(SegmentKey::of(seg)) {
                selected.push(seg.clone());
            }
        }
    }

    if selected.len() > cap {
        info!(
            "Capping selection: {} distinct segments -> {}",
            selected.len(),
            cap
        );
        let sampled: Vec<Segment> = selected.choose_multiple(rng, cap).cloned().collect();
        selected = sampled;
    }

    Ok(selected)
}
