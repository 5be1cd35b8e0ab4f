//! Window selection and sentence sampling
//!
//! The core of the pipeline: plan candidate time windows over a
//! recording (lead, random middle, energy peak, tail — or the whole
//! clip for short content), filter the transcript to segments fully
//! contained in each window, and return a deduplicated, capped
//! selection. Synchronous and pure; the only non-determinism is the
//! caller-supplied RNG.

mod filter;
mod sampler;
mod window;

pub use filter::segments_in_window;
pub use sampler::{select_segments, DEFAULT_CAP};
pub use window::{
    MultiWindowPlanner, WholeClipPlanner, Window, WindowPlanner, DEFAULT_WINDOW_SECS,
};
