//! Timed transcript segments and the transcription seam
//!
//! The transcriber is an external collaborator (WhisperX behind a
//! command wrapper); this crate consumes its sentence-level output and
//! never performs transcription or alignment itself.

mod segment;
mod transcriber;

pub use segment::{Segment, SegmentKey};
pub use transcriber::{CommandTranscriber, Transcriber, TranscriptFile};
