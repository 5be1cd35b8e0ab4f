pub mod audio;
pub mod batch;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod sampling;
pub mod transcript;

pub use audio::AudioFile;
pub use batch::{read_urls, BatchRunner, BatchStats};
pub use config::Config;
pub use dataset::{DatasetRecord, DatasetWriter};
pub use fetch::{FetchedAudio, LocalFetcher, MediaFetcher, YtDlpFetcher};
pub use sampling::{
    segments_in_window, select_segments, MultiWindowPlanner, WholeClipPlanner, Window,
    WindowPlanner, DEFAULT_CAP, DEFAULT_WINDOW_SECS,
};
pub use transcript::{CommandTranscriber, Segment, Transcriber, TranscriptFile};
