use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub transcriber: TranscriberConfig,
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct FetchConfig {
    /// Directory for downloaded WAV files
    pub downloads_dir: String,
    /// Use only already-downloaded audio, never the network
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Deserialize)]
pub struct TranscriberConfig {
    /// Transcription command; receives the WAV path as its final
    /// argument and must print transcript JSON to stdout
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Directory of precomputed `<video_id>.json` transcripts; when
    /// set, the command is not run
    pub transcript_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SamplingConfig {
    /// Sampling window length in seconds
    pub window_secs: f64,
    /// Maximum segments kept per video
    pub cap: usize,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    /// Dataset basename; files are `<basename>.jsonl/.json/.csv/.txt`
    pub basename: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
