use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

use super::segment::Segment;

/// Speech-to-text collaborator
///
/// Given a WAV file, produces an ordered list of sentence-level
/// segments with start/end timestamps. Implementations:
/// - `CommandTranscriber`: shells out to an external transcription
///   command (a WhisperX wrapper) that emits aligned JSON on stdout
/// - `TranscriptFile`: reads precomputed transcript JSON from disk
///   (offline runs and tests)
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio_path`
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>>;

    /// Transcriber name for logging
    fn name(&self) -> &str;
}

/// Aligned transcript JSON, either a bare segment array or the
/// aligner's full output object with a `segments` field. Per-word
/// timing inside segments is ignored.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptJson {
    Full { segments: Vec<Segment> },
    Flat(Vec<Segment>),
}

impl TranscriptJson {
    fn into_segments(self) -> Vec<Segment> {
        match self {
            TranscriptJson::Full { segments } => segments,
            TranscriptJson::Flat(segments) => segments,
        }
    }
}

/// Transcriber that runs an external transcription command.
///
/// The command receives the audio path as its final argument and must
/// write transcript JSON to stdout.
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

#[async_trait::async_trait]
impl Transcriber for CommandTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>> {
        info!(
            "Transcribing {} with `{}`",
            audio_path.display(),
            self.program
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(audio_path)
            .output()
            .await
            .with_context(|| format!("Failed to run transcriber `{}`", self.program))?;

        if !output.status.success() {
            anyhow::bail!(
                "Transcriber `{}` exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let parsed: TranscriptJson = serde_json::from_slice(&output.stdout)
            .context("Failed to parse transcript JSON from transcriber output")?;

        let segments = parsed.into_segments();
        info!("Transcription complete: {} segments", segments.len());

        Ok(segments)
    }

    fn name(&self) -> &str {
        "command"
    }
}

/// Reads a precomputed transcript JSON file from a directory of
/// `<video_id>.json` files.
pub struct TranscriptFile {
    transcript_dir: PathBuf,
}

impl TranscriptFile {
    pub fn new(transcript_dir: impl Into<PathBuf>) -> Self {
        Self {
            transcript_dir: transcript_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for TranscriptFile {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>> {
        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("Audio path has no file stem")?;
        let json_path = self.transcript_dir.join(format!("{stem}.json"));

        let data = tokio::fs::read(&json_path)
            .await
            .with_context(|| format!("Failed to read transcript file {:?}", json_path))?;

        let parsed: TranscriptJson = serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse transcript JSON {:?}", json_path))?;

        Ok(parsed.into_segments())
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_segment_array() {
        let json = r#"[{"start": 0.5, "end": 2.0, "text": "hello"}]"#;
        let parsed: TranscriptJson = serde_json::from_str(json).unwrap();
        let segments = parsed.into_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hello");
    }

    #[test]
    fn parses_aligner_output_object() {
        let json = r#"{
            "segments": [
                {"start": 0.5, "end": 2.0, "text": "hello",
                 "words": [{"word": "hello", "start": 0.5, "end": 2.0}]}
            ]
        }"#;
        let parsed: TranscriptJson = serde_json::from_str(json).unwrap();
        let segments = parsed.into_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0.5);
    }
}
