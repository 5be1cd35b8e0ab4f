//! Media fetching
//!
//! Resolves a source URL to a local WAV file and a stable video id.
//! Downloads go through the external `yt-dlp` binary, which extracts
//! the best audio stream and converts it to WAV.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::info;

/// A fetched recording: local WAV path plus its stable identifier.
#[derive(Debug, Clone)]
pub struct FetchedAudio {
    pub wav_path: PathBuf,
    pub video_id: String,
}

/// Media fetching collaborator
#[async_trait::async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetch the audio for `url`, returning the local WAV path and
    /// the video id
    async fn fetch(&self, url: &str) -> Result<FetchedAudio>;

    /// Fetcher name for logging
    fn name(&self) -> &str;
}

/// Extract the video id from the common YouTube URL shapes
/// (`watch?v=`, `youtu.be/`, `shorts/`). Returns `None` for anything
/// else; callers fall back to asking the downloader.
pub fn video_id_from_url(url: &str) -> Option<String> {
    let tail = if let Some(rest) = url.split_once("v=").map(|(_, r)| r) {
        rest.split('&').next()
    } else if let Some(rest) = url.split_once("youtu.be/").map(|(_, r)| r) {
        rest.split('?').next()
    } else if let Some(rest) = url.split_once("shorts/").map(|(_, r)| r) {
        rest.split('?').next()
    } else {
        None
    };

    tail.filter(|id| !id.is_empty()).map(str::to_string)
}

/// Fetcher that shells out to `yt-dlp`.
///
/// When the video id can be read off the URL and `<out_dir>/<id>.wav`
/// already exists, the download is skipped.
pub struct YtDlpFetcher {
    out_dir: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn wav_path_for(&self, video_id: &str) -> PathBuf {
        self.out_dir.join(format!("{video_id}.wav"))
    }

    async fn run_yt_dlp(&self, url: &str) -> Result<String> {
        // --print after_move:id emits the final id once the WAV is in
        // place, so stdout doubles as the id lookup.
        let output = Command::new("yt-dlp")
            .arg("--format")
            .arg("bestaudio/best")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg("wav")
            .arg("--output")
            .arg(self.out_dir.join("%(id)s.%(ext)s"))
            .arg("--print")
            .arg("after_move:id")
            .arg("--no-simulate")
            .arg(url)
            .output()
            .await
            .context("Failed to run yt-dlp (is it installed?)")?;

        if !output.status.success() {
            anyhow::bail!(
                "yt-dlp exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            anyhow::bail!("yt-dlp produced no video id for {url}");
        }
        Ok(id)
    }
}

#[async_trait::async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio> {
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .context("Failed to create download directory")?;

        // Skip the network entirely if we already have this audio.
        if let Some(video_id) = video_id_from_url(url) {
            let wav_path = self.wav_path_for(&video_id);
            if wav_path.exists() {
                info!("Found existing audio for {video_id}, skipping download");
                return Ok(FetchedAudio { wav_path, video_id });
            }
        }

        info!("Downloading audio: {url}");
        let video_id = self.run_yt_dlp(url).await?;
        let wav_path = self.wav_path_for(&video_id);

        if !wav_path.exists() {
            anyhow::bail!("yt-dlp reported id {video_id} but {:?} is missing", wav_path);
        }

        Ok(FetchedAudio { wav_path, video_id })
    }

    fn name(&self) -> &str {
        "yt-dlp"
    }
}

/// Fetcher over a directory of already-downloaded WAV files, keyed by
/// video id. No network involved.
pub struct LocalFetcher {
    audio_dir: PathBuf,
}

impl LocalFetcher {
    pub fn new(audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            audio_dir: audio_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl MediaFetcher for LocalFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio> {
        let video_id = video_id_from_url(url)
            .with_context(|| format!("Cannot extract a video id from {url}"))?;

        let wav_path = self.audio_dir.join(format!("{video_id}.wav"));
        if !wav_path.exists() {
            anyhow::bail!("No local audio for {video_id} at {:?}", wav_path);
        }

        Ok(FetchedAudio { wav_path, video_id })
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_url() {
        let id = video_id_from_url("https://www.youtube.com/watch?v=abc123&t=42");
        assert_eq!(id.as_deref(), Some("abc123"));
    }

    #[test]
    fn extracts_id_from_short_link() {
        let id = video_id_from_url("https://youtu.be/xyz789?si=share");
        assert_eq!(id.as_deref(), Some("xyz789"));
    }

    #[test]
    fn extracts_id_from_shorts_url() {
        let id = video_id_from_url("https://www.youtube.com/shorts/short01");
        assert_eq!(id.as_deref(), Some("short01"));
    }

    #[test]
    fn unknown_shapes_yield_none() {
        assert!(video_id_from_url("https://example.com/video.mp4").is_none());
    }
}
