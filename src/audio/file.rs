use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::info;

pub struct AudioFile {
    pub path: String,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening audio file: {}", path.display());

        let reader = WavReader::open(path)
            .context("Failed to open WAV file")?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")?;

        let duration_seconds = samples.len() as f64 /
            (spec.sample_rate as f64 * spec.channels as f64);

        info!(
            "Audio file loaded: {:.1}s, {}Hz, {} channels, {} samples",
            duration_seconds,
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        Ok(Self {
            path: path.display().to_string(),
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        })
    }

    /// Mix interleaved PCM down to a mono f32 waveform in [-1, 1].
    ///
    /// Channels are averaged per frame so multi-channel files keep the
    /// same loudness scale as mono ones, which matters for energy
    /// analysis downstream.
    pub fn to_mono_f32(&self) -> Vec<f32> {
        let channels = self.channels.max(1) as usize;
        let scale = 1.0 / (i16::MAX as f32 * channels as f32);

        self.samples
            .chunks(channels)
            .map(|frame| {
                let sum: f32 = frame.iter().map(|&s| s as f32).sum();
                sum * scale
            })
            .collect()
    }
}
