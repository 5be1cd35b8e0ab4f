//! Batch driver
//!
//! Walks a newline-delimited URL list and runs the per-video pipeline
//! (fetch, transcribe, plan windows, sample, append to the dataset).
//! Failures are per-video: they are logged and the batch moves on.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{error, info};

use crate::audio::AudioFile;
use crate::dataset::{DatasetRecord, DatasetWriter};
use crate::fetch::{video_id_from_url, MediaFetcher};
use crate::sampling::{select_segments, WindowPlanner};
use crate::transcript::Transcriber;

/// Outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// Videos processed and written in this run
    pub processed: usize,

    /// Videos skipped because they were already in the dataset
    pub skipped: usize,

    /// Videos that failed (fetch, transcription, or audio errors)
    pub failed: usize,

    /// Total segments written in this run
    pub segments_written: usize,
}

/// Read the URL list, one URL per line, blank lines skipped.
pub fn read_urls(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read URL list {:?}", path.as_ref()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Runs the fetch → transcribe → sample → write pipeline over a batch
/// of URLs.
pub struct BatchRunner {
    fetcher: Box<dyn MediaFetcher>,
    transcriber: Box<dyn Transcriber>,
    planner: Box<dyn WindowPlanner>,
    cap: usize,
}

impl BatchRunner {
    pub fn new(
        fetcher: Box<dyn MediaFetcher>,
        transcriber: Box<dyn Transcriber>,
        planner: Box<dyn WindowPlanner>,
        cap: usize,
    ) -> Self {
        Self {
            fetcher,
            transcriber,
            planner,
            cap,
        }
    }

    /// Process every URL, appending each video's sampled segments to
    /// `writer`. Videos whose id already appears in the dataset are
    /// skipped, so an interrupted batch can be rerun.
    pub async fn run(
        &self,
        urls: &[String],
        writer: &mut DatasetWriter,
        rng: &mut dyn RngCore,
    ) -> Result<BatchStats> {
        let mut stats = BatchStats {
            started_at: Utc::now(),
            processed: 0,
            skipped: 0,
            failed: 0,
            segments_written: 0,
        };

        let mut processed_ids = writer.processed_ids()?;

        info!(
            "Batch start: {} URLs, planner `{}`, fetcher `{}`, transcriber `{}`",
            urls.len(),
            self.planner.name(),
            self.fetcher.name(),
            self.transcriber.name()
        );

        for url in urls {
            // Cheap pre-check: skip without touching the network when
            // the id can be read off the URL.
            if let Some(id) = video_id_from_url(url) {
                if processed_ids.contains(&id) {
                    info!("Skipping {id} (already in dataset)");
                    stats.skipped += 1;
                    continue;
                }
            }

            match self
                .process_one(url, &mut processed_ids, writer, rng)
                .await
            {
                Ok(Some(count)) => {
                    stats.processed += 1;
                    stats.segments_written += count;
                }
                Ok(None) => stats.skipped += 1,
                Err(e) => {
                    error!("Failed to process {url}: {e:#}");
                    stats.failed += 1;
                }
            }
        }

        info!(
            "Batch complete: {} processed, {} skipped, {} failed, {} segments",
            stats.processed, stats.skipped, stats.failed, stats.segments_written
        );

        Ok(stats)
    }

    /// Run the pipeline for one URL. Returns the number of segments
    /// written, or `None` if the video turned out to be already
    /// processed once its id was known.
    async fn process_one(
        &self,
        url: &str,
        processed_ids: &mut HashSet<String>,
        writer: &mut DatasetWriter,
        rng: &mut dyn RngCore,
    ) -> Result<Option<usize>> {
        let fetched = self.fetcher.fetch(url).await?;

        if processed_ids.contains(&fetched.video_id) {
            info!("Skipping {} (already in dataset)", fetched.video_id);
            return Ok(None);
        }

        let segments = self.transcriber.transcribe(&fetched.wav_path).await?;

        let audio = AudioFile::open(&fetched.wav_path)?;
        let waveform = audio.to_mono_f32();

        let windows = self.planner.plan(
            audio.duration_seconds,
            audio.sample_rate,
            &waveform,
            rng,
        )?;

        let selected = select_segments(&segments, &windows, self.cap, rng)?;

        let records: Vec<DatasetRecord> = selected
            .iter()
            .map(|seg| DatasetRecord::tag(&fetched.video_id, seg))
            .collect();
        writer.append(&records)?;

        processed_ids.insert(fetched.video_id.clone());

        info!(
            "Processed {}: {} windows, {} segments written",
            fetched.video_id,
            windows.len(),
            records.len()
        );

        Ok(Some(records.len()))
    }
}
