use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::transcript::Segment;

/// One dataset row: a selected segment tagged with its source video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub video_id: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl DatasetRecord {
    pub fn tag(video_id: &str, segment: &Segment) -> Self {
        Self {
            video_id: video_id.to_string(),
            start: segment.start,
            end: segment.end,
            text: segment.text.clone(),
        }
    }
}

/// Append-only dataset writer with resume support.
///
/// The line-delimited JSON file is the source of truth: records are
/// appended and flushed per video, so a crashed batch loses at most
/// the video it was processing. The pretty-JSON, CSV, and TXT views
/// are regenerated from the JSONL by `export_views`.
pub struct DatasetWriter {
    jsonl_path: PathBuf,
    writer: BufWriter<File>,
}

impl DatasetWriter {
    /// Open (or create) the dataset at `<output_dir>/<basename>.jsonl`
    /// in append mode.
    pub fn open(output_dir: impl AsRef<Path>, basename: &str) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)
            .context("Failed to create output directory")?;

        let jsonl_path = output_dir.join(format!("{basename}.jsonl"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&jsonl_path)
            .with_context(|| format!("Failed to open dataset file {:?}", jsonl_path))?;

        info!("Dataset writer opened: {:?}", jsonl_path);

        Ok(Self {
            jsonl_path,
            writer: BufWriter::new(file),
        })
    }

    /// Video ids already present in the dataset, read back from the
    /// JSONL. Lines that fail to parse are skipped with a warning so a
    /// torn write never blocks a resume.
    pub fn processed_ids(&self) -> Result<HashSet<String>> {
        let mut ids = HashSet::new();

        let file = match File::open(&self.jsonl_path) {
            Ok(f) => f,
            Err(_) => return Ok(ids),
        };

        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.context("Failed to read dataset line")?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<DatasetRecord>(&line) {
                Ok(record) => {
                    ids.insert(record.video_id);
                }
                Err(e) => {
                    warn!("Skipping corrupt dataset line {}: {}", lineno + 1, e);
                }
            }
        }

        info!("Resume scan: {} videos already in dataset", ids.len());
        Ok(ids)
    }

    /// Append one video's records and flush to disk.
    pub fn append(&mut self, records: &[DatasetRecord]) -> Result<()> {
        for record in records {
            let line = serde_json::to_string(record)
                .context("Failed to serialize dataset record")?;
            writeln!(self.writer, "{line}")
                .context("Failed to write dataset record")?;
        }
        self.writer.flush().context("Failed to flush dataset file")?;
        Ok(())
    }

    /// Regenerate the derived views (pretty JSON array, CSV, TXT)
    /// next to the JSONL.
    pub fn export_views(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush dataset file")?;

        let records = self.read_all()?;
        let stem = self.jsonl_path.with_extension("");
        let stem = stem.to_string_lossy();

        let json_path = PathBuf::from(format!("{stem}.json"));
        let json = serde_json::to_string_pretty(&records)
            .context("Failed to serialize dataset JSON")?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write {:?}", json_path))?;

        let csv_path = PathBuf::from(format!("{stem}.csv"));
        let mut csv = BufWriter::new(
            File::create(&csv_path)
                .with_context(|| format!("Failed to create {:?}", csv_path))?,
        );
        writeln!(csv, "video_id,start,end,text")?;
        for r in &records {
            writeln!(
                csv,
                "{},{},{},{}",
                csv_field(&r.video_id),
                r.start,
                r.end,
                csv_field(&r.text)
            )?;
        }
        csv.flush()?;

        let txt_path = PathBuf::from(format!("{stem}.txt"));
        let mut txt = BufWriter::new(
            File::create(&txt_path)
                .with_context(|| format!("Failed to create {:?}", txt_path))?,
        );
        for r in &records {
            writeln!(txt, "{}", r.text)?;
        }
        txt.flush()?;

        info!(
            "Exported {} records to JSON, CSV, and TXT views",
            records.len()
        );
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<DatasetRecord>> {
        let mut records = Vec::new();

        let file = match File::open(&self.jsonl_path) {
            Ok(f) => f,
            Err(_) => return Ok(records),
        };

        for line in BufReader::new(file).lines() {
            let line = line.context("Failed to read dataset line")?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<DatasetRecord>(&line) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

/// Quote a CSV field per RFC 4180 when it contains a comma, quote, or
/// newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
