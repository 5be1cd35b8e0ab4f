// Integration tests for the dataset writer
//
// These verify the append + resume contract of the JSONL file and the
// derived JSON/CSV/TXT views.

use anyhow::Result;
use speech_harvest::{DatasetRecord, DatasetWriter, Segment};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn record(video_id: &str, start: f64, end: f64, text: &str) -> DatasetRecord {
    DatasetRecord::tag(
        video_id,
        &Segment {
            start,
            end,
            text: text.to_string(),
        },
    )
}

#[test]
fn append_then_resume_reports_processed_ids() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let mut writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
        writer.append(&[
            record("vid-a", 0.0, 2.0, "hello"),
            record("vid-a", 3.0, 5.0, "world"),
        ])?;
        writer.append(&[record("vid-b", 1.0, 2.5, "again")])?;
    }

    // Reopen as a fresh process would.
    let writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
    let ids = writer.processed_ids()?;

    assert_eq!(ids.len(), 2);
    assert!(ids.contains("vid-a"));
    assert!(ids.contains("vid-b"));

    Ok(())
}

#[test]
fn resume_tolerates_corrupt_lines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let jsonl_path = temp_dir.path().join("dataset.jsonl");

    {
        let mut writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
        writer.append(&[record("vid-a", 0.0, 2.0, "hello")])?;
    }

    // Simulate a torn write at the end of the file.
    let mut file = fs::OpenOptions::new().append(true).open(&jsonl_path)?;
    writeln!(file, "{{\"video_id\": \"vid-b\", \"sta")?;

    let mut writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
    let ids = writer.processed_ids()?;
    assert_eq!(ids.len(), 1, "corrupt line must be skipped, not fatal");
    assert!(ids.contains("vid-a"));

    // The writer still appends past the corruption.
    writer.append(&[record("vid-c", 0.0, 1.0, "more")])?;
    let ids = writer.processed_ids()?;
    assert!(ids.contains("vid-c"));

    Ok(())
}

#[test]
fn export_views_produces_all_formats() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
    writer.append(&[
        record("vid-a", 0.0, 2.0, "plain text"),
        record("vid-a", 3.0, 5.0, "comma, quoted \"text\""),
    ])?;
    writer.export_views()?;

    // Pretty JSON array.
    let json = fs::read_to_string(temp_dir.path().join("dataset.json"))?;
    let parsed: Vec<DatasetRecord> = serde_json::from_str(&json)?;
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].video_id, "vid-a");

    // CSV with header and RFC 4180 quoting.
    let csv = fs::read_to_string(temp_dir.path().join("dataset.csv"))?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("video_id,start,end,text"));
    assert_eq!(lines.next(), Some("vid-a,0,2,plain text"));
    assert_eq!(
        lines.next(),
        Some("vid-a,3,5,\"comma, quoted \"\"text\"\"\"")
    );

    // Plain text, one sentence per line.
    let txt = fs::read_to_string(temp_dir.path().join("dataset.txt"))?;
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "plain text");

    Ok(())
}

#[test]
fn empty_dataset_resumes_and_exports_cleanly() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut writer = DatasetWriter::open(temp_dir.path(), "dataset")?;
    assert!(writer.processed_ids()?.is_empty());

    writer.export_views()?;
    let json = fs::read_to_string(temp_dir.path().join("dataset.json"))?;
    let parsed: Vec<DatasetRecord> = serde_json::from_str(&json)?;
    assert!(parsed.is_empty());

    Ok(())
}
