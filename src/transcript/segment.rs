use serde::{Deserialize, Serialize};

/// A sentence-level transcript unit with timestamps in seconds.
///
/// Segments come from the transcriber already aligned; this crate only
/// reads and filters them, never adjusts timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the sentence, seconds from the beginning of the audio
    pub start: f64,

    /// End of the sentence, seconds
    pub end: f64,

    /// Transcribed text
    pub text: String,
}

/// Identity of a segment for deduplication: its `(start, end)` pair.
///
/// Two segments with identical timestamps count as the same sentence
/// regardless of text, matching the aligner's guarantee that spans are
/// unique. Floats are compared by bit pattern, which is exact equality
/// for the timestamps aligners emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    start_bits: u64,
    end_bits: u64,
}

impl SegmentKey {
    pub fn of(segment: &Segment) -> Self {
        Self {
            start_bits: segment.start.to_bits(),
            end_bits: segment.end.to_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn key_ignores_text() {
        let a = seg(1.5, 2.5, "hello");
        let b = seg(1.5, 2.5, "world");
        assert_eq!(SegmentKey::of(&a), SegmentKey::of(&b));
    }

    #[test]
    fn key_distinguishes_timestamps() {
        let a = seg(1.5, 2.5, "hello");
        let b = seg(1.5, 2.6, "hello");
        assert_ne!(SegmentKey::of(&a), SegmentKey::of(&b));
    }
}
