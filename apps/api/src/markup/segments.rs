//! Diff segmentation. Turns an (original, corrected) pair into ordered runs of
//! unchanged / added / removed text.
//!
//! The diff primitive is `similar` (Myers). Word granularity tokenizes on Unicode word
//! boundaries, so whitespace runs and punctuation are their own tokens; consecutive
//! tokens with the same classification are merged into a single segment.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// Upper bound on diff search time. Past it `similar` falls back to a coarser but
/// still complete diff, so both sides reconstruct exactly.
pub const DIFF_DEADLINE: Duration = Duration::from_secs(2);

/// Classification of a segment relative to the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

impl From<ChangeTag> for SegmentKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        }
    }
}

/// One contiguous run of text with a single classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub value: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn new(value: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    #[cfg(test)]
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self::new(value, SegmentKind::Unchanged)
    }

    #[cfg(test)]
    pub fn added(value: impl Into<String>) -> Self {
        Self::new(value, SegmentKind::Added)
    }

    #[cfg(test)]
    pub fn removed(value: impl Into<String>) -> Self {
        Self::new(value, SegmentKind::Removed)
    }
}

/// Unit of comparison for the diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Words, punctuation and whitespace runs. Used for the improved-résumé view.
    #[default]
    Word,
    /// Grapheme clusters. Used for the raw feedback view.
    Char,
}

/// Diffs `original` against `corrected` and returns the merged segment sequence.
///
/// Unchanged + Added values concatenate to `corrected`; Unchanged + Removed values
/// concatenate to `original`. Within a replacement the removed run comes first.
pub fn diff_segments(original: &str, corrected: &str, granularity: Granularity) -> Vec<DiffSegment> {
    let mut config = TextDiff::configure();
    config.deadline(Instant::now() + DIFF_DEADLINE);
    let diff = match granularity {
        Granularity::Word => config.diff_unicode_words(original, corrected),
        Granularity::Char => config.diff_graphemes(original, corrected),
    };

    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = SegmentKind::from(change.tag());
        let value: &str = change.value();
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(value),
            _ => segments.push(DiffSegment::new(value, kind)),
        }
    }
    segments
}

/// Rebuilds one side of the diff from its segments.
#[cfg(test)]
pub fn reconstruct(segments: &[DiffSegment], side: SegmentKind) -> String {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Unchanged || s.kind == side)
        .map(|s| s.value.as_str())
        .collect()
}
