//! Renders diff segments as markdown with inline HTML annotations.
//!
//! - unchanged text passes through as-is (it is markdown and is rendered as such)
//! - additions are wrapped in `<span class="diff-added">`, unescaped
//! - removals are HTML-escaped and wrapped in `<del class="diff-removed">`,
//!   except whitespace-only removals which are emitted verbatim
//!
//! Additions keep their markdown so that e.g. a newly bolded phrase still renders.
//! The flip side: a literal `<` or `>` inside an addition is read as markup downstream.

use crate::errors::AppError;
use crate::markup::escape::escape_html_into;
use crate::markup::segments::{diff_segments, DiffSegment, Granularity, SegmentKind};

pub const ADDED_CLASS: &str = "diff-added";
pub const REMOVED_CLASS: &str = "diff-removed";

/// Word-level diff of `original` against `corrected`, rendered as annotated markdown.
pub fn transform(original: &str, corrected: &str) -> String {
    transform_with(original, corrected, Granularity::Word)
}

pub fn transform_with(original: &str, corrected: &str, granularity: Granularity) -> String {
    render_segments(&diff_segments(original, corrected, granularity))
}

/// `transform_with` on the blocking pool. The diff is CPU-bound and can grow
/// quadratically with input size, so request handlers go through here.
pub async fn transform_blocking(
    original: String,
    corrected: String,
    granularity: Granularity,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || transform_with(&original, &corrected, granularity))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in diff: {e}")))
}

pub fn render_segments(segments: &[DiffSegment]) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.value.len()).sum());
    for segment in segments {
        render_segment(segment, &mut out);
    }
    out
}

fn render_segment(segment: &DiffSegment, out: &mut String) {
    match segment.kind {
        SegmentKind::Unchanged => out.push_str(&segment.value),
        SegmentKind::Added => {
            out.push_str("<span class=\"");
            out.push_str(ADDED_CLASS);
            out.push_str("\">");
            out.push_str(&segment.value);
            out.push_str("</span>");
        }
        // Flagging a dropped space or newline would break paragraph structure.
        SegmentKind::Removed if segment.value.trim().is_empty() => out.push_str(&segment.value),
        SegmentKind::Removed => {
            out.push_str("<del class=\"");
            out.push_str(REMOVED_CLASS);
            out.push_str("\">");
            escape_html_into(&segment.value, out);
            out.push_str("</del>");
        }
    }
}
