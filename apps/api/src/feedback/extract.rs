//! Text extraction from uploaded résumé files.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    /// Plain text or Markdown.
    Text,
}

impl UploadKind {
    /// Classifies an upload by content type, falling back to the file extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, AppError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/pdf" => return Ok(UploadKind::Pdf),
            m if m.starts_with("text/") => return Ok(UploadKind::Text),
            _ => {}
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(UploadKind::Pdf),
            "txt" | "md" | "markdown" => Ok(UploadKind::Text),
            _ => Err(AppError::Validation(
                "Invalid file type. Please upload a PDF.".to_string(),
            )),
        }
    }
}

/// Extracts the résumé text. PDF parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_text(kind: UploadKind, data: Bytes) -> Result<String, AppError> {
    let raw = match kind {
        UploadKind::Pdf => {
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| {
                // pdf-extract panics on some malformed documents
                if e.is_panic() {
                    AppError::UnprocessableEntity("Could not read PDF".to_string())
                } else {
                    AppError::Internal(e.into())
                }
            })?
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?
        }
        UploadKind::Text => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("Text résumés must be UTF-8 encoded".to_string()))?,
    };

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the uploaded file.".to_string(),
        ));
    }

    debug!(chars = text.chars().count(), ?kind, "Extracted résumé text");
    Ok(text)
}

/// Normalizes line endings, strips trailing spaces on each line and collapses
/// runs of more than one blank line.
fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
