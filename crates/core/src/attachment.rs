//! Attachment records and file-kind presentation rules.

use serde::{Deserialize, Serialize};

/// An embeddable attachment: either a hosted URL or an inline data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Content URL or `data:` URI.
    pub content: String,
}

/// A user-chosen file before conversion to an embeddable [`Attachment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// An attachment slot in the wizard composer.
///
/// The composer shows the file immediately and marks it uploading until
/// the conversion resolves; the upload step cannot be advanced while any
/// slot is still uploading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub file: FileData,
    pub uploaded: Option<Attachment>,
}

impl PendingAttachment {
    pub fn new(file: FileData) -> Self {
        Self {
            file,
            uploaded: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploaded.is_none()
    }
}

// ---------------------------------------------------------------------------
// File kinds
// ---------------------------------------------------------------------------

/// The fixed set of file-type presentations the timeline and review
/// surfaces render attachments as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Pdf,
    Document,
    Spreadsheet,
    Archive,
    Other,
}

impl FileKind {
    /// Classify a file by mime type first, then by extension.
    pub fn sniff(name: &str, mime_type: &str) -> Self {
        let mime = mime_type.to_ascii_lowercase();
        if mime.starts_with("image/") {
            return Self::Image;
        }
        if mime == "application/pdf" {
            return Self::Pdf;
        }

        let ext = name
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => Self::Image,
            "pdf" => Self::Pdf,
            "doc" | "docx" | "txt" | "rtf" | "md" => Self::Document,
            "xls" | "xlsx" | "csv" => Self::Spreadsheet,
            "zip" | "rar" | "7z" | "tar" | "gz" => Self::Archive,
            _ => Self::Other,
        }
    }
}
