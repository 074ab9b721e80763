//! Bulk post import from a tab-separated file.
//!
//! Only the header row is checked locally. The file itself is forwarded
//! untouched as the `tsv_file` multipart part; rows are validated by the
//! server, which reports failures as a single error.

use crate::error::ValidationError;
use crate::transport::FilePart;

/// Required first row of a bulk upload, in order.
pub const TSV_HEADER: [&str; 8] = [
    "opening_hook",
    "personal_question",
    "biblical_qa",
    "reflection",
    "story",
    "prayer",
    "activity_guide",
    "date_posted",
];

pub const TSV_FIELD: &str = "tsv_file";
pub const TSV_CONTENT_TYPE: &str = "text/tab-separated-values";

/// A TSV file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl TsvFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Columns of the first row, BOM and line ending stripped.
    pub fn header(&self) -> Vec<String> {
        let text = String::from_utf8_lossy(&self.bytes);
        let first = text.lines().next().unwrap_or("");
        let first = first.trim_start_matches('\u{feff}').trim_end_matches('\r');
        if first.is_empty() {
            return Vec::new();
        }
        first.split('\t').map(|col| col.trim().to_string()).collect()
    }

    /// Check the header row against [`TSV_HEADER`].
    pub fn check_header(&self) -> Result<(), ValidationError> {
        if self.bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ValidationError::EmptyFile);
        }
        let found = self.header();
        if found.iter().map(String::as_str).eq(TSV_HEADER.iter().copied()) {
            Ok(())
        } else {
            Err(ValidationError::TsvHeader {
                expected: TSV_HEADER.iter().map(|s| s.to_string()).collect(),
                found,
            })
        }
    }

    pub fn to_part(&self) -> FilePart {
        FilePart {
            field: TSV_FIELD.to_string(),
            file_name: self.file_name.clone(),
            content_type: TSV_CONTENT_TYPE.to_string(),
            bytes: self.bytes.clone(),
        }
    }
}
