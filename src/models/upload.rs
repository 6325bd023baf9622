//! Uploaded file descriptors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A file stored under the upload root
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Generated file name on disk
    pub filename: String,
    /// Name the client sent
    pub original_name: String,
    /// Public URL, e.g. `/uploads/video/mp4/spot-1718000000000.mp4`
    pub url: String,
    /// Path relative to the upload root
    pub path: String,
    /// Human readable size, e.g. `1.5 MB`
    pub size: String,
    /// Upper-case extension; absent for thumbnails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub mimetype: String,
    /// Media duration; not read from the file, always null
    pub duration: Option<String>,
}

/// Entry of the upload directory tree
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileEntry {
    Directory {
        name: String,
        path: String,
        children: Vec<FileEntry>,
    },
    File {
        name: String,
        path: String,
        url: String,
        size: String,
        #[serde(rename = "sizeBytes")]
        size_bytes: u64,
        format: String,
        modified: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FileListQuery {
    /// Restrict the listing to one upload folder (e.g. `video`)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
