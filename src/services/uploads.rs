//! File uploads stored on local disk under the configured upload root
//!
//! Layout: `<root>/<type>/<extension>/<name>-<millis>.<extension>` for content
//! files, `<root>/thumbnails/` and `<root>/previews/` for images.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use super::slug::slugify;
use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
    models::{
        enums::MultimediaType,
        upload::{FileEntry, UploadedFile},
    },
};

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/svg+xml"];

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// MIME types accepted for each multimedia type
pub fn allowed_mime_types(kind: MultimediaType) -> &'static [&'static str] {
    match kind {
        MultimediaType::Infografia => &[
            "image/jpeg",
            "image/jpg",
            "image/png",
            "image/svg+xml",
            "application/pdf",
        ],
        MultimediaType::Video => &["video/mp4", "video/avi", "video/quicktime", "video/x-msvideo"],
        MultimediaType::Arte => &[
            "image/jpeg",
            "image/jpg",
            "image/png",
            "image/svg+xml",
            "image/gif",
        ],
        MultimediaType::Presentacion => &[
            "application/pdf",
            "application/vnd.ms-powerpoint",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ],
    }
}

/// `1536` -> `1.5 KB`, two decimals at most
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Lower-case extension of a client file name, without the dot
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Stored file name: slugified stem, a millisecond timestamp, the extension
pub fn stored_name(original: &str, millis: i64) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut stem = slugify(stem).replace('_', "-");
    if stem.is_empty() {
        stem = "file".to_string();
    }
    let ext = extension_of(original);
    if ext.is_empty() {
        format!("{}-{}", stem, millis)
    } else {
        format!("{}-{}.{}", stem, millis, ext)
    }
}

/// Join a client-supplied relative path onto `root`.
///
/// Only plain path segments are accepted; `..`, absolute paths and prefixes
/// are refused so the result always stays under `root`.
pub fn resolve_within(root: &Path, relative: &str) -> AppResult<PathBuf> {
    let mut path = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => {
                return Err(AppError::Forbidden(
                    "Access denied: path escapes the upload directory".to_string(),
                ))
            }
        }
    }
    Ok(path)
}

/// A file received from a multipart request
#[derive(Debug)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct UploadsService {
    config: UploadsConfig,
}

impl UploadsService {
    pub fn new(config: UploadsConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.dir
    }

    fn public_url(&self, relative: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_prefix.trim_end_matches('/'),
            relative
        )
    }

    /// Store a content file under its multimedia type and extension
    pub async fn store_file(&self, kind: Option<&str>, file: IncomingFile) -> AppResult<UploadedFile> {
        let kind = kind
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Validation("The multimedia type is required".to_string()))?;
        let kind: MultimediaType = kind.parse()?;

        let allowed = allowed_mime_types(kind);
        if !allowed.contains(&file.content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "File type not allowed for {}: {}. Allowed types: {}",
                kind,
                file.content_type,
                allowed.join(", ")
            )));
        }
        self.check_size(&file, self.config.max_file_bytes)?;

        let ext = extension_of(&file.original_name);
        let mut dir = vec![kind.as_str().to_string()];
        if !ext.is_empty() {
            dir.push(ext.clone());
        }

        let mut stored = self.write(&dir, &file).await?;
        stored.format = Some(ext.to_uppercase());
        Ok(stored)
    }

    /// Store a thumbnail, or a preview image when `kind` is `preview`
    pub async fn store_thumbnail(
        &self,
        kind: Option<&str>,
        file: IncomingFile,
    ) -> AppResult<UploadedFile> {
        if !IMAGE_TYPES.contains(&file.content_type.as_str()) {
            return Err(AppError::Validation(
                "Only images are allowed for thumbnails and previews".to_string(),
            ));
        }
        self.check_size(&file, self.config.max_image_bytes)?;

        let folder = match kind {
            Some("preview") => "previews",
            _ => "thumbnails",
        };
        self.write(&[folder.to_string()], &file).await
    }

    fn check_size(&self, file: &IncomingFile, max: usize) -> AppResult<()> {
        if file.data.is_empty() {
            return Err(AppError::Validation("No file received".to_string()));
        }
        if file.data.len() > max {
            return Err(AppError::Validation(format!(
                "File exceeds the maximum size of {}",
                format_file_size(max as u64)
            )));
        }
        Ok(())
    }

    async fn write(&self, dir: &[String], file: &IncomingFile) -> AppResult<UploadedFile> {
        let filename = stored_name(&file.original_name, Utc::now().timestamp_millis());
        let mut segments = dir.to_vec();
        segments.push(filename.clone());
        let relative = segments.join("/");

        let target = resolve_within(self.root(), &relative)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &file.data).await?;

        tracing::info!(
            path = %relative,
            bytes = file.data.len(),
            mimetype = %file.content_type,
            "file uploaded"
        );

        Ok(UploadedFile {
            filename,
            original_name: file.original_name.clone(),
            url: self.public_url(&relative),
            path: relative,
            size: format_file_size(file.data.len() as u64),
            format: None,
            mimetype: file.content_type.clone(),
            duration: None,
        })
    }

    /// Directory tree of the upload root, or of one of its folders
    pub async fn list(&self, kind: Option<&str>) -> AppResult<Vec<FileEntry>> {
        let prefix = kind.filter(|k| !k.trim().is_empty()).unwrap_or_default();
        let start = resolve_within(self.root(), prefix)?;
        let public_prefix = self.config.public_prefix.trim_end_matches('/').to_string();
        let base = prefix.trim_matches('/').to_string();

        let entries = tokio::task::spawn_blocking(move || scan(&start, &base, &public_prefix))
            .await
            .map_err(|e| AppError::Internal(format!("file listing task failed: {}", e)))?;

        Ok(entries)
    }

    /// Remove a stored file given its path relative to the upload root
    pub async fn delete(&self, relative: &str) -> AppResult<()> {
        let path = self.existing_file(relative).await?;
        tokio::fs::remove_file(&path).await?;
        tracing::info!(path = %relative, "file deleted");
        Ok(())
    }

    /// Locate a file for a forced download
    pub async fn download_path(&self, kind: &str, format: &str, filename: &str) -> AppResult<PathBuf> {
        for segment in [kind, format, filename] {
            if segment.contains('/') || segment.contains('\\') {
                return Err(AppError::Forbidden(
                    "Access denied: path escapes the upload directory".to_string(),
                ));
            }
        }
        self.existing_file(&format!("{}/{}/{}", kind, format, filename))
            .await
    }

    async fn existing_file(&self, relative: &str) -> AppResult<PathBuf> {
        if relative.trim_matches('/').is_empty() {
            return Err(AppError::Validation("A file path is required".to_string()));
        }
        let path = resolve_within(self.root(), relative)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(AppError::Validation(format!("'{}' is not a file", relative))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File '{}' not found", relative)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Walk `dir` recursively. Unreadable or missing directories list as empty.
fn scan(dir: &Path, relative: &str, public_prefix: &str) -> Vec<FileEntry> {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = if relative.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", relative, name)
        };
        let Ok(meta) = entry.metadata() else {
            continue;
        };

        if meta.is_dir() {
            let children = scan(&entry.path(), &path, public_prefix);
            entries.push(FileEntry::Directory {
                name,
                path,
                children,
            });
        } else {
            entries.push(FileEntry::File {
                url: format!("{}/{}", public_prefix, path),
                size: format_file_size(meta.len()),
                size_bytes: meta.len(),
                format: extension_of(&name).to_uppercase(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
                name,
                path,
            });
        }
    }
    entries.sort_by(|a, b| entry_name(a).cmp(entry_name(b)));
    entries
}

fn entry_name(entry: &FileEntry) -> &str {
    match entry {
        FileEntry::Directory { name, .. } | FileEntry::File { name, .. } => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 + 1), "5 GB");
    }

    #[test]
    fn test_stored_name() {
        assert_eq!(
            stored_name("Mapa Electoral 2025.PNG", 1718000000000),
            "mapa-electoral-2025-1718000000000.png"
        );
        assert_eq!(stored_name("???.pdf", 1), "file-1.pdf");
        assert_eq!(stored_name("README", 7), "readme-7");
    }

    #[test]
    fn test_video_mime_rules() {
        let video = allowed_mime_types(MultimediaType::Video);
        assert!(video.contains(&"video/mp4"));
        assert!(!video.contains(&"image/png"));
        assert!(allowed_mime_types(MultimediaType::Arte).contains(&"image/gif"));
        assert!(!allowed_mime_types(MultimediaType::Infografia).contains(&"image/gif"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = Path::new("/srv/uploads");
        assert_eq!(
            resolve_within(root, "video/mp4/a.mp4").unwrap(),
            PathBuf::from("/srv/uploads/video/mp4/a.mp4")
        );
        assert!(matches!(
            resolve_within(root, "../etc/passwd"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            resolve_within(root, "video/../../x"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            resolve_within(root, "/etc/passwd"),
            Err(AppError::Forbidden(_))
        ));
    }

    fn service(dir: &Path) -> UploadsService {
        UploadsService::new(UploadsConfig {
            dir: dir.to_path_buf(),
            ..UploadsConfig::default()
        })
    }

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "coalicion-uploads-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_store_list_and_delete() {
        let root = temp_root("roundtrip");
        let uploads = service(&root);

        let stored = uploads
            .store_file(
                Some("infografia"),
                IncomingFile {
                    original_name: "Resultados.pdf".into(),
                    content_type: "application/pdf".into(),
                    data: vec![1, 2, 3],
                },
            )
            .await
            .unwrap();
        assert!(stored.path.starts_with("infografia/pdf/resultados-"));
        assert!(stored.url.starts_with("/uploads/infografia/pdf/"));
        assert_eq!(stored.format.as_deref(), Some("PDF"));
        assert_eq!(stored.size, "3 Bytes");

        let tree = uploads.list(Some("infografia")).await.unwrap();
        assert_eq!(tree.len(), 1);
        match &tree[0] {
            FileEntry::Directory { name, children, .. } => {
                assert_eq!(name, "pdf");
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected directory, got {:?}", other),
        }

        uploads.delete(&stored.path).await.unwrap();
        assert!(matches!(
            uploads.delete(&stored.path).await,
            Err(AppError::NotFound(_))
        ));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_rejects_wrong_mime_for_type() {
        let root = temp_root("mime");
        let uploads = service(&root);
        let err = uploads
            .store_file(
                Some("video"),
                IncomingFile {
                    original_name: "foto.png".into(),
                    content_type: "image/png".into(),
                    data: vec![0; 10],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!root.join("video").exists());
    }

    #[tokio::test]
    async fn test_missing_type_is_rejected() {
        let uploads = service(&temp_root("notype"));
        let err = uploads
            .store_file(
                None,
                IncomingFile {
                    original_name: "a.pdf".into(),
                    content_type: "application/pdf".into(),
                    data: vec![1],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_preview_goes_to_previews() {
        let root = temp_root("preview");
        let uploads = service(&root);
        let stored = uploads
            .store_thumbnail(
                Some("preview"),
                IncomingFile {
                    original_name: "portada.jpg".into(),
                    content_type: "image/jpeg".into(),
                    data: vec![9; 4],
                },
            )
            .await
            .unwrap();
        assert!(stored.path.starts_with("previews/portada-"));
        assert!(stored.format.is_none());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_list_missing_root_is_empty() {
        let uploads = service(&temp_root("empty"));
        assert!(uploads.list(None).await.unwrap().is_empty());
    }
}
