//! Upload endpoints: multipart storage, directory listing, removal and
//! forced download of stored files

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::{Multipart, WithRejection};
use tokio_util::io::ReaderStream;

use crate::{
    error::{AppError, AppResult},
    models::{
        upload::{FileEntry, FileListQuery, UploadedFile},
        ApiResponse,
    },
    services::uploads::IncomingFile,
    AppState,
};

/// Multipart form content: the `file` part and the optional `type` text part
struct UploadForm {
    file: Option<IncomingFile>,
    kind: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm {
            file: None,
            kind: None,
        };

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let original_name = field.file_name().unwrap_or("file").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await?.to_vec();
                    form.file = Some(IncomingFile {
                        original_name,
                        content_type,
                        data,
                    });
                }
                "type" => form.kind = Some(field.text().await?),
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_parts(self, missing: &str) -> AppResult<(Option<String>, IncomingFile)> {
        let file = self
            .file
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;
        Ok((self.kind, file))
    }
}

/// Upload a content file for a multimedia type
#[utoipa::path(
    post,
    path = "/uploads/file",
    tag = "uploads",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "`file` part and `type` field"),
    responses(
        (status = 200, description = "File stored", body = UploadedFile),
        (status = 400, description = "Missing file or type, disallowed MIME type or too large", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    let (kind, file) = UploadForm::read(multipart)
        .await?
        .into_parts("No file received")?;
    let stored = state
        .services
        .uploads
        .store_file(kind.as_deref(), file)
        .await?;
    Ok(Json(ApiResponse::ok("File uploaded", stored)))
}

/// Upload a thumbnail, or a preview image with `type=preview`
#[utoipa::path(
    post,
    path = "/uploads/thumbnail",
    tag = "uploads",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "`file` image part and optional `type` field"),
    responses(
        (status = 200, description = "Image stored", body = UploadedFile),
        (status = 400, description = "Missing or non-image file", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    let (kind, file) = UploadForm::read(multipart)
        .await?
        .into_parts("No image received")?;
    let stored = state
        .services
        .uploads
        .store_thumbnail(kind.as_deref(), file)
        .await?;
    Ok(Json(ApiResponse::ok("Image uploaded", stored)))
}

/// Directory tree of stored files
#[utoipa::path(
    get,
    path = "/uploads/files",
    tag = "uploads",
    params(FileListQuery),
    responses(
        (status = 200, description = "Directory tree"),
        (status = 403, description = "Folder outside the upload root", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<FileListQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<FileEntry>>>> {
    let entries = state.services.uploads.list(query.kind.as_deref()).await?;
    Ok(Json(ApiResponse::ok("Files retrieved", entries)))
}

#[utoipa::path(
    delete,
    path = "/uploads/files/{filepath}",
    tag = "uploads",
    params(("filepath" = String, Path, description = "Path relative to the upload root")),
    responses(
        (status = 200, description = "File deleted"),
        (status = 403, description = "Path outside the upload root", body = crate::error::ErrorResponse),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    WithRejection(Path(filepath), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<ApiResponse<String>>> {
    state.services.uploads.delete(&filepath).await?;
    Ok(Json(ApiResponse::ok("File deleted", filepath)))
}

/// Stream a stored file as an attachment
#[utoipa::path(
    get,
    path = "/uploads/download/{type}/{format}/{filename}",
    tag = "uploads",
    params(
        ("type" = String, Path, description = "Upload folder, e.g. video"),
        ("format" = String, Path, description = "Extension folder, e.g. mp4"),
        ("filename" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn download(
    State(state): State<AppState>,
    WithRejection(Path((kind, format, filename)), _): WithRejection<
        Path<(String, String, String)>,
        AppError,
    >,
) -> AppResult<Response> {
    let path = state
        .services
        .uploads
        .download_path(&kind, &format, &filename)
        .await?;
    let file = tokio::fs::File::open(&path).await?;
    let size = file.metadata().await?.len();

    Ok(attachment(&filename, size, Body::from_stream(ReaderStream::new(file))))
}

/// Forced-download response around an already opened body
fn attachment(filename: &str, size: u64, body: Body) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_LENGTH, size.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename.replace('"', "")),
        ),
    ];
    (headers, body).into_response()
}

/// Upload routes; `max_body` bounds multipart bodies
pub fn router(max_body: usize) -> Router<AppState> {
    Router::new()
        .route("/file", post(upload_file))
        .route("/thumbnail", post(upload_thumbnail))
        .route("/files", get(list_files))
        .route("/files/*filepath", delete(delete_file))
        .route("/download/:type/:format/:filename", get(download))
        .layer(DefaultBodyLimit::max(max_body))
}
