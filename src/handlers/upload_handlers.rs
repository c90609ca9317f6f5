//! HTTP handlers for uploaded image files.
//! Streams bodies in both directions and delegates disk and record handling
//! to `AssetService`.

use crate::{
    errors::AppError,
    services::{
        annotation_store::StoreError,
        asset_service::{AssetService, content_type_for},
    },
};
use axum::{
    Json,
    body::Body,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use futures::TryStreamExt;
use serde::Serialize;
use std::io;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Multipart field names accepted for the uploaded file.
const FILE_FIELDS: [&str; 2] = ["image", "file"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub deleted_files: u64,
    pub deleted_count: u64,
}

/// POST `/upload` — multipart upload of one image file.
///
/// The first `image` (or `file`) field is stored under its filename; other
/// fields are ignored.
pub async fn upload_image(
    State(assets): State<AssetService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        let is_file = field
            .name()
            .is_some_and(|name| FILE_FIELDS.contains(&name));
        if !is_file {
            debug!("skipping multipart field {:?}", field.name());
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::bad_request("Uploaded file has no filename"))?;
        let stream = field.map_err(io::Error::other);

        let image = assets
            .upload_image(&filename, stream)
            .await
            .map_err(upload_error)?;
        let file_path = image.file_path.unwrap_or_default();
        return Ok(Json(UploadResponse { file_path }));
    }

    Err(AppError::bad_request("Missing image file in multipart form"))
}

/// Surface body errors (size limit, malformed part) with their own status
/// instead of as an I/O failure.
fn upload_error(err: StoreError) -> AppError {
    match err {
        StoreError::Io(io_err) if io_err.get_ref().is_some_and(|e| e.is::<MultipartError>()) => {
            match io_err.into_inner().map(|e| e.downcast::<MultipartError>()) {
                Some(Ok(multipart_err)) => AppError::from(*multipart_err),
                _ => AppError::bad_request("Malformed upload body"),
            }
        }
        other => AppError::from(other),
    }
}

/// GET `/uploads/{name}` — stream a previously uploaded file.
pub async fn serve_image(
    State(assets): State<AssetService>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let (image, file) = assets.open_image(&name).await?;
    let len = file.metadata().await.map_err(StoreError::Io)?.len();
    let body = Body::from_stream(ReaderStream::new(file));

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(&image.image_name)),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    Ok(response)
}

/// DELETE `/uploads` — remove every uploaded file, then every image record.
pub async fn delete_all_uploads(
    State(assets): State<AssetService>,
) -> Result<Json<PurgeResponse>, AppError> {
    let report = assets.delete_all_assets().await?;
    Ok(Json(PurgeResponse {
        deleted_files: report.deleted_files,
        deleted_count: report.deleted_images,
    }))
}
