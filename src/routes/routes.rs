//! Defines routes for all image, label and upload operations.
//!
//! ## Structure
//! - **Image endpoints**
//!   - `GET    /images` — list every image
//!   - `GET    /images/paginated?page&limit` — one page of images
//!   - `GET    /images/annotationCount` — highest annotation id in use
//!   - `POST   /images` — create an image record
//!   - `DELETE /images` — delete every image
//!   - `GET    /images/{name}/annotations` — annotations of one image
//!   - `POST   /images/{name}/annotations` — append an annotation
//!   - `DELETE /images/{name}/annotations/{annotationId}` — pull an annotation
//!
//! - **Label endpoints**
//!   - `GET | POST | DELETE /labels`
//!   - `DELETE /labels/{name}`
//!
//! - **Upload endpoints**
//!   - `POST   /upload` — multipart image upload
//!   - `GET    /uploads/{name}` — stream an uploaded file
//!   - `DELETE /uploads` — remove every uploaded file and image record

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        image_handlers::{
            add_annotation, create_image, delete_all_images, get_annotations,
            highest_annotation_id, list_images, list_images_paginated, remove_annotation,
        },
        label_handlers::{create_label, delete_all_labels, delete_label, list_labels},
        upload_handlers::{delete_all_uploads, serve_image, upload_image},
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Build and return the router for every endpoint.
///
/// `max_upload_bytes` bounds the body of `POST /upload` only; other routes
/// keep axum's default limit.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Image routes
        .route(
            "/images",
            get(list_images).post(create_image).delete(delete_all_images),
        )
        .route("/images/paginated", get(list_images_paginated))
        .route("/images/annotationCount", get(highest_annotation_id))
        .route(
            "/images/{name}/annotations",
            get(get_annotations).post(add_annotation),
        )
        .route(
            "/images/{name}/annotations/{annotation_id}",
            delete(remove_annotation),
        )
        // Label routes
        .route(
            "/labels",
            get(list_labels).post(create_label).delete(delete_all_labels),
        )
        .route("/labels/{name}", delete(delete_label))
        // Upload routes
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/uploads", delete(delete_all_uploads))
        .route("/uploads/{name}", get(serve_image))
        .layer(TraceLayer::new_for_http())
}
