//! HTTP handlers for the label collection.

use crate::{
    errors::AppError,
    handlers::{CreatedResponse, DeletedCountResponse, MessageResponse},
    models::label::{Label, NewLabel},
    services::annotation_store::AnnotationStore,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

/// POST `/labels`
pub async fn create_label(
    State(store): State<AnnotationStore>,
    payload: Result<Json<NewLabel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(label) = payload?;
    let id = store.create_label(label).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET `/labels`
pub async fn list_labels(
    State(store): State<AnnotationStore>,
) -> Result<Json<Vec<Label>>, AppError> {
    Ok(Json(store.list_labels().await?))
}

/// DELETE `/labels`
pub async fn delete_all_labels(
    State(store): State<AnnotationStore>,
) -> Result<Json<DeletedCountResponse>, AppError> {
    let deleted_count = store.delete_all_labels().await?;
    Ok(Json(DeletedCountResponse { deleted_count }))
}

/// DELETE `/labels/{name}`
pub async fn delete_label(
    State(store): State<AnnotationStore>,
    Path(label_name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    store.delete_label_by_name(&label_name).await?;
    Ok(Json(MessageResponse {
        message: "Label deleted successfully",
    }))
}
