//! HTTP handlers for image records and their embedded annotations.

use crate::{
    errors::AppError,
    handlers::{CreatedResponse, DeletedCountResponse, MessageResponse},
    models::image::{Annotation, Image, NewImage},
    services::annotation_store::AnnotationStore,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Query params accepted by `GET /images/paginated`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestAnnotationIdResponse {
    pub highest_annotation_id: i64,
}

/// POST `/images` — insert an image record.
pub async fn create_image(
    State(store): State<AnnotationStore>,
    payload: Result<Json<NewImage>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(image) = payload?;
    let id = store.create_image(image).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET `/images` — every image, unfiltered.
pub async fn list_images(
    State(store): State<AnnotationStore>,
) -> Result<Json<Vec<Image>>, AppError> {
    Ok(Json(store.list_images().await?))
}

/// GET `/images/paginated?page=&limit=` — `page` defaults to 0, `limit` to 10.
pub async fn list_images_paginated(
    State(store): State<AnnotationStore>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Image>>, AppError> {
    let Query(q) = query?;
    let images = store
        .list_images_paginated(q.page.unwrap_or(0), q.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
        .await?;
    Ok(Json(images))
}

/// GET `/images/{name}/annotations`
pub async fn get_annotations(
    State(store): State<AnnotationStore>,
    Path(image_name): Path<String>,
) -> Result<Json<Vec<Annotation>>, AppError> {
    Ok(Json(store.annotations_by_image_name(&image_name).await?))
}

/// GET `/images/annotationCount` — highest numeric annotation id in use.
pub async fn highest_annotation_id(
    State(store): State<AnnotationStore>,
) -> Result<Json<HighestAnnotationIdResponse>, AppError> {
    let highest_annotation_id = store.highest_annotation_id().await?;
    Ok(Json(HighestAnnotationIdResponse {
        highest_annotation_id,
    }))
}

/// DELETE `/images` — remove every image record.
pub async fn delete_all_images(
    State(store): State<AnnotationStore>,
) -> Result<Json<DeletedCountResponse>, AppError> {
    let deleted_count = store.delete_all_images().await?;
    Ok(Json(DeletedCountResponse { deleted_count }))
}

/// POST `/images/{name}/annotations` — append one annotation.
pub async fn add_annotation(
    State(store): State<AnnotationStore>,
    Path(image_name): Path<String>,
    payload: Result<Json<Annotation>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(annotation) = payload?;
    store.add_annotation(&image_name, annotation).await?;
    Ok(Json(MessageResponse {
        message: "Annotation added successfully",
    }))
}

/// DELETE `/images/{name}/annotations/{annotationId}`
///
/// Reports success for any existing image, even if no annotation had the id.
pub async fn remove_annotation(
    State(store): State<AnnotationStore>,
    Path((image_name, annotation_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    store.remove_annotation(&image_name, &annotation_id).await?;
    Ok(Json(MessageResponse {
        message: "Annotation deleted successfully",
    }))
}
