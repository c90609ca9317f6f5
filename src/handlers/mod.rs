//! HTTP handlers. Each one parses its request, makes a single service call
//! and maps the outcome onto a status code and JSON body.

use serde::Serialize;
use uuid::Uuid;

pub mod health_handlers;
pub mod image_handlers;
pub mod label_handlers;
pub mod upload_handlers;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCountResponse {
    pub deleted_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
