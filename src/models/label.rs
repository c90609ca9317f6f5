//! Label records referenced by annotations through `labelIndex`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: Uuid,

    /// Human-readable label text, also the key used for deletion.
    pub label_name: String,
}

/// Request body for `POST /labels`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
    pub label_name: String,
}
