//! Image records and the annotations embedded inside them.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A bounding-box annotation embedded in exactly one [`Image`].
///
/// Annotations have no identity of their own at the store level: they are
/// appended to and pulled from their parent's `annotations` array and never
/// mutated in place. `annotation_id` is only expected to be unique within the
/// parent image and that is not enforced.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub annotation_id: String,

    /// Positional reference into the label collection. Not validated.
    pub label_index: i64,

    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// An image record as stored and returned to clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Store-assigned identifier, immutable once created.
    pub id: Uuid,

    /// External key. Uniqueness is advisory only.
    pub image_name: String,

    /// Optional external locator for the image asset.
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,

    /// Local path of the uploaded file, set only by the upload path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Embedded annotations in insertion order.
    pub annotations: Vec<Annotation>,
}

/// Request body for `POST /images`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    pub image_name: String,

    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,

    /// Missing and `null` both mean no annotations.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: Vec<Annotation>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Annotation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Annotation>>::deserialize(deserializer)?.unwrap_or_default())
}
