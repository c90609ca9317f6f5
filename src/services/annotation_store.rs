//! src/services/annotation_store.rs
//!
//! AnnotationStore — image and label collections backed by SQLite. Every
//! public operation is a single statement against the pool; annotations are
//! kept as a JSON array inside their image row and are only ever appended or
//! pulled through SQLite's JSON functions, so no operation reads a document
//! back just to rewrite it.

use crate::models::{
    image::{Annotation, Image, NewImage},
    label::{Label, NewLabel},
};
use sqlx::{FromRow, SqlitePool, types::Json};
use std::{io, sync::Arc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("image `{0}` not found")]
    ImageNotFound(String),
    #[error("label `{0}` not found")]
    LabelNotFound(String),
    #[error("image `{0}` already exists")]
    Conflict(String),
    #[error("invalid file name")]
    InvalidFilename,
    #[error("collection name `{0}` is not a valid identifier")]
    InvalidCollectionName(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Table names backing the two collections.
///
/// These are spliced into SQL text, so they are restricted to plain
/// identifiers when constructed.
#[derive(Clone, Debug)]
pub struct Collections {
    images: String,
    labels: String,
}

impl Collections {
    pub fn new(images: impl Into<String>, labels: impl Into<String>) -> StoreResult<Self> {
        let images = images.into();
        let labels = labels.into();
        ensure_identifier(&images)?;
        ensure_identifier(&labels)?;
        if images == labels {
            return Err(StoreError::InvalidCollectionName(labels));
        }
        Ok(Self { images, labels })
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            images: "annotations".into(),
            labels: "labels".into(),
        }
    }
}

#[derive(FromRow)]
struct ImageRow {
    id: Uuid,
    image_name: String,
    image_url: Option<String>,
    file_path: Option<String>,
    annotations: Json<Vec<Annotation>>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: row.id,
            image_name: row.image_name,
            image_url: row.image_url,
            file_path: row.file_path,
            annotations: row.annotations.0,
        }
    }
}

/// Store client for the image and label collections.
///
/// Cheap to clone; every clone shares one pool. Handlers receive it through
/// router state rather than a global.
#[derive(Clone)]
pub struct AnnotationStore {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,

    collections: Collections,
}

impl AnnotationStore {
    pub fn new(db: Arc<SqlitePool>, collections: Collections) -> Self {
        Self { db, collections }
    }

    /// Apply the embedded schema. Safe to run on every start.
    pub async fn migrate(&self) -> StoreResult<()> {
        let sql = SCHEMA_SQL
            .replace("{images}", &self.collections.images)
            .replace("{labels}", &self.collections.labels);
        let statements = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        info!("Running {} migration statements...", statements.len());
        for stmt in statements {
            debug!("Executing migration SQL: {}", stmt);
            sqlx::query(stmt).execute(&*self.db).await?;
        }
        Ok(())
    }

    /// Round-trip a trivial query to check the store is reachable.
    pub async fn ping(&self) -> StoreResult<()> {
        let one = sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        if one != 1 {
            return Err(StoreError::Validation(format!(
                "unexpected ping result: {one}"
            )));
        }
        Ok(())
    }

    // ----- images -----

    /// Insert a new image record and return its assigned id.
    ///
    /// Name uniqueness is not checked here.
    pub async fn create_image(&self, image: NewImage) -> StoreResult<Uuid> {
        self.insert_image(image.image_name, image.image_url, None, image.annotations)
            .await
    }

    pub(crate) async fn insert_image(
        &self,
        image_name: String,
        image_url: Option<String>,
        file_path: Option<String>,
        annotations: Vec<Annotation>,
    ) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO {} (id, image_name, image_url, file_path, annotations)
             VALUES (?, ?, ?, ?, ?)",
            self.collections.images
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&image_name)
            .bind(image_url)
            .bind(file_path)
            .bind(Json(annotations))
            .execute(&*self.db)
            .await?;

        info!(%id, image_name = %image_name, "image created");
        Ok(id)
    }

    /// All images in insertion order.
    pub async fn list_images(&self) -> StoreResult<Vec<Image>> {
        let sql = format!(
            "SELECT id, image_name, image_url, file_path, annotations
             FROM {} ORDER BY rowid",
            self.collections.images
        );
        let rows: Vec<ImageRow> = sqlx::query_as(&sql).fetch_all(&*self.db).await?;
        Ok(rows.into_iter().map(Image::from).collect())
    }

    /// The `page`-th slice of `limit` images. A page past the end is empty.
    pub async fn list_images_paginated(&self, page: i64, limit: i64) -> StoreResult<Vec<Image>> {
        if page < 0 {
            return Err(StoreError::Validation("Invalid page number".into()));
        }
        if limit <= 0 {
            return Err(StoreError::Validation("Invalid limit number".into()));
        }
        let offset = page
            .checked_mul(limit)
            .ok_or_else(|| StoreError::Validation("Page offset out of range".into()))?;

        let sql = format!(
            "SELECT id, image_name, image_url, file_path, annotations
             FROM {} ORDER BY rowid LIMIT ? OFFSET ?",
            self.collections.images
        );
        let rows: Vec<ImageRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&*self.db)
            .await?;
        debug!(page, limit, returned = rows.len(), "paginated images");
        Ok(rows.into_iter().map(Image::from).collect())
    }

    /// Earliest inserted image with exactly this name, if any.
    pub async fn find_image_by_name(&self, image_name: &str) -> StoreResult<Option<Image>> {
        let sql = format!(
            "SELECT id, image_name, image_url, file_path, annotations
             FROM {} WHERE image_name = ? ORDER BY rowid LIMIT 1",
            self.collections.images
        );
        let row: Option<ImageRow> = sqlx::query_as(&sql)
            .bind(image_name)
            .fetch_optional(&*self.db)
            .await?;
        Ok(row.map(Image::from))
    }

    /// Annotations of the named image.
    ///
    /// When several images share the name, the earliest inserted one is used.
    pub async fn annotations_by_image_name(&self, image_name: &str) -> StoreResult<Vec<Annotation>> {
        let sql = format!(
            "SELECT annotations FROM {} WHERE image_name = ? ORDER BY rowid LIMIT 1",
            self.collections.images
        );
        let annotations: Option<Json<Vec<Annotation>>> = sqlx::query_scalar(&sql)
            .bind(image_name)
            .fetch_optional(&*self.db)
            .await?;
        annotations
            .map(|json| json.0)
            .ok_or_else(|| StoreError::ImageNotFound(image_name.to_string()))
    }

    /// Remove every image. Returns how many were removed.
    pub async fn delete_all_images(&self) -> StoreResult<u64> {
        let sql = format!("DELETE FROM {}", self.collections.images);
        let result = sqlx::query(&sql).execute(&*self.db).await?;
        info!(deleted = result.rows_affected(), "deleted all images");
        Ok(result.rows_affected())
    }

    /// Append one annotation to the named image's array in a single update.
    ///
    /// Duplicate `annotationId`s are accepted.
    pub async fn add_annotation(&self, image_name: &str, annotation: Annotation) -> StoreResult<()> {
        let sql = format!(
            "UPDATE {images}
             SET annotations = json_insert(annotations, '$[#]', json(?))
             WHERE id = (SELECT id FROM {images} WHERE image_name = ? ORDER BY rowid LIMIT 1)",
            images = self.collections.images
        );
        let payload = serde_json::to_string(&annotation)?;
        let result = sqlx::query(&sql)
            .bind(payload)
            .bind(image_name)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ImageNotFound(image_name.to_string()));
        }
        info!(image_name, annotation_id = %annotation.annotation_id, "annotation added");
        Ok(())
    }

    /// Pull every annotation with `annotation_id` from the named image.
    ///
    /// Succeeds whenever the image matches, whether or not anything was
    /// removed. Remaining annotations keep their order.
    pub async fn remove_annotation(&self, image_name: &str, annotation_id: &str) -> StoreResult<()> {
        let sql = format!(
            "UPDATE {images}
             SET annotations = (
                 SELECT json_group_array(json(value) ORDER BY key)
                 FROM json_each({images}.annotations)
                 WHERE json_extract(value, '$.annotationId') IS NOT ?
             )
             WHERE id = (SELECT id FROM {images} WHERE image_name = ? ORDER BY rowid LIMIT 1)",
            images = self.collections.images
        );
        let result = sqlx::query(&sql)
            .bind(annotation_id)
            .bind(image_name)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ImageNotFound(image_name.to_string()));
        }
        info!(image_name, annotation_id, "annotation removed");
        Ok(())
    }

    /// Largest numeric `annotationId` across all images, or 0.
    pub async fn highest_annotation_id(&self) -> StoreResult<i64> {
        let sql = format!(
            "SELECT COALESCE(MAX(CAST(json_extract(a.value, '$.annotationId') AS INTEGER)), 0)
             FROM {} AS i, json_each(i.annotations) AS a",
            self.collections.images
        );
        let highest: i64 = sqlx::query_scalar(&sql).fetch_one(&*self.db).await?;
        Ok(highest)
    }

    // ----- labels -----

    pub async fn create_label(&self, label: NewLabel) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO {} (id, label_name) VALUES (?, ?)",
            self.collections.labels
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&label.label_name)
            .execute(&*self.db)
            .await?;

        info!(%id, label_name = %label.label_name, "label created");
        Ok(id)
    }

    pub async fn list_labels(&self) -> StoreResult<Vec<Label>> {
        let sql = format!(
            "SELECT id, label_name FROM {} ORDER BY rowid",
            self.collections.labels
        );
        Ok(sqlx::query_as(&sql).fetch_all(&*self.db).await?)
    }

    pub async fn delete_all_labels(&self) -> StoreResult<u64> {
        let sql = format!("DELETE FROM {}", self.collections.labels);
        let result = sqlx::query(&sql).execute(&*self.db).await?;
        info!(deleted = result.rows_affected(), "deleted all labels");
        Ok(result.rows_affected())
    }

    /// Delete the earliest label called `label_name`.
    pub async fn delete_label_by_name(&self, label_name: &str) -> StoreResult<()> {
        let sql = format!(
            "DELETE FROM {labels}
             WHERE id = (SELECT id FROM {labels} WHERE label_name = ? ORDER BY rowid LIMIT 1)",
            labels = self.collections.labels
        );
        let result = sqlx::query(&sql)
            .bind(label_name)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::LabelNotFound(label_name.to_string()));
        }
        info!(label_name, "label deleted");
        Ok(())
    }
}

fn ensure_identifier(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollectionName(name.to_string()))
    }
}

/// Fresh in-memory store with the schema applied.
#[cfg(test)]
pub(crate) async fn memory_store() -> AnnotationStore {
    use sqlx::sqlite::SqlitePoolOptions;

    // One connection, otherwise each connection sees its own empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    let store = AnnotationStore::new(Arc::new(pool), Collections::default());
    store.migrate().await.expect("apply schema");
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(id: &str, label_index: i64) -> Annotation {
        Annotation {
            annotation_id: id.into(),
            label_index,
            left: 10.0,
            top: 20.0,
            width: 50.0,
            height: 60.0,
        }
    }

    fn new_image(name: &str) -> NewImage {
        NewImage {
            image_name: name.into(),
            image_url: Some(format!("http://x/{name}")),
            annotations: vec![],
        }
    }

    #[test]
    fn collection_names_must_be_identifiers() {
        assert!(Collections::new("annotations", "labels").is_ok());
        assert!(Collections::new("_imgs2", "lbl").is_ok());
        assert!(Collections::new("1images", "labels").is_err());
        assert!(Collections::new("images; DROP TABLE x", "labels").is_err());
        assert!(Collections::new("images", "").is_err());
        assert!(Collections::new("same", "same").is_err());
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let store = memory_store().await;
        store.migrate().await.unwrap();
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn created_image_is_listed() {
        let store = memory_store().await;
        let id = store.create_image(new_image("a.jpg")).await.unwrap();

        let images = store.list_images().await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, id);
        assert_eq!(images[0].image_name, "a.jpg");
        assert_eq!(images[0].image_url.as_deref(), Some("http://x/a.jpg"));
        assert!(images[0].annotations.is_empty());
        assert!(images[0].file_path.is_none());
    }

    #[tokio::test]
    async fn create_keeps_supplied_annotations() {
        let store = memory_store().await;
        let mut image = new_image("a.jpg");
        image.annotations = vec![annotation("1", 0), annotation("2", 1)];
        store.create_image(image).await.unwrap();

        let annotations = store.annotations_by_image_name("a.jpg").await.unwrap();
        assert_eq!(annotations, vec![annotation("1", 0), annotation("2", 1)]);
    }

    #[tokio::test]
    async fn pages_are_disjoint_and_bounded() {
        let store = memory_store().await;
        for i in 0..7 {
            store.create_image(new_image(&format!("{i}.jpg"))).await.unwrap();
        }

        let mut seen = Vec::new();
        for page in 0..4 {
            let slice = store.list_images_paginated(page, 3).await.unwrap();
            assert!(slice.len() <= 3);
            seen.extend(slice.into_iter().map(|img| img.image_name));
        }
        let expected: Vec<String> = (0..7).map(|i| format!("{i}.jpg")).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn page_past_end_is_empty() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();
        assert!(store.list_images_paginated(5, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_page_or_limit_is_rejected() {
        let store = memory_store().await;
        assert!(matches!(
            store.list_images_paginated(-1, 10).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.list_images_paginated(0, 0).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.list_images_paginated(i64::MAX, 2).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn annotations_of_missing_image_is_not_found() {
        let store = memory_store().await;
        assert!(matches!(
            store.annotations_by_image_name("nope.jpg").await,
            Err(StoreError::ImageNotFound(name)) if name == "nope.jpg"
        ));
    }

    #[tokio::test]
    async fn add_annotation_appends_and_preserves_existing() {
        let store = memory_store().await;
        let mut image = new_image("a.jpg");
        image.annotations = vec![annotation("1", 0), annotation("2", 3)];
        store.create_image(image).await.unwrap();

        store.add_annotation("a.jpg", annotation("3", 1)).await.unwrap();

        let annotations = store.annotations_by_image_name("a.jpg").await.unwrap();
        assert_eq!(
            annotations,
            vec![annotation("1", 0), annotation("2", 3), annotation("3", 1)]
        );
    }

    #[tokio::test]
    async fn add_annotation_accepts_duplicate_ids() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();
        store.add_annotation("a.jpg", annotation("1", 0)).await.unwrap();
        store.add_annotation("a.jpg", annotation("1", 2)).await.unwrap();

        let annotations = store.annotations_by_image_name("a.jpg").await.unwrap();
        assert_eq!(annotations.len(), 2);
    }

    #[tokio::test]
    async fn add_annotation_to_missing_image_is_not_found() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();
        assert!(matches!(
            store.add_annotation("b.jpg", annotation("1", 0)).await,
            Err(StoreError::ImageNotFound(_))
        ));
        assert!(store.annotations_by_image_name("a.jpg").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_annotation_only_touches_the_target_image() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();
        store.create_image(new_image("b.jpg")).await.unwrap();

        store.add_annotation("b.jpg", annotation("9", 0)).await.unwrap();

        assert!(store.annotations_by_image_name("a.jpg").await.unwrap().is_empty());
        assert_eq!(store.annotations_by_image_name("b.jpg").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_appends_to_one_image_all_survive() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .add_annotation("a.jpg", annotation(&i.to_string(), i))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut ids: Vec<i64> = store
            .annotations_by_image_name("a.jpg")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.annotation_id.parse().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn concurrent_removals_of_distinct_ids_all_apply() {
        let store = memory_store().await;
        let mut image = new_image("a.jpg");
        image.annotations = (0..20).map(|i| annotation(&i.to_string(), i)).collect();
        store.create_image(image).await.unwrap();

        let tasks: Vec<_> = (0..10)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.remove_annotation("a.jpg", &i.to_string()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let ids: Vec<i64> = store
            .annotations_by_image_name("a.jpg")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.annotation_id.parse().unwrap())
            .collect();
        assert_eq!(ids, (10..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn remove_annotation_pulls_every_match_and_keeps_order() {
        let store = memory_store().await;
        let mut image = new_image("a.jpg");
        image.annotations = vec![
            annotation("1", 0),
            annotation("2", 1),
            annotation("1", 2),
            annotation("3", 3),
        ];
        store.create_image(image).await.unwrap();

        store.remove_annotation("a.jpg", "1").await.unwrap();

        let annotations = store.annotations_by_image_name("a.jpg").await.unwrap();
        assert_eq!(annotations, vec![annotation("2", 1), annotation("3", 3)]);
    }

    #[tokio::test]
    async fn remove_unknown_annotation_is_a_no_op_success() {
        let store = memory_store().await;
        let mut image = new_image("a.jpg");
        image.annotations = vec![annotation("1", 0)];
        store.create_image(image).await.unwrap();

        store.remove_annotation("a.jpg", "42").await.unwrap();

        assert_eq!(
            store.annotations_by_image_name("a.jpg").await.unwrap(),
            vec![annotation("1", 0)]
        );
    }

    #[tokio::test]
    async fn removing_last_annotation_leaves_empty_array() {
        let store = memory_store().await;
        store.create_image(new_image("a.jpg")).await.unwrap();
        store.add_annotation("a.jpg", annotation("1", 0)).await.unwrap();

        store.remove_annotation("a.jpg", "1").await.unwrap();

        assert!(store.annotations_by_image_name("a.jpg").await.unwrap().is_empty());
        // the emptied array must still accept appends
        store.add_annotation("a.jpg", annotation("2", 0)).await.unwrap();
        assert_eq!(store.annotations_by_image_name("a.jpg").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_annotation_from_missing_image_is_not_found() {
        let store = memory_store().await;
        assert!(matches!(
            store.remove_annotation("a.jpg", "1").await,
            Err(StoreError::ImageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_names_resolve_to_earliest_image() {
        let store = memory_store().await;
        let first = store.create_image(new_image("dup.jpg")).await.unwrap();
        store.create_image(new_image("dup.jpg")).await.unwrap();

        store.add_annotation("dup.jpg", annotation("1", 0)).await.unwrap();

        let images = store.list_images().await.unwrap();
        assert_eq!(images[0].id, first);
        assert_eq!(images[0].annotations.len(), 1);
        assert!(images[1].annotations.is_empty());
    }

    #[tokio::test]
    async fn delete_all_images_reports_count() {
        let store = memory_store().await;
        assert_eq!(store.delete_all_images().await.unwrap(), 0);
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            store.create_image(new_image(name)).await.unwrap();
        }

        assert_eq!(store.delete_all_images().await.unwrap(), 3);
        assert!(store.list_images().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn highest_annotation_id_spans_images() {
        let store = memory_store().await;
        assert_eq!(store.highest_annotation_id().await.unwrap(), 0);

        store.create_image(new_image("a.jpg")).await.unwrap();
        store.create_image(new_image("b.jpg")).await.unwrap();
        store.add_annotation("a.jpg", annotation("4", 0)).await.unwrap();
        store.add_annotation("b.jpg", annotation("11", 0)).await.unwrap();
        store.add_annotation("b.jpg", annotation("box", 0)).await.unwrap();

        assert_eq!(store.highest_annotation_id().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn label_lifecycle() {
        let store = memory_store().await;
        let car = store
            .create_label(NewLabel {
                label_name: "car".into(),
            })
            .await
            .unwrap();
        store
            .create_label(NewLabel {
                label_name: "tree".into(),
            })
            .await
            .unwrap();

        let labels = store.list_labels().await.unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].id, car);
        assert_eq!(labels[0].label_name, "car");

        store.delete_label_by_name("car").await.unwrap();
        let names: Vec<_> = store
            .list_labels()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.label_name)
            .collect();
        assert_eq!(names, vec!["tree"]);

        assert!(matches!(
            store.delete_label_by_name("car").await,
            Err(StoreError::LabelNotFound(_))
        ));
        assert_eq!(store.delete_all_labels().await.unwrap(), 1);
        assert!(store.list_labels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn custom_collection_names_are_used() {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = AnnotationStore::new(
            Arc::new(pool),
            Collections::new("pictures", "tags").unwrap(),
        );
        store.migrate().await.unwrap();
        store.create_image(new_image("a.jpg")).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pictures")
            .fetch_one(&*store.db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
