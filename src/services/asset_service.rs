//! src/services/asset_service.rs
//!
//! AssetService — uploaded image files on local disk, linked to image records
//! in the [`AnnotationStore`]. Files live flat under `base_path`, keyed by
//! their original filename.

use crate::{
    models::image::Image,
    services::annotation_store::{AnnotationStore, StoreError, StoreResult},
};
use bytes::Bytes;
use futures::{Stream, StreamExt, pin_mut};
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

const MAX_FILENAME_LEN: usize = 255;

/// Counts reported by [`AssetService::delete_all_assets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub deleted_files: u64,
    pub deleted_images: u64,
}

#[derive(Clone)]
pub struct AssetService {
    store: AnnotationStore,

    /// Directory holding uploaded files.
    pub base_path: PathBuf,
}

impl AssetService {
    pub fn new(store: AnnotationStore, base_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            base_path: base_path.into(),
        }
    }

    /// Reject names that could escape `base_path` or collide with temp files.
    fn ensure_filename_safe(name: &str) -> StoreResult<()> {
        if name.is_empty() || name.len() > MAX_FILENAME_LEN {
            return Err(StoreError::InvalidFilename);
        }
        if name.starts_with('.') {
            return Err(StoreError::InvalidFilename);
        }
        if name
            .bytes()
            .any(|b| b.is_ascii_control() || b == b'/' || b == b'\\')
        {
            return Err(StoreError::InvalidFilename);
        }
        Ok(())
    }

    /// Deterministic on-disk location for an uploaded filename.
    fn asset_path(&self, filename: &str) -> PathBuf {
        self.base_path.join(filename)
    }

    /// Store an uploaded file and record it as a new image.
    ///
    /// - Fails with `Conflict` if an image with this name already exists.
    /// - Streams into a temp file, fsyncs, then renames into place.
    /// - Confirms the file exists before inserting the image record.
    /// - Removes the file again if the insert fails.
    ///
    /// The existence check and the insert are separate statements, so two
    /// simultaneous uploads of one name can both pass the check.
    pub async fn upload_image<S>(&self, filename: &str, stream: S) -> StoreResult<Image>
    where
        S: Stream<Item = io::Result<Bytes>>,
    {
        Self::ensure_filename_safe(filename)?;
        if self.store.find_image_by_name(filename).await?.is_some() {
            return Err(StoreError::Conflict(filename.to_string()));
        }

        fs::create_dir_all(&self.base_path).await?;
        let file_path = self.asset_path(filename);
        let tmp_path = self.base_path.join(format!(".tmp-{}", Uuid::new_v4()));
        let mut file = File::create(&tmp_path).await?;

        let mut size_bytes: u64 = 0;
        pin_mut!(stream);
        while let Some(chunk_res) = stream.next().await {
            let chunk = match chunk_res {
                Ok(chunk) => chunk,
                Err(err) => {
                    let _ = fs::remove_file(&tmp_path).await;
                    return Err(StoreError::Io(err));
                }
            };
            size_bytes += chunk.len() as u64;
            if let Err(err) = file.write_all(&chunk).await {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StoreError::Io(err));
            }
        }
        if let Err(err) = file.flush().await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(err));
        }
        if let Err(err) = file.sync_all().await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(err));
        }
        drop(file);

        if let Err(err) = fs::rename(&tmp_path, &file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(err));
        }

        if !fs::try_exists(&file_path).await? {
            return Err(StoreError::Io(io::Error::new(
                ErrorKind::NotFound,
                format!("upload {} missing after write", file_path.display()),
            )));
        }
        debug!(path = %file_path.display(), size_bytes, "upload written");

        let path_str = file_path.to_string_lossy().into_owned();
        let insert = self
            .store
            .insert_image(filename.to_string(), None, Some(path_str.clone()), Vec::new())
            .await;

        match insert {
            Ok(id) => {
                info!(%id, filename, size_bytes, "image uploaded");
                Ok(Image {
                    id,
                    image_name: filename.to_string(),
                    image_url: None,
                    file_path: Some(path_str),
                    annotations: Vec::new(),
                })
            }
            Err(err) => {
                warn!(filename, "image insert failed after upload, removing file");
                let _ = fs::remove_file(&file_path).await;
                Err(err)
            }
        }
    }

    /// Resolve an image name to its stored file, opened for streaming.
    ///
    /// Returns `ImageNotFound` if no record matches, the record has no file,
    /// or the recorded file is missing on disk.
    pub async fn open_image(&self, name: &str) -> StoreResult<(Image, File)> {
        let image = self
            .store
            .find_image_by_name(name)
            .await?
            .ok_or_else(|| StoreError::ImageNotFound(name.to_string()))?;
        let path = image
            .file_path
            .clone()
            .ok_or_else(|| StoreError::ImageNotFound(name.to_string()))?;

        let file = File::open(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::ImageNotFound(name.to_string())
            } else {
                StoreError::Io(err)
            }
        })?;
        Ok((image, file))
    }

    /// Remove every file under `base_path`, then every image record.
    ///
    /// The two steps are independent; a failure between them leaves files
    /// and records out of step.
    pub async fn delete_all_assets(&self) -> StoreResult<PurgeReport> {
        let deleted_files = match remove_files_in(&self.base_path).await {
            Ok(count) => count,
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(err) => return Err(StoreError::Io(err)),
        };
        let deleted_images = self.store.delete_all_images().await?;

        info!(deleted_files, deleted_images, "purged uploads");
        Ok(PurgeReport {
            deleted_files,
            deleted_images,
        })
    }
}

/// Delete the regular files directly inside `dir`. Subdirectories are left alone.
async fn remove_files_in(dir: &Path) -> io::Result<u64> {
    let mut entries = fs::read_dir(dir).await?;
    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        match fs::remove_file(entry.path()).await {
            Ok(_) => removed += 1,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("file {} already missing", entry.path().display());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(removed)
}

/// Content type for a served file, from its extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
