use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        common::{non_blank, SearchQuery},
        media::{
            generate_object_path, IncomingFile, MediaInsert, MediaResponse, MediaUpdateRequest,
            UploadOutcome, UploadReport,
        },
    },
    errors::AppError,
    repositories::media::MediaRepository,
    storage::{object_path_from_url, MediaStorage},
    utils::valid_uuid::valid_uuid,
};

const FALLBACK_MIME: &str = "application/octet-stream";

pub struct MediaHandler<R, S>
where
    R: MediaRepository,
    S: MediaStorage,
{
    pub media_repo: R,
    pub storage: S,
    pub max_file_bytes: usize,
}

impl<R, S> MediaHandler<R, S>
where
    R: MediaRepository,
    S: MediaStorage,
{
    pub fn new(media_repo: R, storage: S, max_file_bytes: usize) -> Self {
        MediaHandler { media_repo, storage, max_file_bytes }
    }

    pub async fn list(&self, query: &SearchQuery) -> Result<Vec<MediaResponse>, AppError> {
        let items = self.media_repo.list(query.term()).await?;
        Ok(items.into_iter().map(MediaResponse::from).collect())
    }

    /// Stores each file in turn. A failed file is reported in its own
    /// outcome and earlier uploads are kept.
    pub async fn upload(&self, files: Vec<IncomingFile>, uploaded_by: Option<Uuid>) -> UploadReport {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            let file_name = file.original_name.clone();
            let outcome = match self.upload_one(file, uploaded_by).await {
                Ok(media) => UploadOutcome { file_name, success: true, media: Some(media), error: None },
                Err(e) => {
                    tracing::warn!(file = %file_name, "Upload failed: {}", e);
                    UploadOutcome { file_name, success: false, media: None, error: Some(e.to_string()) }
                }
            };
            outcomes.push(outcome);
        }

        let report = UploadReport::from_outcomes(outcomes);
        tracing::info!(uploaded = report.uploaded, failed = report.failed, "Media upload finished");
        report
    }

    async fn upload_one(&self, file: IncomingFile, uploaded_by: Option<Uuid>) -> Result<MediaResponse, AppError> {
        if file.size > self.max_file_bytes {
            return Err(AppError::InvalidInput(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_file_bytes
            )));
        }

        let file_type = resolve_mime(&file);
        let object_path = generate_object_path(&file.original_name, Utc::now(), &mut rand::thread_rng());

        self.storage.put(&object_path, &file.temp_path).await?;

        let insert = MediaInsert {
            name: file.original_name,
            file_path: self.storage.public_url(&object_path),
            file_type,
            file_size: file.size as i64,
            uploaded_by,
        };

        match self.media_repo.insert(&insert).await {
            Ok(item) => Ok(MediaResponse::from(item)),
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&object_path).await {
                    tracing::warn!(object = %object_path, "Failed to remove orphaned object: {}", cleanup);
                }
                Err(e)
            }
        }
    }

    /// Overwrites the display name and alt text
    pub async fn update(&self, id: &str, request: MediaUpdateRequest) -> Result<MediaResponse, AppError> {
        request.validate()?;
        let valid_id = valid_uuid(id)?;
        let alt_text = non_blank(request.alt_text);

        let item = self.media_repo
            .update_details(&valid_id, request.name.trim(), alt_text.as_deref())
            .await?;
        Ok(MediaResponse::from(item))
    }

    /// Removes the stored object, then the row
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        let item = self.media_repo.get(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media with ID {} not found", valid_id)))?;

        match object_path_from_url(&item.file_path) {
            Some(object_path) => {
                if let Err(e) = self.storage.remove(object_path).await {
                    tracing::warn!(object = %object_path, "Failed to remove stored object: {}", e);
                }
            }
            None => tracing::warn!(url = %item.file_path, "Media URL has no object path"),
        }

        self.media_repo.delete(&valid_id).await
    }

    /// Object bytes and their sniffed MIME type, for public serving
    pub async fn fetch_object(&self, object_path: &str) -> Result<(Vec<u8>, String), AppError> {
        let bytes = self.storage.read(object_path).await?;
        let mime = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        Ok((bytes, mime))
    }
}

/// Part header type when usable, otherwise sniffed from the file contents.
fn resolve_mime(file: &IncomingFile) -> String {
    let declared = file.content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != FALLBACK_MIME);

    if let Some(ct) = declared {
        return ct.to_string();
    }

    match infer::get_from_path(&file.temp_path) {
        Ok(Some(kind)) => kind.mime_type().to_string(),
        Ok(None) => FALLBACK_MIME.to_string(),
        Err(e) => {
            tracing::debug!("Could not sniff {}: {}", file.original_name, e);
            FALLBACK_MIME.to_string()
        }
    }
}
