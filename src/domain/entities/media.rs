use std::path::Path;

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::common::validate_not_blank;

const UPLOAD_PREFIX: &str = "uploads";
const RANDOM_SUFFIX_LENGTH: usize = 7;
const KIB: i64 = 1024;
const MIB: i64 = 1024 * 1024;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaItem {
    pub id: Uuid,
    pub name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: Option<i64>,
    pub alt_text: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl MediaItem {
    pub fn is_image(&self) -> bool {
        self.file_type.starts_with("image/")
    }
}

#[derive(Debug, Clone)]
pub struct MediaInsert {
    pub name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_by: Option<Uuid>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    #[serde(flatten)]
    pub item: MediaItem,
    pub size_label: String,
    pub is_image: bool,
}

impl From<MediaItem> for MediaResponse {
    fn from(item: MediaItem) -> Self {
        MediaResponse {
            size_label: format_file_size(item.file_size),
            is_image: item.is_image(),
            item,
        }
    }
}

/// Outcome for one file of a multi-file upload.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadReport {
    pub uploaded: usize,
    pub failed: usize,
    pub results: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn from_outcomes(results: Vec<UploadOutcome>) -> Self {
        let uploaded = results.iter().filter(|r| r.success).count();
        UploadReport {
            uploaded,
            failed: results.len() - uploaded,
            results,
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct MediaUploadForm {
    #[multipart(rename = "files")]
    pub files: Vec<TempFile>,
}

/// File handed from the HTTP layer to the upload use case.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub size: usize,
    pub temp_path: std::path::PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MediaUpdateRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub alt_text: Option<String>,
}

// ───── Helper Functions ─────────────────────────────────────────────

/// Object path `uploads/<unix-millis>-<random>.<ext>` for a new upload.
pub fn generate_object_path<R: Rng>(original_name: &str, now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..RANDOM_SUFFIX_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect();

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or("bin");

    format!("{}/{}-{}.{}", UPLOAD_PREFIX, now.timestamp_millis(), suffix, ext)
}

/// Human readable size: `B`, then `KB` / `MB` with one decimal.
pub fn format_file_size(bytes: Option<i64>) -> String {
    match bytes {
        None | Some(0) => "-".to_string(),
        Some(b) if b < KIB => format!("{} B", b),
        Some(b) if b < MIB => format!("{:.1} KB", b as f64 / KIB as f64),
        Some(b) => format!("{:.1} MB", b as f64 / MIB as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn sizes_are_formatted_like_the_gallery() {
        assert_eq!(format_file_size(None), "-");
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(1536)), "1.5 KB");
        assert_eq!(format_file_size(Some(5 * 1024 * 1024 + 104_858)), "5.1 MB");
    }

    #[test]
    fn object_path_has_timestamp_suffix_and_extension() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let path = generate_object_path("logo.final.PNG", now, &mut rng);

        let rest = path.strip_prefix("uploads/").unwrap();
        let (stem, ext) = rest.rsplit_once('.').unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();

        assert_eq!(ext, "PNG");
        assert_eq!(millis, now.timestamp_millis().to_string());
        assert_eq!(suffix.len(), 7);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn extensionless_files_get_bin() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_object_path("README", Utc::now(), &mut rng).ends_with(".bin"));
    }

    #[test]
    fn report_counts_failures() {
        let report = UploadReport::from_outcomes(vec![
            UploadOutcome { file_name: "a.png".into(), success: true, media: None, error: None },
            UploadOutcome { file_name: "b.png".into(), success: false, media: None, error: Some("x".into()) },
        ]);
        assert_eq!(report.uploaded, 1);
        assert_eq!(report.failed, 1);
    }
}
