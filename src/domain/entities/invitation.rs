use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::{common::new_validation_error, user::AppRole};

// ───── Constants ──────────────────────────────────────────────────────
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const GENERATED_CODE_LENGTH: usize = 8;
const MAX_CODE_LENGTH: u64 = 100;
const MAX_EXPIRY_DAYS: i64 = 365;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InvitationCode {
    pub id: Uuid,
    pub code: String,
    pub role: AppRole,
    pub max_uses: Option<i32>,
    pub current_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
    pub used_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Active,
    Expired,
    Exhausted,
}

impl InvitationCode {
    /// Status as seen at `now`. Expiry wins over exhaustion.
    pub fn status_at(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.expires_at.is_some_and(|exp| exp <= now) {
            InvitationStatus::Expired
        } else if self.current_uses.unwrap_or(0) >= self.max_uses.unwrap_or(1) {
            InvitationStatus::Exhausted
        } else {
            InvitationStatus::Active
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvitationInsert {
    pub code: String,
    pub role: AppRole,
    pub max_uses: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    #[serde(flatten)]
    pub invitation: InvitationCode,
    pub status: InvitationStatus,
}

impl InvitationResponse {
    pub fn at(invitation: InvitationCode, now: DateTime<Utc>) -> Self {
        InvitationResponse {
            status: invitation.status_at(now),
            invitation,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewInvitationRequest {
    /// Generated when absent or blank.
    #[validate(length(max = MAX_CODE_LENGTH))]
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub role: Option<AppRole>,

    #[validate(range(min = 1, message = "Max uses must be at least 1"))]
    #[serde(default)]
    pub max_uses: Option<i32>,

    #[validate(range(min = 1, max = MAX_EXPIRY_DAYS, message = "Expiry must be between 1 and 365 days"))]
    #[serde(default)]
    pub expires_in_days: Option<i64>,
}

impl NewInvitationRequest {
    pub fn into_insert<R: Rng>(
        self,
        created_by: Option<Uuid>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<InvitationInsert, ValidationErrors> {
        self.validate()?;

        let code = match self.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => normalize_code(c),
            None => generate_code(rng),
        };

        if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            let mut errors = ValidationErrors::new();
            errors.add(
                "code",
                new_validation_error("code_invalid_chars", "Code may contain only letters, digits, '-' or '_'"),
            );
            return Err(errors);
        }

        Ok(InvitationInsert {
            code,
            role: self.role.unwrap_or(AppRole::Admin),
            max_uses: self.max_uses.unwrap_or(1),
            expires_at: self.expires_in_days.map(|days| now + Duration::days(days)),
            created_by,
        })
    }
}

// ───── Helper Functions ─────────────────────────────────────────────

/// Codes are stored trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Random `A-Z0-9` code of [`GENERATED_CODE_LENGTH`] characters.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..GENERATED_CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
