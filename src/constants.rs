use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const API_PREFIX: &str = "/api/v1";
pub const ADMIN_PREFIX: &str = "/api/v1/admin";
/// Public route serving stored media objects.
pub const MEDIA_ROUTE_PREFIX: &str = "/storage/media";
