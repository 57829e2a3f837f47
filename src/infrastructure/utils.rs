pub mod markdown;
pub mod valid_uuid;
pub mod xml;
