pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod export;
pub mod extractors;
pub mod invitations;
pub mod media;
pub mod pages;
pub mod projects;
pub mod settings;
