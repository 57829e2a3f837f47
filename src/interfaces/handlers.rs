pub mod auth;
pub mod blog_posts;
pub mod content;
pub mod dashboard;
pub mod export;
pub mod home;
pub mod invitations;
pub mod media;
pub mod pages;
pub mod projects;
pub mod settings;
pub mod system;
pub mod users;
