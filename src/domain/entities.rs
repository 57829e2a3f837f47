pub mod blog_post;
pub mod common;
pub mod invitation;
pub mod media;
pub mod page;
pub mod project;
pub mod site_setting;
pub mod static_content;
pub mod token;
pub mod user;
