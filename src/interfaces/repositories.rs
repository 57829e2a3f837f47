pub mod blog_post;
pub mod invitation;
pub mod media;
pub mod page;
pub mod project;
pub mod site_setting;
pub mod sqlx_repo;
pub mod token;
pub mod user;
