use actix_web::web;

use crate::{
    constants::MEDIA_ROUTE_PREFIX,
    handlers::{blog_posts, content, media, pages, projects, settings},
};

/// Read-only endpoints for the public site.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/content/static", web::get().to(content::static_content))
        .route("/posts", web::get().to(blog_posts::list_published_posts))
        .route("/posts/{slug}", web::get().to(blog_posts::get_published_post))
        .route("/pages/{slug}", web::get().to(pages::get_published_page))
        .route("/projects", web::get().to(projects::list_published_projects))
        .route("/settings/{key}", web::get().to(settings::get_setting));
}

pub fn config_media_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        &format!("{}/{{object_path:.*}}", MEDIA_ROUTE_PREFIX),
        web::get().to(media::serve_media),
    );
}
