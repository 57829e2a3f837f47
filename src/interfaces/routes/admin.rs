use actix_web::web;

use crate::handlers::{
    blog_posts, dashboard, export, invitations, media, pages, projects, settings,
    system::admin_health_check,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin_health_check)
            .route("/dashboard", web::get().to(dashboard::admin_dashboard))
            .route("/export", web::get().to(export::export_website))
            .service(
                web::resource("/pages")
                    .route(web::get().to(pages::list_pages))
                    .route(web::post().to(pages::create_page))
            )
            .service(
                web::resource("/pages/{page_id}")
                    .route(web::get().to(pages::get_page))
                    .route(web::put().to(pages::update_page))
                    .route(web::delete().to(pages::delete_page))
            )
            .service(
                web::resource("/posts")
                    .route(web::get().to(blog_posts::list_blog_posts))
                    .route(web::post().to(blog_posts::create_blog_post))
            )
            .service(
                web::resource("/posts/{post_id}")
                    .route(web::get().to(blog_posts::get_blog_post))
                    .route(web::put().to(blog_posts::update_blog_post))
                    .route(web::delete().to(blog_posts::delete_blog_post))
            )
            .service(
                web::resource("/projects")
                    .route(web::get().to(projects::list_projects))
                    .route(web::post().to(projects::create_project))
            )
            .service(
                web::resource("/projects/{project_id}")
                    .route(web::get().to(projects::get_project))
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
            .service(
                web::resource("/media")
                    .route(web::get().to(media::list_media))
                    .route(web::post().to(media::upload_media))
            )
            .service(
                web::resource("/media/{media_id}")
                    .route(web::put().to(media::update_media))
                    .route(web::delete().to(media::delete_media))
            )
            .route("/settings", web::get().to(settings::list_settings))
            .route("/settings/{key}", web::put().to(settings::update_setting))
            .service(
                web::resource("/invitations")
                    .route(web::get().to(invitations::list_invitations))
                    .route(web::post().to(invitations::create_invitation))
            )
            .service(
                web::resource("/invitations/{invitation_id}")
                    .route(web::delete().to(invitations::delete_invitation))
            )
    );
}
