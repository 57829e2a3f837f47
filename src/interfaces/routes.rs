use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod auth;
mod json_error;
mod public;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.configure(public::config_media_routes);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(admin::config_routes)
            .configure(users::config_routes)
            .configure(public::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
