use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::static_content::LanguageQuery, AppState};

/// Static portfolio content in one language, `pl` unless `?lang=en`.
#[instrument(skip(state))]
pub async fn static_content(
    state: web::Data<AppState>,
    query: web::Query<LanguageQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(state.static_content.localized(query.lang))
}
