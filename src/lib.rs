use std::sync::Arc;

use redis::Client as RedisClient;

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, password, use_cases};
pub use infrastructure::{auth, db, storage, utils};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use entities::static_content::StaticContent;
use repositories::sqlx_repo::{
    SqlxBlogPostRepo, SqlxInvitationRepo, SqlxMediaRepo, SqlxPageRepo, SqlxProjectRepo,
    SqlxSiteSettingRepo, SqlxUserRepo,
};
use storage::local::LocalMediaStorage;
use use_cases::{
    auth::AuthHandler, blog::BlogPostHandler, dashboard::DashboardHandler, export::ExportHandler,
    invitations::InvitationHandler, media::MediaHandler, pages::PageHandler,
    projects::ProjectHandler, settings::SettingsHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, SqlxInvitationRepo, JwtService>;
pub type AppMediaHandler = MediaHandler<SqlxMediaRepo, LocalMediaStorage>;
pub type AppExportHandler = ExportHandler<SqlxBlogPostRepo, SqlxPageRepo, SqlxSiteSettingRepo>;
pub type AppDashboardHandler = DashboardHandler<SqlxUserRepo, SqlxPageRepo, SqlxBlogPostRepo, SqlxMediaRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub page_handler: PageHandler<SqlxPageRepo>,
    pub blog_handler: BlogPostHandler<SqlxBlogPostRepo>,
    pub project_handler: ProjectHandler<SqlxProjectRepo>,
    pub media_handler: AppMediaHandler,
    pub settings_handler: SettingsHandler<SqlxSiteSettingRepo>,
    pub invitation_handler: InvitationHandler<SqlxInvitationRepo>,
    pub export_handler: AppExportHandler,
    pub dashboard_handler: AppDashboardHandler,
    pub static_content: Arc<StaticContent>,
    pub redis_client: Option<RedisClient>,
    pub site_name: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool, static_content: StaticContent) -> Self {
        let redis_client = config.redis_url.as_ref().and_then(|url| {
            RedisClient::open(url.as_str())
                .map_err(|e| tracing::error!("Redis connection error: {}", e))
                .ok()
        });

        let static_content = Arc::new(static_content);
        let user_repo = SqlxUserRepo::new(pool.clone());
        let page_repo = SqlxPageRepo::new(pool.clone());
        let blog_repo = SqlxBlogPostRepo::new(pool.clone());
        let media_repo = SqlxMediaRepo::new(pool.clone());
        let settings_repo = SqlxSiteSettingRepo::new(pool.clone());
        let invitation_repo = SqlxInvitationRepo::new(pool.clone());

        AppState {
            auth_handler: AuthHandler::new(
                user_repo.clone(),
                invitation_repo.clone(),
                JwtService::new(config, redis_client.clone()),
            ),
            page_handler: PageHandler::new(page_repo.clone()),
            blog_handler: BlogPostHandler::new(blog_repo.clone()),
            project_handler: ProjectHandler::new(SqlxProjectRepo::new(pool)),
            media_handler: MediaHandler::new(
                media_repo.clone(),
                LocalMediaStorage::from_config(config),
                config.media_max_file_bytes,
            ),
            settings_handler: SettingsHandler::new(settings_repo.clone()),
            invitation_handler: InvitationHandler::new(invitation_repo),
            export_handler: ExportHandler::new(
                blog_repo.clone(),
                page_repo.clone(),
                settings_repo,
                Arc::clone(&static_content),
                config.site_name.clone(),
                config.site_description.clone(),
            ),
            dashboard_handler: DashboardHandler::new(user_repo, page_repo, blog_repo, media_repo),
            static_content,
            redis_client,
            site_name: config.site_name.clone(),
        }
    }
}
