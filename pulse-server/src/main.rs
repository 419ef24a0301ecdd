use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::content_service::ContentService;
use application::identity_service::IdentityService;
use data::repositories::postgres::comment_repository::PostgresCommentRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));

    let user_repo = PostgresUserRepository::new(pool.clone());
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), jwt.clone()));
    let identity_service = Arc::new(IdentityService::new(user_repo, jwt));
    let content_service = Arc::new(ContentService::new(
        PostgresPostRepository::new(pool.clone()),
        PostgresCommentRepository::new(pool),
    ));

    let state = AppState::new(auth_service, content_service, identity_service);

    info!("starting pulse-server");
    server::run_http(&settings, state).await
}
