use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::content_service::ContentService;
use crate::application::identity_service::IdentityService;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) content_service:
        Arc<ContentService<PostgresPostRepository, PostgresCommentRepository>>,
    pub(crate) identity_service: Arc<IdentityService<PostgresUserRepository>>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        content_service: Arc<
            ContentService<PostgresPostRepository, PostgresCommentRepository>,
        >,
        identity_service: Arc<IdentityService<PostgresUserRepository>>,
    ) -> Self {
        Self {
            auth_service,
            content_service,
            identity_service,
        }
    }
}
