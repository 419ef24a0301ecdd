use std::sync::Arc;

use tracing::debug;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::jwt::JwtService;

/// Resolves a bearer token into the authenticated user for one request.
///
/// Every failure collapses to `Unauthorized`, whether the token is forged,
/// expired or malformed, or verifies but names a user that no longer exists.
/// Callers cannot distinguish "token bad" from "user gone".
pub(crate) struct IdentityService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> IdentityService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.jwt.verify_token(token).map_err(|err| {
            debug!(error = %err, "token verification failed");
            DomainError::Unauthorized
        })?;

        match self.repo.find_by_id(claims.user_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = claims.user_id, "token user no longer exists");
                Err(DomainError::Unauthorized)
            }
        }
    }
}
