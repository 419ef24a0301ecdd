use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ListUsersResult {
    pub(crate) results: Vec<User>,
    pub(crate) skip: i64,
    pub(crate) limit: i64,
    pub(crate) total: i64,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let password_hash = Self::hash_password(&req.password)?;

        // The unique index on users.email is the authoritative duplicate
        // guard; the repository maps its violation to AlreadyExists.
        let user = self
            .repo
            .create_user(NewUser {
                email: req.email,
                password_hash,
            })
            .await?;

        let access_token = self
            .jwt
            .issue_token(user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_email(&req.email).await? {
            Some(user_creds) => user_creds,
            None => {
                // Burn one verification on a dummy hash so a missing account
                // takes as long as a wrong password.
                match Self::verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        Self::verify_password(&req.password, &user_creds.password_hash)?;

        let access_token = self
            .jwt
            .issue_token(user_creds.user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(format!("user id: {id}")))
    }

    pub(crate) async fn list_users(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<ListUsersResult, DomainError> {
        let skip = skip.max(0);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let results = self.repo.list_users(skip, limit).await?;
        let total = self.repo.count_users().await?;

        Ok(ListUsersResult {
            results,
            skip,
            limit,
            total,
        })
    }

    pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        // A malformed stored digest is a verification failure, not a crash.
        let parsed_hash =
            PasswordHash::new(password_hash).map_err(|_| DomainError::InvalidCredentials)?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        login_credentials: Arc<Mutex<Option<UserCredentials>>>,
        stored_users: Arc<Mutex<Vec<User>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                login_credentials: Arc::new(Mutex::new(None)),
                stored_users: Arc::new(Mutex::new(Vec::new())),
                create_user_out,
            }
        }

        fn set_login_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned") = creds;
        }

        fn set_stored_users(&self, users: Vec<User>) {
            *self
                .stored_users
                .lock()
                .expect("stored users mutex poisoned") = users;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned")
                .clone())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, DomainError> {
            Ok(self
                .stored_users
                .lock()
                .expect("stored users mutex poisoned")
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn count_users(&self) -> Result<i64, DomainError> {
            Ok(self
                .stored_users
                .lock()
                .expect("stored users mutex poisoned")
                .len() as i64)
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_returns_token() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            email: "  VALID@EXAMPLE.COM  ".to_string(),
            password: "very-secure-password".to_string(),
        };

        let result = service.register(req).await.expect("register must succeed");

        assert_eq!(result.user.email, "valid@example.com");
        assert!(!result.access_token.is_empty());

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.email, "valid@example.com");
        // The stored credential is never the plaintext.
        assert_ne!(created.password_hash, "very-secure-password");
        assert!(
            AuthService::<FakeUserRepo>::verify_password(
                "very-secure-password",
                &created.password_hash
            )
            .is_ok()
        );
        assert!(matches!(
            AuthService::<FakeUserRepo>::verify_password(
                "wrong-password",
                &created.password_hash
            ),
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        repo.set_login_credentials(None);
        let service = AuthService::new(repo, test_jwt());

        let req = LoginRequest {
            email: "valid@example.com".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = AuthService::<FakeUserRepo>::hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "valid@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "valid@example.com".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_treats_malformed_stored_hash_as_invalid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "valid@example.com"),
            password_hash: "not-a-digest".to_string(),
        }));
        let service = AuthService::new(repo, test_jwt());

        let req = LoginRequest {
            email: "valid@example.com".to_string(),
            password: "whatever-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = AuthService::<FakeUserRepo>::hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "valid@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "valid@example.com".to_string(),
            password: "correct-password".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);

        let claims = test_jwt()
            .verify_token(&result.access_token)
            .expect("issued token must verify");
        assert_eq!(claims.user_id, 1);
    }

    #[tokio::test]
    async fn list_users_pages_and_reports_total() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        repo.set_stored_users(
            (1..=5)
                .map(|i| sample_user(i, &format!("user{i}@example.com")))
                .collect(),
        );
        let service = AuthService::new(repo, test_jwt());

        let page = service.list_users(2, 2).await.expect("list must succeed");

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, 3);
        assert_eq!(page.results[1].id, 4);
        // Total counts every user, not just the returned page.
        assert_eq!(page.total, 5);
        assert_eq!(page.skip, 2);
        assert_eq!(page.limit, 2);
    }

    #[tokio::test]
    async fn list_users_clamps_pagination_inputs() {
        let repo = FakeUserRepo::new(sample_user(1, "valid@example.com"));
        repo.set_stored_users(vec![sample_user(1, "user1@example.com")]);
        let service = AuthService::new(repo, test_jwt());

        let page = service
            .list_users(-3, 10_000)
            .await
            .expect("list must succeed");

        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
        assert_eq!(page.results.len(), 1);
    }

    fn sample_user(id: i64, email: &str) -> User {
        User::new(id, email.to_string(), Utc::now()).expect("sample user must be valid")
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 3600))
    }
}
