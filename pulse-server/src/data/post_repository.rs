use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published: bool,
    pub(crate) owner_id: i64,
}

/// Only the present fields are written; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) published: Option<bool>,
}

/// Offset pagination with an optional case-insensitive substring search
/// over title and content.
#[derive(Debug, Clone)]
pub(crate) struct PostQuery {
    pub(crate) search: Option<String>,
    pub(crate) skip: i64,
    pub(crate) limit: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;

    /// Applies the patch only if the post exists AND belongs to `owner_id`;
    /// the ownership predicate is part of the statement so check-then-act
    /// cannot race.
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError>;

    async fn delete_post_owned(&self, post_id: i64, owner_id: i64) -> Result<bool, DomainError>;

    async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, DomainError>;

    /// Count of posts matching the search before pagination is applied.
    async fn count_posts(&self, search: Option<&str>) -> Result<i64, DomainError>;

    /// Inserts a like for (user_id, post_id). The store's uniqueness
    /// constraint is the authoritative guard: a duplicate insert must fail
    /// with `AlreadyExists`, a missing post with `NotFound`.
    async fn insert_like(&self, post_id: i64, user_id: i64) -> Result<(), DomainError>;

    async fn like_exists(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError>;
}
