use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    /// Fails with `NotFound` when the referenced post does not exist.
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;

    /// Updates only if the comment exists AND belongs to `owner_id`.
    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError>;

    async fn delete_comment_owned(
        &self,
        comment_id: i64,
        owner_id: i64,
    ) -> Result<bool, DomainError>;
}
