use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, PostPatch, PostQuery, PostRepository};
use crate::domain::comment::{Comment, CommentRequest};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) results: Vec<Post>,
    pub(crate) skip: i64,
    pub(crate) limit: i64,
    pub(crate) total: i64,
}

/// Posts, likes and comments with owner-only mutation. Every operation takes
/// an already-resolved identity (`actor_id`), never raw credentials.
pub(crate) struct ContentService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> ContentService<P, C> {
    pub(crate) fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    /// The owner is always the authenticated identity; there is no way for a
    /// caller to create a post on behalf of another user.
    pub(crate) async fn create_post(
        &self,
        actor_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        self.posts
            .create_post(NewPost {
                title: req.title,
                content: req.content,
                published: req.published,
                owner_id: actor_id,
            })
            .await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn list_posts(
        &self,
        search: Option<String>,
        skip: i64,
        limit: i64,
    ) -> Result<ListPostsResult, DomainError> {
        let search = search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let skip = skip.max(0);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let query = PostQuery {
            search: search.clone(),
            skip,
            limit,
        };
        let results = self.posts.list_posts(query).await?;
        // Count of matching rows before pagination, so clients can page.
        let total = self.posts.count_posts(search.as_deref()).await?;

        Ok(ListPostsResult {
            results,
            skip,
            limit,
            total,
        })
    }

    pub(crate) async fn update_post(
        &self,
        actor_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let existing = self.get_post(post_id).await?;
        if existing.owner_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        let patch = PostPatch {
            title: req.title,
            content: req.content,
            published: req.published,
        };
        // The owned predicate re-checks ownership inside the statement; None
        // here means the post vanished between the read and the write.
        self.posts
            .update_post_owned(post_id, actor_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let existing = self.get_post(post_id).await?;
        if existing.owner_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        let deleted = self.posts.delete_post_owned(post_id, actor_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    /// Repeat likes are rejected, not absorbed: the second call for the same
    /// (actor, post) pair fails with `AlreadyExists`. The store's uniqueness
    /// constraint decides races; the pre-check only gives a cleaner path.
    pub(crate) async fn like_post(&self, actor_id: i64, post_id: i64) -> Result<(), DomainError> {
        if self.posts.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        if self.posts.like_exists(post_id, actor_id).await? {
            return Err(DomainError::AlreadyExists("like".to_string()));
        }

        self.posts.insert_like(post_id, actor_id).await
    }

    pub(crate) async fn add_comment(
        &self,
        actor_id: i64,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        if self.posts.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        self.comments
            .create_comment(NewComment {
                content: req.content,
                user_id: actor_id,
                post_id,
            })
            .await
    }

    pub(crate) async fn update_comment(
        &self,
        actor_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        let existing = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or(DomainError::NotFound(format!("comment id: {comment_id}")))?;
        if existing.user_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        self.comments
            .update_comment_owned(comment_id, actor_id, req.content)
            .await?
            .ok_or(DomainError::NotFound(format!("comment id: {comment_id}")))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let existing = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or(DomainError::NotFound(format!("comment id: {comment_id}")))?;
        if existing.user_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        let deleted = self
            .comments
            .delete_comment_owned(comment_id, actor_id)
            .await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("comment id: {comment_id}")));
        }
        Ok(())
    }
}
