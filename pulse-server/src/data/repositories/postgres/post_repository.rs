use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PostPatch, PostQuery, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    published: bool,
    owner_id: i64,
    created_at: DateTime<Utc>,
    like_count: i64,
}

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.content, p.published, p.owner_id, p.created_at,
    (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, published, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, published, owner_id, created_at, 0::bigint AS like_count
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.published)
        .bind(input.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts AS p
            SET title = COALESCE($3, p.title),
                content = COALESCE($4, p.content),
                published = COALESCE($5, p.published)
            WHERE p.id = $1 AND p.owner_id = $2
            RETURNING p.id, p.title, p.content, p.published, p.owner_id, p.created_at,
                (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post_owned(&self, post_id: i64, owner_id: i64) -> Result<bool, DomainError> {
        // Likes and comments go with the post via ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE ($1::text IS NULL OR p.title ILIKE $1 OR p.content ILIKE $1)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2
            OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(query.search.as_deref().map(like_pattern))
            .bind(query.limit)
            .bind(query.skip)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn count_posts(&self, search: Option<&str>) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM posts p
            WHERE ($1::text IS NULL OR p.title ILIKE $1 OR p.content ILIKE $1)
            "#,
        )
        .bind(search.map(like_pattern))
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }

    async fn insert_like(&self, post_id: i64, user_id: i64) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(map_like_db_error)?;

        Ok(())
    }

    async fn like_exists(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM likes
                WHERE user_id = $1 AND post_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(exists)
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.published,
        row.owner_id,
        row.created_at,
        row.like_count,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

/// Builds an ILIKE pattern matching the search term anywhere in the column,
/// with LIKE metacharacters in the term escaped so they match literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("owner".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

fn map_like_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23505") => return DomainError::AlreadyExists("like".to_string()),
            Some("23503") => return DomainError::NotFound("post".to_string()),
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_term_in_wildcards() {
        assert_eq!(like_pattern("hello"), "%hello%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
