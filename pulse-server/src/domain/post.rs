use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A post as read back from the store. `like_count` is computed from the
/// likes table at read time, never a stored counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published: bool,
    pub(crate) owner_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published: bool,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            published: self.published,
        })
    }
}

/// Field-optional patch: only the fields that are present are mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) published: Option<bool>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.title.is_none() && self.content.is_none() && self.published.is_none() {
            return Err(DomainError::Validation {
                field: "patch",
                message: "must contain at least one field",
            });
        }
        Ok(Self {
            title: self.title.as_deref().map(normalize_title).transpose()?,
            content: self.content.as_deref().map(normalize_content).transpose()?,
            published: self.published,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        published: bool,
        owner_id: i64,
        created_at: DateTime<Utc>,
        like_count: i64,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("owner_id", owner_id)?;
        let title = normalize_title(&title.into())?;
        let content = normalize_content(&content.into())?;

        if like_count < 0 {
            return Err(DomainError::Validation {
                field: "like_count",
                message: "must be >= 0",
            });
        }

        Ok(Self {
            id,
            title,
            content,
            published,
            owner_id,
            created_at,
            like_count,
        })
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CreatePostRequest, DomainError, Post, UpdatePostRequest};

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            published: false,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_validate_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            published: true,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert!(validated.published);
    }

    #[test]
    fn update_post_request_rejects_empty_patch() {
        let err = UpdatePostRequest::default()
            .validate()
            .expect_err("empty patch must be rejected");
        assert_validation_field(err, "patch");
    }

    #[test]
    fn update_post_request_validates_only_present_fields() {
        let req = UpdatePostRequest {
            title: None,
            content: Some("  body  ".to_string()),
            published: None,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, None);
        assert_eq!(validated.content.as_deref(), Some("body"));
    }

    #[test]
    fn update_post_request_rejects_blank_present_content() {
        let req = UpdatePostRequest {
            title: None,
            content: Some("   ".to_string()),
            published: None,
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn post_new_normalizes_and_builds_post() {
        let post = Post::new(1, "  Title  ", "  Content  ", false, 10, Utc::now(), 0)
            .expect("post should be created");

        assert_eq!(post.id, 1);
        assert_eq!(post.owner_id, 10);
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Content");
        assert_eq!(post.like_count, 0);
    }

    #[test]
    fn post_new_rejects_non_positive_owner_id() {
        let err = Post::new(1, "Title", "Content", false, 0, Utc::now(), 0)
            .expect_err("owner_id must be > 0");
        assert_validation_field(err, "owner_id");
    }

    #[test]
    fn post_new_rejects_negative_like_count() {
        let err = Post::new(1, "Title", "Content", false, 10, Utc::now(), -1)
            .expect_err("like_count must be >= 0");
        assert_validation_field(err, "like_count");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
