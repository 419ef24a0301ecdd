use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentRequest {
    pub(crate) content: String,
}

impl CommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_comment_content(&self.content)?,
        })
    }
}

impl Comment {
    pub(crate) fn new(
        id: i64,
        content: impl Into<String>,
        user_id: i64,
        post_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        for (field, value) in [("id", id), ("user_id", user_id), ("post_id", post_id)] {
            if value <= 0 {
                return Err(DomainError::Validation {
                    field,
                    message: "must be > 0",
                });
            }
        }
        let content = normalize_comment_content(&content.into())?;

        Ok(Self {
            id,
            content,
            user_id,
            post_id,
            created_at,
        })
    }
}

fn normalize_comment_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() || content.len() > 4096 {
        return Err(DomainError::Validation {
            field: "content",
            message: "must be 1..4096 chars",
        });
    }
    Ok(content.to_string())
}
