/// Data models for post-service
///
/// This module defines structures for:
/// - PostDocument: the persisted post schema (collection "Post")
/// - PostView: the projection of a post returned to callers
/// - PostInput / PostUpdate: typed client inputs with validation
/// - Credentials: username/password pair used for authorization checks
use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A single comment on a post.
///
/// Comments carry no identifier of their own; deletion matches on the
/// exact (commentor, content) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub commentor: String,
    pub content: String,
}

/// Reaction state embedded in a post document.
///
/// `likers` is a set of usernames; uniqueness is guaranteed by `$addToSet`
/// on the write path and checked again by [`Reacts::likers_unique`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reacts {
    pub likers: Vec<String>,
}

impl Reacts {
    /// True when `likers` contains no duplicate username.
    pub fn likers_unique(&self) -> bool {
        let unique: std::collections::HashSet<&str> =
            self.likers.iter().map(String::as_str).collect();
        unique.len() == self.likers.len()
    }
}

/// The persisted post schema (collection "Post").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    /// Absent until the post is first updated.
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<bson::DateTime>,
    pub reacts: Reacts,
    pub comments: Vec<CommentEntry>,
}

/// The projection of a post returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub post_id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: Vec<String>,
    pub comments: Vec<CommentEntry>,
}

impl From<PostDocument> for PostView {
    fn from(post: PostDocument) -> Self {
        Self {
            post_id: post.id,
            author: post.author,
            content: post.content,
            created_at: post.created_at.to_chrono(),
            likes: post.reacts.likers,
            comments: post.comments,
        }
    }
}

/// Client input for creating a post.
///
/// The author is never taken from the input; it comes from the
/// authenticated credentials.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 1, max = 5000, message = "content must be 1-5000 characters"))]
    pub content: String,
}

/// Client input for updating a post's content.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostUpdate {
    #[validate(length(min = 1, max = 5000, message = "content must be 1-5000 characters"))]
    pub content: String,
}

/// A validated post ready to be persisted: client content plus the
/// server-assigned author and creation time.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: String,
    pub content: String,
    pub created_at: bson::DateTime,
}

impl NewPost {
    /// Validate a raw post input and stamp it with its author and creation
    /// time. Fails when the content is malformed.
    pub fn parse(input: PostInput, author: String) -> Result<Self, ValidationErrors> {
        input.validate()?;

        Ok(Self {
            author,
            content: input.content,
            created_at: bson::DateTime::now(),
        })
    }
}

/// Username/password pair used for every authorization check.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stamps_author_and_creation_time() {
        let input = PostInput {
            content: "hello world".to_string(),
        };

        let post = NewPost::parse(input, "alice".to_string()).expect("input should be valid");

        assert_eq!(post.author, "alice");
        assert_eq!(post.content, "hello world");
    }

    #[test]
    fn parse_rejects_empty_content() {
        let input = PostInput {
            content: String::new(),
        };

        assert!(NewPost::parse(input, "alice".to_string()).is_err());
    }

    #[test]
    fn parse_rejects_oversized_content() {
        let input = PostInput {
            content: "x".repeat(5001),
        };

        assert!(NewPost::parse(input, "alice".to_string()).is_err());
    }

    #[test]
    fn view_projects_document_fields() {
        let created_at = bson::DateTime::now();
        let post = PostDocument {
            id: "a".repeat(32),
            author: "alice".to_string(),
            content: "hi".to_string(),
            created_at,
            updated_at: None,
            reacts: Reacts {
                likers: vec!["bob".to_string()],
            },
            comments: vec![CommentEntry {
                commentor: "bob".to_string(),
                content: "nice".to_string(),
            }],
        };

        let view = PostView::from(post);

        assert_eq!(view.post_id, "a".repeat(32));
        assert_eq!(view.author, "alice");
        assert_eq!(view.content, "hi");
        assert_eq!(view.created_at, created_at.to_chrono());
        assert_eq!(view.likes, vec!["bob".to_string()]);
        assert_eq!(view.comments.len(), 1);
    }

    #[test]
    fn likers_uniqueness_check() {
        let unique = Reacts {
            likers: vec!["alice".to_string(), "bob".to_string()],
        };
        let duplicated = Reacts {
            likers: vec!["alice".to_string(), "alice".to_string()],
        };

        assert!(unique.likers_unique());
        assert!(!duplicated.likers_unique());
    }
}
