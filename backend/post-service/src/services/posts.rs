/// Post service - post CRUD plus like/dislike and comment operations
///
/// Every operation is a short-lived read-check-write against a single post
/// document. Authorization combines a credentials check through the
/// accounts collaborator with, for owner-restricted operations, a username
/// match against the post's author. The read and the write of an operation
/// are separate round-trips; a post deleted in between surfaces as a
/// NotFound from the write where detectable. Lost-update protection for
/// likes and comments comes entirely from the store's atomic operators.
use crate::accounts::Accounts;
use crate::db::{post_repo, POSTS_COLLECTION};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Credentials, NewPost, PostDocument, PostInput, PostUpdate, PostView, Reacts};
use mongodb::{Collection, Database};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Generate a post identifier: a 128-bit random value, hex-encoded with no
/// separators.
fn generate_post_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct PostService {
    posts: Collection<PostDocument>,
    accounts: Arc<dyn Accounts>,
}

impl PostService {
    pub fn new(database: &Database, accounts: Arc<dyn Accounts>) -> Self {
        Self {
            posts: database.collection(POSTS_COLLECTION),
            accounts,
        }
    }

    async fn credentials_valid(&self, creds: &Credentials) -> ServiceResult<bool> {
        self.accounts
            .is_authorized(&creds.username, &creds.password)
            .await
    }

    /// Create a new post
    ///
    /// The author is taken from the authenticated credentials, never from
    /// the input. Returns the server-assigned post ID.
    pub async fn create_post(
        &self,
        input: PostInput,
        creds: &Credentials,
    ) -> ServiceResult<String> {
        if !self.credentials_valid(creds).await? {
            return Err(ServiceError::Unauthorized(
                "invalid credentials".to_string(),
            ));
        }

        let new_post = NewPost::parse(input, creds.username.clone())?;

        let post_id = generate_post_id();
        let post = PostDocument {
            id: post_id.clone(),
            author: new_post.author,
            content: new_post.content,
            created_at: new_post.created_at,
            updated_at: None,
            reacts: Reacts::default(),
            comments: Vec::new(),
        };

        post_repo::insert_post(&self.posts, &post).await?;
        tracing::info!(%post_id, author = %creds.username, "post created");

        Ok(post_id)
    }

    /// List posts whose author matches the filter as a case-insensitive
    /// substring/pattern match
    ///
    /// Result order is whatever the store returns (insertion order in
    /// practice, not guaranteed).
    pub async fn list_posts(&self, user_filter: &str) -> ServiceResult<Vec<PostView>> {
        let posts = post_repo::find_posts_by_author(&self.posts, user_filter).await?;

        Ok(posts.into_iter().map(PostView::from).collect())
    }

    /// Get a single post by ID
    pub async fn get_post(&self, post_id: &str) -> ServiceResult<PostView> {
        let post = post_repo::find_post_by_id(&self.posts, post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("post:{} not found", post_id)))?;

        Ok(PostView::from(post))
    }

    /// Delete a post
    ///
    /// Author-only: requires valid credentials whose username matches the
    /// post's author. Removes the post with its likers and comments.
    pub async fn delete_post(&self, post_id: &str, creds: &Credentials) -> ServiceResult<()> {
        let post = post_repo::find_post_by_id(&self.posts, post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("post:{} not found", post_id)))?;

        let authorized = self.credentials_valid(creds).await? && post.author == creds.username;
        if !authorized {
            return Err(ServiceError::Unauthorized(
                "not allowed to delete this post".to_string(),
            ));
        }

        let deleted = post_repo::delete_post_by_id(&self.posts, post_id).await?;
        if deleted == 0 {
            // Deleted between the authorization read and the write.
            return Err(ServiceError::NotFound(format!("post:{} not found", post_id)));
        }

        tracing::info!(%post_id, "post deleted");

        Ok(())
    }

    /// Update a post's content and stamp updatedAt
    ///
    /// Author-only. The author, creation time, likers and comments are
    /// untouched. Returns a confirmation message.
    pub async fn update_post(
        &self,
        post_id: &str,
        update: PostUpdate,
        creds: &Credentials,
    ) -> ServiceResult<String> {
        let post = post_repo::find_post_by_id(&self.posts, post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("post:{} not found", post_id)))?;

        let authorized = self.credentials_valid(creds).await? && post.author == creds.username;
        if !authorized {
            return Err(ServiceError::Unauthorized(
                "not allowed to update this post".to_string(),
            ));
        }

        update.validate()?;

        let matched = post_repo::set_post_content(&self.posts, post_id, &update.content).await?;
        if matched == 0 {
            return Err(ServiceError::NotFound(format!("post:{} not found", post_id)));
        }

        tracing::debug!(%post_id, "post content updated");

        Ok("Post updated successfully".to_string())
    }

    /// Add the user to a post's likers set
    ///
    /// Any authenticated user may like any post; liking twice is a no-op,
    /// as is liking a post that no longer exists.
    pub async fn like_post(&self, creds: &Credentials, post_id: &str) -> ServiceResult<()> {
        if !self.credentials_valid(creds).await? {
            return Err(ServiceError::Unauthorized(
                "invalid credentials".to_string(),
            ));
        }

        post_repo::add_liker(&self.posts, post_id, &creds.username).await?;
        tracing::debug!(%post_id, liker = %creds.username, "post liked");

        Ok(())
    }

    /// Remove the user from a post's likers set
    ///
    /// A no-op when the user is not in the set or the post no longer
    /// exists.
    pub async fn dislike_post(&self, creds: &Credentials, post_id: &str) -> ServiceResult<()> {
        if !self.credentials_valid(creds).await? {
            return Err(ServiceError::Unauthorized(
                "invalid credentials".to_string(),
            ));
        }

        post_repo::remove_liker(&self.posts, post_id, &creds.username).await?;
        tracing::debug!(%post_id, liker = %creds.username, "post disliked");

        Ok(())
    }

    /// Append a comment to a post
    ///
    /// Any authenticated user may comment on any post; the commentor is
    /// taken from the credentials.
    pub async fn add_comment(
        &self,
        creds: &Credentials,
        post_id: &str,
        comment: &str,
    ) -> ServiceResult<()> {
        if !self.credentials_valid(creds).await? {
            return Err(ServiceError::Unauthorized(
                "invalid credentials".to_string(),
            ));
        }

        post_repo::push_comment(&self.posts, post_id, &creds.username, comment).await?;
        tracing::debug!(%post_id, commentor = %creds.username, "comment added");

        Ok(())
    }

    /// Delete the user's comments matching the given content exactly
    ///
    /// Requires valid credentials and at least one comment on the post by
    /// this user with that exact content. Removes every comment matching
    /// the (commentor, content) pair, not just the first. Returns a
    /// confirmation message.
    pub async fn delete_comment(
        &self,
        post_id: &str,
        comment_content: &str,
        creds: &Credentials,
    ) -> ServiceResult<String> {
        let post = post_repo::find_post_by_id(&self.posts, post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("post:{} not found", post_id)))?;

        let owns_comment = post
            .comments
            .iter()
            .any(|c| c.commentor == creds.username && c.content == comment_content);

        let authorized = self.credentials_valid(creds).await? && owns_comment;
        if !authorized {
            return Err(ServiceError::Unauthorized(
                "not allowed to delete this comment".to_string(),
            ));
        }

        post_repo::pull_comments(&self.posts, post_id, &creds.username, comment_content).await?;
        tracing::debug!(%post_id, commentor = %creds.username, "comments deleted");

        Ok("Comment deleted successfully".to_string())
    }
}
