use crate::models::PostDocument;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::Collection;

/// Persist a new post document
pub async fn insert_post(
    posts: &Collection<PostDocument>,
    post: &PostDocument,
) -> Result<(), mongodb::error::Error> {
    posts.insert_one(post).await?;

    Ok(())
}

/// Find a post by ID
pub async fn find_post_by_id(
    posts: &Collection<PostDocument>,
    post_id: &str,
) -> Result<Option<PostDocument>, mongodb::error::Error> {
    posts.find_one(doc! { "_id": post_id }).await
}

/// Filter matching authors as a case-insensitive pattern
///
/// An unanchored pattern matches as a substring; an empty pattern matches
/// every author.
pub fn author_filter(pattern: &str) -> Document {
    doc! { "author": { "$regex": pattern, "$options": "i" } }
}

/// Find all posts whose author matches the pattern
///
/// Results come back in whatever order the store returns them.
pub async fn find_posts_by_author(
    posts: &Collection<PostDocument>,
    pattern: &str,
) -> Result<Vec<PostDocument>, mongodb::error::Error> {
    let cursor = posts.find(author_filter(pattern)).await?;

    cursor.try_collect().await
}

/// Delete a post by ID
/// Returns the number of documents removed
pub async fn delete_post_by_id(
    posts: &Collection<PostDocument>,
    post_id: &str,
) -> Result<u64, mongodb::error::Error> {
    let result = posts.delete_one(doc! { "_id": post_id }).await?;

    Ok(result.deleted_count)
}

/// Overwrite a post's content and stamp updatedAt
/// Returns the number of documents matched
pub async fn set_post_content(
    posts: &Collection<PostDocument>,
    post_id: &str,
    content: &str,
) -> Result<u64, mongodb::error::Error> {
    let result = posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$set": { "content": content, "updatedAt": DateTime::now() } },
        )
        .await?;

    Ok(result.matched_count)
}

/// Add a username to a post's likers set
///
/// `$addToSet` keeps the set free of duplicates; re-liking is a no-op.
pub async fn add_liker(
    posts: &Collection<PostDocument>,
    post_id: &str,
    username: &str,
) -> Result<(), mongodb::error::Error> {
    posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$addToSet": { "reacts.likers": username } },
        )
        .await?;

    Ok(())
}

/// Remove a username from a post's likers set
///
/// Removing an absent username is a no-op.
pub async fn remove_liker(
    posts: &Collection<PostDocument>,
    post_id: &str,
    username: &str,
) -> Result<(), mongodb::error::Error> {
    posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$pull": { "reacts.likers": username } },
        )
        .await?;

    Ok(())
}

/// Append a comment to a post
pub async fn push_comment(
    posts: &Collection<PostDocument>,
    post_id: &str,
    commentor: &str,
    content: &str,
) -> Result<(), mongodb::error::Error> {
    posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$push": { "comments": { "commentor": commentor, "content": content } } },
        )
        .await?;

    Ok(())
}

/// Remove every comment matching the exact (commentor, content) pair
pub async fn pull_comments(
    posts: &Collection<PostDocument>,
    post_id: &str,
    commentor: &str,
    content: &str,
) -> Result<(), mongodb::error::Error> {
    posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$pull": { "comments": { "commentor": commentor, "content": content } } },
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_filter_is_case_insensitive_pattern_match() {
        let filter = author_filter("ali");
        let author = filter.get_document("author").expect("author clause");

        assert_eq!(author.get_str("$regex").unwrap(), "ali");
        assert_eq!(author.get_str("$options").unwrap(), "i");
    }
}
