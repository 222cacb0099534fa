/// Database access layer
///
/// This module provides:
/// - Connection bootstrap for the MongoDB database handle
/// - Repository functions for the "Post" collection
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;
use crate::error::ServiceResult;

pub mod post_repo;

/// Name of the posts collection.
pub const POSTS_COLLECTION: &str = "Post";

/// Name of the accounts collection read by the accounts collaborator.
pub const ACCOUNTS_COLLECTION: &str = "Account";

/// Build a database handle from configuration.
///
/// The driver connects lazily and manages its own connection pool; this
/// performs no I/O beyond parsing the connection string.
pub async fn connect(config: &DatabaseConfig) -> ServiceResult<Database> {
    let client = Client::with_uri_str(&config.url).await?;

    Ok(client.database(&config.database))
}
