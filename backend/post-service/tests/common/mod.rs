//! Shared helpers for integration tests
//!
//! Provides a MongoDB container bootstrap and a mock accounts collaborator
//! that doesn't require a real accounts store.

use async_trait::async_trait;
use mongodb::{Client, Database};
use std::collections::HashMap;
use std::sync::Arc;
use testcontainers::{core::WaitFor, runners::AsyncRunner, GenericImage};

use post_service::accounts::Accounts;
use post_service::error::ServiceResult;
use post_service::models::Credentials;
use post_service::PostService;

/// Bootstrap a test database with testcontainers
pub async fn setup_test_db() -> Result<Database, Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mongo_image = GenericImage::new("mongo", "7").with_wait_for(WaitFor::message_on_stdout(
        "Waiting for connections",
    ));

    let container = mongo_image.start().await?;
    let port = container.get_host_port_ipv4(27017).await?;

    let connection_string = format!("mongodb://127.0.0.1:{}", port);
    let client = Client::with_uri_str(&connection_string).await?;

    // Leak container to keep it alive for the duration of the test
    // This is acceptable for integration tests
    Box::leak(Box::new(container));

    Ok(client.database("post-service-test"))
}

/// Mock accounts collaborator backed by an in-memory credential table
pub struct StaticAccounts {
    /// Simulated account store: username -> password
    users: HashMap<String, String>,
}

impl StaticAccounts {
    /// Create a mock collaborator with the given username/password pairs
    pub fn new(users: &[(&str, &str)]) -> Self {
        Self {
            users: users
                .iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
        }
    }

    /// Create a mock collaborator that rejects everyone
    pub fn empty() -> Self {
        Self::new(&[])
    }
}

#[async_trait]
impl Accounts for StaticAccounts {
    async fn is_authorized(&self, username: &str, password: &str) -> ServiceResult<bool> {
        Ok(self
            .users
            .get(username)
            .map(|stored| stored == password)
            .unwrap_or(false))
    }
}

/// Build a post service over the test database and mock collaborator
pub fn service_with(database: &Database, accounts: StaticAccounts) -> PostService {
    PostService::new(database, Arc::new(accounts))
}

pub fn creds(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}
