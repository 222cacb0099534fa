/// Post Service Library
///
/// Data-access and business-logic layer for posts on the Ripple social
/// platform: CRUD plus like/dislike and comment operations against the
/// MongoDB "Post" collection, with authorization delegated to the accounts
/// collaborator. HTTP routing and request parsing live in the upstream
/// service layer, not here.
///
/// # Modules
///
/// - `accounts`: Accounts collaborator seam and MongoDB implementation
/// - `config`: Configuration management
/// - `db`: Database bootstrap and repository functions
/// - `error`: Error types and handling
/// - `models`: Document schema, views, and typed inputs
/// - `security`: Password hashing and verification
/// - `services`: Business logic layer
pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use services::PostService;
