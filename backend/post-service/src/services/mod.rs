/// Business logic layer for post-service
///
/// This module provides high-level operations:
/// - Post service: post CRUD plus like/dislike and comment operations
pub mod posts;

// Re-export commonly used services
pub use posts::PostService;
