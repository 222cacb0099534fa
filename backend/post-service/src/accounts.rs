/// Accounts collaborator
///
/// Authorization is delegated to the accounts service; this module defines
/// the seam the post service consumes (`Accounts`) and a MongoDB-backed
/// implementation that verifies credentials against the "Account"
/// collection. Account lifecycle (registration, password policy) is owned
/// by the accounts service and is not handled here.
use async_trait::async_trait;
use mongodb::bson::{self, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db::ACCOUNTS_COLLECTION;
use crate::error::ServiceResult;
use crate::security::password::verify_password;

/// The sole authentication primitive consumed by the post service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// True when the username/password pair identifies a valid account.
    async fn is_authorized(&self, username: &str, password: &str) -> ServiceResult<bool>;
}

/// The persisted account schema (collection "Account").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDocument {
    #[serde(rename = "_id")]
    pub username: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

/// MongoDB-backed accounts collaborator.
#[derive(Clone)]
pub struct AccountsRepository {
    accounts: Collection<AccountDocument>,
}

impl AccountsRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            accounts: database.collection(ACCOUNTS_COLLECTION),
        }
    }
}

#[async_trait]
impl Accounts for AccountsRepository {
    /// An unknown username and a mismatched password both yield `false`;
    /// errors are reserved for store failures and malformed stored hashes.
    async fn is_authorized(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let account = self.accounts.find_one(doc! { "_id": username }).await?;

        match account {
            Some(account) => verify_password(password, &account.password_hash),
            None => Ok(false),
        }
    }
}
