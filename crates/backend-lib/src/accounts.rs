// ============================
// crates/backend-lib/src/accounts.rs
// ============================
//! Account store abstraction with flat-file implementation.
use std::{collections::HashMap, fs, path::{Path, PathBuf}};
use tokio::fs as tokio_fs;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use hrdesk_common::AccountId;
use crate::error::AppError;

/// A stored account. Created on registration, read on login, never mutated
/// by the authentication core.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    /// Unique, stored lowercase
    pub email: String,
    /// scrypt PHC-format hash of the secret
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Trait for account store backends
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by email. `Ok(None)` means unknown identifier;
    /// `Err` is reserved for store unavailability.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Load an account by id
    async fn load(&self, id: AccountId) -> Result<Option<Account>, AppError>;

    /// Insert a new account. Fails with `AccountExists` if the email is
    /// already registered.
    async fn insert(&self, account: Account) -> Result<(), AppError>;
}

/// Flat-file implementation of the `AccountStore` trait.
///
/// One JSON document per account under `<root>/accounts/<id>.json`, plus an
/// email index at `<root>/accounts/index.json`.
#[derive(Clone)]
pub struct FlatFileAccounts {
    root: PathBuf,
}

impl FlatFileAccounts {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("accounts"))?;
        Ok(Self { root })
    }

    fn account_path(&self, id: AccountId) -> PathBuf {
        self.root.join("accounts").join(format!("{id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("accounts").join("index.json")
    }

    async fn read_index(&self) -> Result<HashMap<String, AccountId>, AppError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = tokio_fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::TransientStore(e.to_string()))?;
        let index = serde_json::from_str(&content)?;
        Ok(index)
    }

    async fn write_index(&self, index: &HashMap<String, AccountId>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(index)?;
        tokio_fs::write(self.index_path(), json)
            .await
            .map_err(|e| AppError::TransientStore(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for FlatFileAccounts {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let index = self.read_index().await?;
        match index.get(&email.to_lowercase()) {
            Some(id) => self.load(*id).await,
            None => Ok(None),
        }
    }

    async fn load(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        let path = self.account_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio_fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::TransientStore(e.to_string()))?;
        let account: Account = serde_json::from_str(&content)?;
        Ok(Some(account))
    }

    async fn insert(&self, account: Account) -> Result<(), AppError> {
        let mut index = self.read_index().await?;
        let email = account.email.to_lowercase();
        if index.contains_key(&email) {
            return Err(AppError::AccountExists);
        }

        let json = serde_json::to_string_pretty(&account)?;
        tokio_fs::write(self.account_path(account.id), json)
            .await
            .map_err(|e| AppError::TransientStore(e.to_string()))?;

        index.insert(email, account.id);
        self.write_index(&index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: "testuser".to_string(),
            email: email.to_string(),
            password_hash: "$scrypt$dummy".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileAccounts::new(dir.path()).unwrap();

        let acct = account("alice@example.com");
        let id = acct.id;
        store.insert(acct).await.unwrap();

        let found = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.username, "testuser");

        // Lookup is case-insensitive on the identifier
        let found = store.find_by_email("Alice@Example.COM").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn unknown_email_is_absent_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileAccounts::new(dir.path()).unwrap();

        let found = store.find_by_email("ghost@x.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileAccounts::new(dir.path()).unwrap();

        store.insert(account("bob@example.com")).await.unwrap();
        let err = store.insert(account("bob@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::AccountExists));
    }
}
