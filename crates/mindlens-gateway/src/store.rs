//! User storage behind a capability trait so handlers never touch a global
//! map directly. The only implementation is in-memory and process-lifetime;
//! a restart clears it, and protected calls then 404 as designed.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::User;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User already exists")]
    AlreadyExists,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, email: &str) -> Option<User>;
    /// Email is the uniqueness key; inserting a taken email fails and
    /// leaves the existing record untouched.
    async fn insert(&self, user: User) -> Result<(), StoreError>;
    async fn contains(&self, email: &str) -> bool;
}

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    async fn insert(&self, user: User) -> Result<(), StoreError> {
        // Check-and-put under one write lock so overlapping registrations
        // cannot both win the same email.
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::AlreadyExists);
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn contains(&self, email: &str) -> bool {
        self.users.read().await.contains_key(email)
    }
}
