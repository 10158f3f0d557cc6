//! User storage strategies
//!
//! Authentication only needs username lookup and insert, so the store is a
//! small trait with two implementations: the `users` table, and a mutable
//! in-memory map seeded with the well-known dev users. Which one backs the
//! server is a config switch (`AUTH_BACKEND`).

use async_trait::async_trait;
use dashmap::DashMap;
use shared::error::{AppError, AppResult, ErrorCode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::db;

/// Authentication user record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub role: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn insert(&self, user: User) -> AppResult<()>;
}

/// User store backed by the `users` table
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(e: sqlx::Error) -> AppError {
    tracing::error!("user store error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        db::users::find_by_username(&self.pool, username)
            .await
            .map_err(store_error)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        db::users::find_by_email(&self.pool, email)
            .await
            .map_err(store_error)
    }

    async fn insert(&self, user: User) -> AppResult<()> {
        db::users::insert(&self.pool, &user).await.map_err(store_error)
    }
}

/// Mutable in-memory user store, keyed by username
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Store pre-seeded with the same dev users the database seeder inserts
    pub fn with_default_users() -> Result<Self, argon2::password_hash::Error> {
        let store = Self::new();
        for (username, password, role) in [
            ("admin", "Admin123*", super::ROLE_ADMIN),
            ("customer", "Customer123*", super::ROLE_CUSTOMER),
        ] {
            let user = User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                hashed_password: hash_password(password)?,
                role: role.to_string(),
            };
            store.users.insert(user.username.clone(), user);
        }
        Ok(store)
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, user: User) -> AppResult<()> {
        use dashmap::mapref::entry::Entry;
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::new(ErrorCode::UsernameTaken)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;

    fn user(username: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            hashed_password: "x".to_string(),
            role: "customer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_insert_and_find() {
        let store = MemoryUserStore::new();
        store.insert(user("alice", "alice@example.com")).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.email, "alice@example.com");

        let by_email = store.find_by_email("alice@example.com").await.unwrap();
        assert!(by_email.is_some());

        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_username() {
        let store = MemoryUserStore::new();
        store.insert(user("alice", "a1@example.com")).await.unwrap();

        let err = store.insert(user("alice", "a2@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameTaken);
    }

    #[tokio::test]
    async fn test_default_users_seeded_with_valid_hashes() {
        let store = MemoryUserStore::with_default_users().unwrap();

        let admin = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, "admin");
        assert!(verify_password("Admin123*", &admin.hashed_password));

        let customer = store.find_by_username("customer").await.unwrap().unwrap();
        assert_eq!(customer.role, "customer");
        assert!(verify_password("Customer123*", &customer.hashed_password));
    }
}
