use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

use crate::error::PersistenceError;
use crate::users::repo_types::{decode_id, encode_id, NewUser, User, UserUpdate};

/// Storage operations for the `users` table.
///
/// Lookups that match no row succeed with an empty value (`User::default()`,
/// an empty password) and writes against a missing id succeed without effect.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the id assigned by the database.
    async fn create(&self, user: &NewUser) -> Result<u64, PersistenceError>;
    async fn delete(&self, id: u64) -> Result<(), PersistenceError>;
    /// Overwrite username and email. Password and creation time are left alone.
    async fn update(&self, id: u64, user: &UserUpdate) -> Result<(), PersistenceError>;
    /// All users whose username contains `username`, in no particular order.
    async fn search(&self, username: &str) -> Result<Vec<User>, PersistenceError>;
    async fn search_by_id(&self, id: u64) -> Result<User, PersistenceError>;
    /// Credential lookup: only `id` and `password` are populated.
    async fn search_by_email(&self, email: &str) -> Result<User, PersistenceError>;
    async fn search_password(&self, id: u64) -> Result<String, PersistenceError>;
    async fn update_password(&self, id: u64, password: &str) -> Result<(), PersistenceError>;
}

/// SQL-backed user repository over a shared connection pool.
#[derive(Debug, Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

fn failed(op: &'static str) -> impl FnOnce(sqlx::Error) -> PersistenceError {
    move |e| {
        error!(error = %e, op, "user statement failed");
        PersistenceError::from(e)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> Result<u64, PersistenceError> {
        let result = sqlx::query("INSERT INTO users (username, email, passwd) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.db)
            .await
            .map_err(failed("create"))?;

        let id = decode_id(result.last_insert_rowid()).map_err(failed("create"))?;
        debug!(user_id = id, "user created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> Result<(), PersistenceError> {
        let Some(key) = encode_id(id) else {
            return Ok(());
        };
        let result = sqlx::query("DELETE FROM users WHERE userId = ?")
            .bind(key)
            .execute(&self.db)
            .await
            .map_err(failed("delete"))?;
        debug!(rows_affected = result.rows_affected(), "user deleted");
        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(&self, id: u64, user: &UserUpdate) -> Result<(), PersistenceError> {
        let Some(key) = encode_id(id) else {
            return Ok(());
        };
        let result = sqlx::query("UPDATE users SET username = ?, email = ? WHERE userId = ?")
            .bind(&user.username)
            .bind(&user.email)
            .bind(key)
            .execute(&self.db)
            .await
            .map_err(failed("update"))?;
        debug!(rows_affected = result.rows_affected(), "user updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, username: &str) -> Result<Vec<User>, PersistenceError> {
        let pattern = format!("%{username}%");
        let users = sqlx::query_as::<_, User>(
            "SELECT userId, username, email, createdAt FROM users WHERE username LIKE ?",
        )
        .bind(pattern)
        .fetch_all(&self.db)
        .await
        .map_err(failed("search"))?;
        debug!(count = users.len(), "users found");
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn search_by_id(&self, id: u64) -> Result<User, PersistenceError> {
        let Some(key) = encode_id(id) else {
            return Ok(User::default());
        };
        let user = sqlx::query_as::<_, User>(
            "SELECT userId, username, email, createdAt FROM users WHERE userId = ?",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .map_err(failed("search_by_id"))?;
        Ok(user.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn search_by_email(&self, email: &str) -> Result<User, PersistenceError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            "SELECT userId, passwd FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(failed("search_by_email"))?;

        let Some((raw_id, password)) = row else {
            debug!("no user with this email");
            return Ok(User::default());
        };
        Ok(User {
            id: decode_id(raw_id).map_err(failed("search_by_email"))?,
            password,
            ..User::default()
        })
    }

    #[instrument(skip(self))]
    async fn search_password(&self, id: u64) -> Result<String, PersistenceError> {
        let Some(key) = encode_id(id) else {
            return Ok(String::new());
        };
        let password = sqlx::query_scalar::<_, String>("SELECT passwd FROM users WHERE userId = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await
            .map_err(failed("search_password"))?;
        Ok(password.unwrap_or_default())
    }

    #[instrument(skip(self, password))]
    async fn update_password(&self, id: u64, password: &str) -> Result<(), PersistenceError> {
        let Some(key) = encode_id(id) else {
            return Ok(());
        };
        let result = sqlx::query("UPDATE users SET passwd = ? WHERE userId = ?")
            .bind(password)
            .bind(key)
            .execute(&self.db)
            .await
            .map_err(failed("update_password"))?;
        debug!(rows_affected = result.rows_affected(), "password updated");
        Ok(())
    }
}
