use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::users::{UserRepository, UserStore};

/// Handles the host application shares between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database).await?;
        let users = Arc::new(UserStore::new(db.clone())) as Arc<dyn UserRepository>;

        Ok(Self { db, config, users })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, users: Arc<dyn UserRepository>) -> Self {
        Self { db, config, users }
    }
}
