//! Data access for the `users` table of the web API.

pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod users;

pub use error::PersistenceError;
pub use users::{NewUser, User, UserRepository, UserStore, UserUpdate};
