pub mod repo;
pub mod repo_types;

pub use repo::{UserRepository, UserStore};
pub use repo_types::{NewUser, User, UserUpdate};
