use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use time::OffsetDateTime;

/// User record in the database.
///
/// `User::default()` is the zero value returned by lookups that match no row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String, // pre-hashed by the caller, never exposed in JSON
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub created_at: Option<OffsetDateTime>,
}

impl User {
    /// True for the zero value, i.e. a lookup that found nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FromRow<'_, SqliteRow> for User {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: decode_id(row.try_get("userId")?)?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: String::new(),
            created_at: Some(row.try_get("createdAt")?),
        })
    }
}

/// Request body for creating a user. The id is assigned by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile fields overwritten by an update. The password has its own path.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
}

/// Convert a stored `userId` into the public identifier.
pub(crate) fn decode_id(raw: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Convert a public identifier into the stored form. `None` means no row can carry it.
pub(crate) fn encode_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn default_user_is_empty() {
        assert!(User::default().is_empty());
        let user = User {
            id: 7,
            ..User::default()
        };
        assert!(!user.is_empty());
    }

    #[test]
    fn serialization_hides_password() {
        let user = User {
            id: 1,
            username: "john".into(),
            email: "john@example.com".into(),
            password: "$argon2id$secret".into(),
            created_at: Some(datetime!(2024-03-01 10:00:00 UTC)),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("john@example.com"));
        assert!(json.contains("2024-03-01T10:00:00Z"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn ids_outside_storage_range() {
        assert_eq!(encode_id(42), Some(42));
        assert_eq!(encode_id(u64::MAX), None);
        assert_eq!(decode_id(42).unwrap(), 42);
        assert!(matches!(decode_id(-1), Err(sqlx::Error::Decode(_))));
    }
}
