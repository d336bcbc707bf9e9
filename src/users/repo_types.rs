use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use super::id::UserId;

/// User record as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String, // argon2 PHC string, never the plaintext
    pub linked_ids: Vec<String>,
}

/// Fields of a record about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A user together with the secondary documents its `linked_ids` point at.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JoinedUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub linked_ids: Vec<String>,
    pub joined_data: Vec<serde_json::Value>,
}

/// Shape of a secondary document inside `joined_data`: object documents get
/// their id merged in as `_id`, anything else is wrapped as `{"_id", "data"}`.
pub fn secondary_document(id: Uuid, data: serde_json::Value) -> serde_json::Value {
    let id = serde_json::Value::String(id.hyphenated().to_string());
    match data {
        serde_json::Value::Object(mut map) => {
            map.insert("_id".into(), id);
            serde_json::Value::Object(map)
        }
        other => serde_json::json!({ "_id": id, "data": other }),
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub linked_ids: Vec<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id.into(),
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            linked_ids: r.linked_ids,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct JoinedUserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub linked_ids: Vec<String>,
    pub joined_data: Json<Vec<SecondaryRow>>,
}

/// One matched `another_collection` row as aggregated by the join query.
#[derive(Debug, Deserialize)]
pub(crate) struct SecondaryRow {
    pub id: Uuid,
    pub data: serde_json::Value,
}

impl From<JoinedUserRow> for JoinedUser {
    fn from(r: JoinedUserRow) -> Self {
        Self {
            id: r.id.into(),
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            linked_ids: r.linked_ids,
            joined_data: r
                .joined_data
                .0
                .into_iter()
                .map(|d| secondary_document(d.id, d.data))
                .collect(),
        }
    }
}
