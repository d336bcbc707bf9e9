use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{
    id::UserId,
    repo::UserStore,
    repo_types::{secondary_document, JoinedUser, NewUser, User},
};

/// In-process store with the same observable behaviour as `PgUserStore`.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    another: Mutex<Vec<(Uuid, Value)>>,
}

impl MemoryUserStore {
    /// Seeds a document into the secondary collection and returns its id.
    pub fn add_secondary(&self, data: Value) -> Uuid {
        let id = Uuid::new_v4();
        self.another.lock().expect("lock").push((id, data));
        id
    }

    pub fn secondary_len(&self) -> usize {
        self.another.lock().expect("lock").len()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().expect("lock").clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId> {
        let id = UserId::new();
        self.users.lock().expect("lock").push(User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            linked_ids: Vec::new(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().expect("lock");
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().expect("lock");
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn push_linked_id(&self, id: UserId, linked: &str) -> anyhow::Result<u64> {
        let mut users = self.users.lock().expect("lock");
        match users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.linked_ids.push(linked.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn join_linked(&self) -> anyhow::Result<Vec<JoinedUser>> {
        let users = self.users.lock().expect("lock");
        let another = self.another.lock().expect("lock");
        let joined = users
            .iter()
            .map(|u| {
                let mut matches: Vec<(usize, Value)> = another
                    .iter()
                    .filter_map(|(doc_id, data)| {
                        let key = doc_id.hyphenated().to_string();
                        let pos = u.linked_ids.iter().position(|l| *l == key)?;
                        Some((pos, secondary_document(*doc_id, data.clone())))
                    })
                    .collect();
                matches.sort_by_key(|(pos, _)| *pos);
                JoinedUser {
                    id: u.id,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    password_hash: u.password_hash.clone(),
                    linked_ids: u.linked_ids.clone(),
                    joined_data: matches.into_iter().map(|(_, d)| d).collect(),
                }
            })
            .collect();
        Ok(joined)
    }

    async fn delete(&self, id: UserId) -> anyhow::Result<u64> {
        let mut users = self.users.lock().expect("lock");
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }
}
