use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    id::UserId,
    repo_types::{JoinedUser, JoinedUserRow, NewUser, User, UserRow},
};

/// Persistence seam for the user handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId>;
    /// Oldest matching record when several share the email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;
    /// Appends to `linked_ids`; returns the number of records matched.
    async fn push_linked_id(&self, id: UserId, linked: &str) -> anyhow::Result<u64>;
    async fn join_linked(&self) -> anyhow::Result<Vec<JoinedUser>>;
    /// Returns the number of records deleted.
    async fn delete(&self, id: UserId) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId> {
        let (id,): (uuid::Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(id.into())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, linked_ids
            FROM users
            WHERE email = $1
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, linked_ids
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(row.map(User::from))
    }

    async fn push_linked_id(&self, id: UserId, linked: &str) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET linked_ids = array_append(linked_ids, $2)
             WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(linked)
        .execute(&self.db)
        .await
        .context("append linked id")?;
        Ok(res.rows_affected())
    }

    async fn join_linked(&self) -> anyhow::Result<Vec<JoinedUser>> {
        // left join: users without matches still come back with an empty array
        let rows = sqlx::query_as::<_, JoinedUserRow>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.linked_ids,
                   COALESCE(j.joined_data, '[]'::jsonb) AS joined_data
              FROM users u
              LEFT JOIN LATERAL (
                   SELECT jsonb_agg(
                              jsonb_build_object('id', a.id, 'data', a.data)
                              ORDER BY array_position(u.linked_ids, a.id::text)
                          ) AS joined_data
                     FROM another_collection a
                    WHERE a.id::text = ANY(u.linked_ids)
              ) j ON true
             ORDER BY u.seq
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("join users with another_collection")?;
        Ok(rows.into_iter().map(JoinedUser::from).collect())
    }

    async fn delete(&self, id: UserId) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected())
    }
}
