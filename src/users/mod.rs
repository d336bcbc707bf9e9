use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod id;
#[cfg(test)]
pub(crate) mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::account_routes())
        .merge(handlers::link_routes())
}
