use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    extract::{ApiJson, ApiQuery},
    state::AppState,
    users::{
        dto::{ChainDeleteQuery, LinkIdRequest, LoginRequest, MessageResponse, RegisterRequest},
        id::UserId,
        password::{hash_password, verify_password},
        repo_types::{JoinedUser, NewUser},
    },
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/link-id", post(link_id))
        .route("/join", get(join))
        .route("/chain-delete", delete(chain_delete))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    // no uniqueness check on email: a second registration creates a second record
    let password_hash = hash_password(&payload.password)?;
    let id = state
        .store
        .insert(NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
        })
        .await?;

    info!(user_id = %id, "user registered");
    Ok(Json(MessageResponse::new("User registered successfully")))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(user) = state.store.find_by_email(&payload.email).await? else {
        warn!("login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(MessageResponse::new("Login successful")))
}

#[instrument(skip(state, payload))]
pub async fn link_id(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LinkIdRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id: UserId = payload.user_id.parse()?;

    if state.store.find_by_id(user_id).await?.is_none() {
        warn!(%user_id, "link-id on unknown user");
        return Err(AppError::NotFound("User not found".into()));
    }

    // the record can vanish between lookup and update
    if state.store.push_linked_id(user_id, &payload.id_to_link).await? == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    info!(%user_id, linked = %payload.id_to_link, "id linked");
    Ok(Json(MessageResponse::new("ID linked successfully")))
}

/// Every user with the secondary documents referenced by its `linked_ids`.
/// Unpaginated.
#[instrument(skip(state))]
pub async fn join(State(state): State<AppState>) -> Result<Json<Vec<JoinedUser>>, AppError> {
    let joined = state.store.join_linked().await?;
    info!(users = joined.len(), "join complete");
    Ok(Json(joined))
}

/// Deletes only the user record; nothing in `another_collection` is touched.
#[instrument(skip(state))]
pub async fn chain_delete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChainDeleteQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id: UserId = query.user_id.parse()?;

    if state.store.delete(user_id).await? == 0 {
        warn!(%user_id, "chain-delete on unknown user");
        return Err(AppError::NotFound("User not found".into()));
    }

    info!(%user_id, "user deleted");
    Ok(Json(MessageResponse::new(
        "User and related data deleted successfully",
    )))
}
