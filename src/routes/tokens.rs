// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Public token registry routes.

use crate::error::{AppError, Result};
use crate::models::Token;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tokens", get(list_tokens))
        .route("/api/tokens/{address}/{chain_id}", get(get_token))
}

async fn list_tokens(State(state): State<Arc<AppState>>) -> Json<Vec<Token>> {
    Json(state.store.get_tokens())
}

/// Look up a token by contract address (case-insensitive) and chain.
async fn get_token(
    State(state): State<Arc<AppState>>,
    Path((address, chain_id)): Path<(String, String)>,
) -> Result<Json<Token>> {
    state
        .store
        .get_token_by_address(&address, &chain_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Token not found".to_string()))
}
