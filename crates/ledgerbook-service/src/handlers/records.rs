//! Record read handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use ledgerbook_core::{Bank, BankId, File, FileId, TxHash, User, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// List every user.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.contract.get_all_users()?))
}

/// Get a user by id.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = UserId::new(id)?;
    Ok(Json(state.contract.get_user(&id)?))
}

/// List every bank.
pub async fn list_banks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Bank>>, ApiError> {
    Ok(Json(state.contract.get_all_banks()?))
}

/// Get a bank by id.
pub async fn get_bank(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Bank>, ApiError> {
    let id = BankId::new(id)?;
    Ok(Json(state.contract.get_bank(&id)?))
}

/// List every file.
pub async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<Vec<File>>, ApiError> {
    Ok(Json(state.contract.get_all_files()?))
}

/// Get a file by id.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<File>, ApiError> {
    let id = FileId::new(id)?;
    Ok(Json(state.contract.get_file(&id)?))
}

/// Get the user that owns a transaction.
pub async fn get_user_by_transaction_hash(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Result<Json<User>, ApiError> {
    let hash = TxHash::new(hash)?;
    Ok(Json(state.contract.get_user_by_transaction_hash(&hash)?))
}
