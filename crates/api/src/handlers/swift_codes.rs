//! Handlers for the `/swift-codes` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use swiftreg_core::model::{CountrySwiftCodes, NewBankBranch, SwiftCodeDetails};

use crate::error::AppResult;
use crate::response::{DeleteResponse, MessageResponse};
use crate::state::AppState;

/// GET /v1/swift-codes/{swift_code}
///
/// A headquarters comes back with its `branches`; a branch without the key.
pub async fn get_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> AppResult<Json<SwiftCodeDetails>> {
    let details = state.registry.lookup(&swift_code).await?;
    Ok(Json(details))
}

/// GET /v1/swift-codes/country/{iso2}
pub async fn get_by_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> AppResult<Json<CountrySwiftCodes>> {
    let codes = state.registry.lookup_by_country(&country_iso2).await?;
    Ok(Json(codes))
}

/// POST /v1/swift-codes
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBankBranch>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(candidate) = payload?;
    state.registry.create(candidate).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Swift code created successfully")),
    ))
}

/// DELETE /v1/swift-codes/{swift_code}
///
/// An 8-character code removes the whole bank. Deleting nothing is not an
/// error: the response reports 0 records.
pub async fn delete(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.registry.delete(&swift_code).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}
