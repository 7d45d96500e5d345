pub mod health;
pub mod swift_codes;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /swift-codes                        create
/// /swift-codes/{swift_code}           lookup, delete
/// /swift-codes/country/{iso2}         lookup by country
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/swift-codes", swift_codes::router())
}
