use axum::routing::{get, post};
use axum::Router;

use crate::handlers::swift_codes;
use crate::state::AppState;

/// SWIFT code routes mounted at `/swift-codes`.
///
/// ```text
/// POST   /                  -> create
/// GET    /{swift_code}      -> get_swift_code
/// DELETE /{swift_code}      -> delete
/// GET    /country/{iso2}    -> get_by_country
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(swift_codes::create))
        .route(
            "/{swift_code}",
            get(swift_codes::get_swift_code).delete(swift_codes::delete),
        )
        .route("/country/{iso2}", get(swift_codes::get_by_country))
}
