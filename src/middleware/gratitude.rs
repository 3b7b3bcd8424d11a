use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "No matching gratitude...";

/// Item-route stage: resolve `:gratitude_id` to a stored row and hand it to the
/// handler as an `Extension<Gratitude>`.
///
/// Lookup is by id only, not by owner. Ids that are not integers cannot match
/// any row and get the same 404.
pub async fn load_gratitude(
    State(state): State<AppState>,
    Path(gratitude_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(id) = gratitude_id.parse::<i32>() else {
        tracing::debug!("Gratitude id '{}' is not an integer", gratitude_id);
        return Err(ApiError::not_found(NOT_FOUND_MESSAGE));
    };

    let gratitude = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;

    request.extensions_mut().insert(gratitude);
    Ok(next.run(request).await)
}
