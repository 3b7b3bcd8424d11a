// handlers/gratitudes.rs - /api/gratitudes collection and item handlers
//
// Item handlers receive the row from the `load_gratitude` stage, so they only
// run once the id is known to exist.

use axum::{
    extract::{rejection::JsonRejection, Extension, OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::{sanitize, serialize_gratitude, GratitudeResponse};
use crate::database::{Gratitude, GratitudeUpdate, NewGratitude};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST body; every field must be present and non-null (empty strings are fine)
#[derive(Debug, Default, Deserialize)]
pub struct CreateGratitudeRequest {
    pub thankful_for: Option<String>,
    pub did_well: Option<String>,
    pub achieve: Option<String>,
    pub soc: Option<String>,
}

/// PATCH body; empty strings count as "not supplied"
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGratitudeRequest {
    pub thankful_for: Option<String>,
    pub did_well: Option<String>,
    pub achieve: Option<String>,
    pub soc: Option<String>,
}

fn required(field: &str, value: Option<String>) -> ApiResult<String> {
    value.ok_or_else(|| ApiError::bad_request(format!("Missing {} in request body", field)))
}

impl CreateGratitudeRequest {
    /// Null-check in column order; the first missing field is reported.
    /// Text is sanitized before it is stored.
    pub fn into_new_gratitude(self, author_id: i32) -> ApiResult<NewGratitude> {
        let thankful_for = required("thankful_for", self.thankful_for)?;
        let did_well = required("did_well", self.did_well)?;
        let achieve = required("achieve", self.achieve)?;
        let soc = required("soc", self.soc)?;

        Ok(NewGratitude {
            thankful_for: sanitize(&thankful_for),
            did_well: sanitize(&did_well),
            achieve: sanitize(&achieve),
            soc: sanitize(&soc),
            author_id,
        })
    }
}

impl UpdateGratitudeRequest {
    /// Keep only truthy (non-empty) fields; at least one is required.
    pub fn into_update(self) -> ApiResult<GratitudeUpdate> {
        let truthy = |v: Option<String>| v.filter(|s| !s.is_empty());
        let update = GratitudeUpdate {
            thankful_for: truthy(self.thankful_for),
            did_well: truthy(self.did_well),
            achieve: truthy(self.achieve),
            soc: truthy(self.soc),
        };

        if update.is_empty() {
            return Err(ApiError::bad_request("Body must contain data."));
        }
        Ok(update)
    }
}

/// A request without a JSON content type is treated as an empty body;
/// a body over the size limit is a 413 and one that does not parse is a 400.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection @ JsonRejection::BytesRejection(_))
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
        {
            Err(ApiError::payload_too_large(rejection.body_text()))
        }
        Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
    }
}

/// GET /api/gratitudes - list the caller's gratitudes
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<GratitudeResponse>>> {
    let gratitudes = state.store.list_by_author(user.id).await?;
    tracing::debug!("Listing {} gratitudes for user {}", gratitudes.len(), user.id);
    Ok(Json(gratitudes.iter().map(serialize_gratitude).collect()))
}

/// POST /api/gratitudes - create a gratitude owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateGratitudeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let new_gratitude = body_or_default(payload)?.into_new_gratitude(user.id)?;
    let gratitude = state.store.insert(new_gratitude).await?;
    tracing::info!("Created gratitude {} for user {}", gratitude.id, user.id);

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), gratitude.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(serialize_gratitude(&gratitude)),
    ))
}

/// GET /api/gratitudes/:gratitude_id
pub async fn get_one(Extension(gratitude): Extension<Gratitude>) -> Json<GratitudeResponse> {
    Json(serialize_gratitude(&gratitude))
}

/// DELETE /api/gratitudes/:gratitude_id
pub async fn delete_one(
    State(state): State<AppState>,
    Extension(gratitude): Extension<Gratitude>,
) -> ApiResult<StatusCode> {
    let removed = state.store.delete_by_id(gratitude.id).await?;
    tracing::info!("Deleted gratitude {} ({} row(s))", gratitude.id, removed);
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/gratitudes/:gratitude_id
pub async fn update_one(
    State(state): State<AppState>,
    Extension(gratitude): Extension<Gratitude>,
    payload: Result<Json<UpdateGratitudeRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let update = body_or_default(payload)?.into_update()?;
    let updated = state.store.update_by_id(gratitude.id, update).await?;
    tracing::info!("Updated gratitude {} ({} row(s))", gratitude.id, updated);
    Ok(StatusCode::NO_CONTENT)
}
