//! Handlers for scaffold component CRUD and fleet listing.
//!
//! Writes go through `validate_and_prepare` with the live-table directory;
//! nothing is persisted that the validator did not approve. The fleet
//! listing fetches the full collection and hands it to the core query
//! engine for filtering, summary counts, ordering, and pagination.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use scaffold_core::error::CoreError;
use scaffold_core::fleet::{self, FleetQuery};
use scaffold_core::types::DbId;
use scaffold_core::validation::{validate_and_prepare, CandidateComponent};
use scaffold_db::repositories::{ComponentRepo, PgDirectory};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the fleet listing: filter criteria plus `page`.
///
/// Kept flat rather than `#[serde(flatten)]`-ing a [`FleetQuery`]: flattened
/// structs break non-string fields under urlencoded deserialization. `page`
/// stays a raw string for the same reason, and so junk values fall back to
/// the first page instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub site: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub in_use: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    fn into_parts(self) -> (FleetQuery, Option<u32>) {
        let page = self.page.as_deref().and_then(|p| p.trim().parse().ok());
        let filter = FleetQuery {
            q: self.q,
            site: self.site,
            category: self.category,
            condition: self.condition,
            in_use: self.in_use,
        };
        (filter, page)
    }
}

fn component_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ScaffoldComponent",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /components
// ---------------------------------------------------------------------------

/// List the fleet: filtered, summarized, ordered, paginated.
pub async fn list_components(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, page) = params.into_parts();
    let fleet = ComponentRepo::list_fleet(&state.pool).await?;
    let view = fleet::run_query(&filter, page, fleet);
    tracing::debug!(total = view.total, page = view.page, "Listed fleet");
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /components
// ---------------------------------------------------------------------------

/// Register a new component.
pub async fn create_component(
    State(state): State<AppState>,
    Json(candidate): Json<CandidateComponent>,
) -> AppResult<impl IntoResponse> {
    let record = validate_and_prepare(&candidate, None, &PgDirectory::new(&state.pool)).await?;
    let created = ComponentRepo::create(&state.pool, &record).await?;
    tracing::info!(id = created.id, asset_code = %created.asset_code, "Component created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /components/{id}
// ---------------------------------------------------------------------------

/// Get a single component by ID.
pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let component = ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    Ok(Json(DataResponse { data: component }))
}

// ---------------------------------------------------------------------------
// PUT /components/{id}
// ---------------------------------------------------------------------------

/// Update an existing component. The record's own id is excluded from the
/// uniqueness pre-check so an unchanged code/site never self-conflicts.
pub async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(candidate): Json<CandidateComponent>,
) -> AppResult<impl IntoResponse> {
    ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| component_not_found(id))?;

    let record =
        validate_and_prepare(&candidate, Some(id), &PgDirectory::new(&state.pool)).await?;
    let updated = ComponentRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    tracing::info!(id = updated.id, "Component updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /components/{id}
// ---------------------------------------------------------------------------

/// Delete a component. No soft-delete, no history retention.
pub async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ComponentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(component_not_found(id));
    }
    tracing::info!(id, "Component deleted");
    Ok(StatusCode::NO_CONTENT)
}
