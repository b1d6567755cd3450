//! Venue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fyyur_common::catalog::SearchKind;
use fyyur_common::db::Venue;
use fyyur_common::forms::{SearchForm, VenueForm};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::extract::{FormOrJson, IdPath};
use crate::views::{self, DeleteView, FormView, SearchView, VenueDetailView, VenueListView, VenueView};
use crate::AppState;

/// Query string of DELETE routes
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<VenueListView>, ApiError> {
    let areas = state.catalog.list_venues_grouped().await.map_err(ApiError::from_read)?;
    Ok(Json(VenueListView { areas }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<SearchForm>,
) -> Result<Json<SearchView>, ApiError> {
    let results = state
        .catalog
        .search(SearchKind::Venue, &form.search_term)
        .await
        .map_err(ApiError::from_read)?;

    Ok(Json(SearchView {
        search_term: form.search_term,
        results,
    }))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<VenueDetailView>, ApiError> {
    let detail = state.catalog.venue_detail(id).await.map_err(ApiError::from_read)?;
    Ok(Json(views::venue_detail_view(&detail)))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormView<VenueForm, VenueView>> {
    Json(FormView {
        form: views::blank_venue_form(),
        record: None,
    })
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<VenueForm>,
) -> Result<(StatusCode, Json<VenueView>), ApiError> {
    let action = format!("Venue {} could not be listed", form.name.as_deref().unwrap_or_default());
    let venue = state
        .catalog
        .create_venue(form)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok((StatusCode::CREATED, Json(views::venue_view(&venue))))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<FormView<VenueForm, VenueView>>, ApiError> {
    let venue: Venue = state.catalog.venue(id).await.map_err(ApiError::from_read)?;
    Ok(Json(FormView {
        form: views::venue_form(&venue),
        record: Some(views::venue_view(&venue)),
    }))
}

/// POST /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    FormOrJson(form): FormOrJson<VenueForm>,
) -> Result<Json<VenueView>, ApiError> {
    let action = format!("Venue {} could not be updated", id);
    let venue = state
        .catalog
        .update_venue(id, form)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::venue_view(&venue)))
}

/// DELETE /venues/:id?confirm=true
///
/// Removes the venue and every show booked there.
pub async fn delete_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteView>, ApiError> {
    if !params.confirm {
        return Err(ApiError::BadRequest(format!(
            "Deleting venue {} requires confirm=true",
            id
        )));
    }

    let action = format!("Venue {} could not be deleted", id);
    let summary = state
        .catalog
        .delete_venue(id)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::delete_view(&summary, "/venues")))
}

/// Any method on /delete_venues/:id
pub async fn legacy_delete_venue(Path(id): Path<String>) -> ApiError {
    info!("Refused legacy delete request for venue {}", id);
    ApiError::MethodNotAllowed(format!("Use DELETE /venues/{}?confirm=true", id))
}

