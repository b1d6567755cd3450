//! Artist endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use fyyur_common::catalog::SearchKind;
use fyyur_common::forms::{ArtistForm, SearchForm};

use super::error::ApiError;
use super::extract::{FormOrJson, IdPath};
use super::venues::DeleteParams;
use crate::views::{self, ArtistDetailView, ArtistListView, ArtistView, DeleteView, FormView, SearchView};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> Result<Json<ArtistListView>, ApiError> {
    let artists = state.catalog.list_artists().await.map_err(ApiError::from_read)?;
    Ok(Json(ArtistListView {
        artists: artists.iter().map(views::artist_view).collect(),
    }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<SearchForm>,
) -> Result<Json<SearchView>, ApiError> {
    let results = state
        .catalog
        .search(SearchKind::Artist, &form.search_term)
        .await
        .map_err(ApiError::from_read)?;

    Ok(Json(SearchView {
        search_term: form.search_term,
        results,
    }))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ArtistDetailView>, ApiError> {
    let detail = state.catalog.artist_detail(id).await.map_err(ApiError::from_read)?;
    Ok(Json(views::artist_detail_view(&detail)))
}

pub async fn create_artist_form() -> Json<FormView<ArtistForm, ArtistView>> {
    Json(FormView {
        form: views::blank_artist_form(),
        record: None,
    })
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<ArtistForm>,
) -> Result<(StatusCode, Json<ArtistView>), ApiError> {
    let action = format!("Artist {} could not be listed", form.name.as_deref().unwrap_or_default());
    let artist = state
        .catalog
        .create_artist(form)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok((StatusCode::CREATED, Json(views::artist_view(&artist))))
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<FormView<ArtistForm, ArtistView>>, ApiError> {
    let artist = state.catalog.artist(id).await.map_err(ApiError::from_read)?;
    Ok(Json(FormView {
        form: views::artist_form(&artist),
        record: Some(views::artist_view(&artist)),
    }))
}

pub async fn edit_artist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    FormOrJson(form): FormOrJson<ArtistForm>,
) -> Result<Json<ArtistView>, ApiError> {
    let action = format!("Artist {} could not be updated", id);
    let artist = state
        .catalog
        .update_artist(id, form)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::artist_view(&artist)))
}

/// DELETE /artists/:id?confirm=true
///
/// Shows the artist was booked for go with it.
pub async fn delete_artist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteView>, ApiError> {
    if !params.confirm {
        return Err(ApiError::BadRequest(format!(
            "Deleting artist {} requires confirm=true",
            id
        )));
    }

    let action = format!("Artist {} could not be deleted", id);
    let summary = state
        .catalog
        .delete_artist(id)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::delete_view(&summary, "/artists")))
}
