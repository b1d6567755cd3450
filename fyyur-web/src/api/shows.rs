//! Show endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use fyyur_common::forms::ShowForm;

use super::error::ApiError;
use super::extract::{FormOrJson, IdPath};
use super::venues::DeleteParams;
use crate::views::{self, DeleteView, FormView, ShowListView, ShowRecordView};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<ShowListView>, ApiError> {
    let shows = state.catalog.list_shows().await.map_err(ApiError::from_read)?;
    Ok(Json(ShowListView {
        shows: shows.iter().map(views::show_view).collect(),
    }))
}

/// GET /shows/create
///
/// The start time defaults to the current time.
pub async fn create_show_form() -> Json<FormView<ShowForm, ShowRecordView>> {
    Json(FormView {
        form: views::blank_show_form(&Utc::now()),
        record: None,
    })
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<ShowForm>,
) -> Result<(StatusCode, Json<ShowRecordView>), ApiError> {
    let show = state
        .catalog
        .create_show(form)
        .await
        .map_err(|e| ApiError::from_mutation(e, "Show could not be listed"))?;

    Ok((StatusCode::CREATED, Json(views::show_record_view(&show))))
}

/// GET /shows/:id/edit
pub async fn edit_show_form(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<FormView<ShowForm, ShowRecordView>>, ApiError> {
    let show = state.catalog.show(id).await.map_err(ApiError::from_read)?;
    Ok(Json(FormView {
        form: views::show_form(&show),
        record: Some(views::show_record_view(&show)),
    }))
}

/// POST /shows/:id/edit
///
/// Moves a show or rebooks it; the venue and artist must still exist.
pub async fn edit_show(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    FormOrJson(form): FormOrJson<ShowForm>,
) -> Result<Json<ShowRecordView>, ApiError> {
    let action = format!("Show {} could not be updated", id);
    let show = state
        .catalog
        .update_show(id, form)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::show_record_view(&show)))
}

/// DELETE /shows/:id?confirm=true
pub async fn delete_show(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteView>, ApiError> {
    if !params.confirm {
        return Err(ApiError::BadRequest(format!(
            "Deleting show {} requires confirm=true",
            id
        )));
    }

    let action = format!("Show {} could not be deleted", id);
    let summary = state
        .catalog
        .delete_show(id)
        .await
        .map_err(|e| ApiError::from_mutation(e, &action))?;

    Ok(Json(views::delete_view(&summary, "/shows")))
}
