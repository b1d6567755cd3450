//! fyyur-web library - venue and artist booking service
//!
//! Router and shared state; handlers live in [`api`], response shapes in
//! [`views`].

use axum::Router;
use fyyur_common::Catalog;
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            catalog: Catalog::new(db),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use api::{artists, shows, venues};
    use axum::routing::{any, delete, get, post};

    let venue_routes = Router::new()
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue),
        )
        .route(
            "/venues/:id",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue_form).post(venues::edit_venue),
        )
        .route("/delete_venues/:id", any(venues::legacy_delete_venue));

    let artist_routes = Router::new()
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist),
        )
        .route(
            "/artists/:id",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist_form).post(artists::edit_artist),
        );

    let show_routes = Router::new()
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show),
        )
        .route("/shows/:id", delete(shows::delete_show))
        .route(
            "/shows/:id/edit",
            get(shows::edit_show_form).post(shows::edit_show),
        );

    let router = Router::new()
        .route("/", get(api::serve_index))
        .merge(api::health_routes())
        .merge(venue_routes)
        .merge(artist_routes)
        .merge(show_routes)
        .fallback(api::error::not_found)
        .with_state(state);

    with_service_layers(router)
}

/// Panic recovery, request tracing and CORS around every route
fn with_service_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(api::error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::util::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler failure")
    }

    #[tokio::test]
    async fn test_panicking_handler_answers_json_500() {
        let app = with_service_layers(Router::new().route("/explode", get(explode)));

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 500);
        assert!(!body["error"].as_str().unwrap().contains("handler failure"));
    }
}
