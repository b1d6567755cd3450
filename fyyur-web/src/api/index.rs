//! Home document

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub links: Vec<IndexLink>,
}

#[derive(Debug, Serialize)]
pub struct IndexLink {
    pub rel: &'static str,
    pub method: &'static str,
    pub href: &'static str,
}

const LINKS: &[(&str, &str, &str)] = &[
    ("venues", "GET", "/venues"),
    ("search-venues", "POST", "/venues/search"),
    ("new-venue", "GET", "/venues/create"),
    ("artists", "GET", "/artists"),
    ("search-artists", "POST", "/artists/search"),
    ("new-artist", "GET", "/artists/create"),
    ("shows", "GET", "/shows"),
    ("new-show", "GET", "/shows/create"),
    ("health", "GET", "/health"),
];

/// GET /
pub async fn serve_index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "fyyur",
        version: env!("CARGO_PKG_VERSION"),
        links: LINKS
            .iter()
            .map(|&(rel, method, href)| IndexLink { rel, method, href })
            .collect(),
    })
}
