use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::fixtures::MenuFixture;

#[derive(Debug, Deserialize)]
pub struct RecipesQuery {
    pub cuisine: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    pub theme: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "menu-backend-mock"
    }))
}

pub async fn get_recipes(
    Query(query): Query<RecipesQuery>,
    State(fixture): State<Arc<MenuFixture>>,
) -> Result<impl IntoResponse, StatusCode> {
    if fixture.is_unavailable(&query.cuisine) {
        tracing::info!(cuisine = %query.cuisine, "recipes unavailable");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(json!({ "menu": fixture.menu_for(&query.cuisine) })))
}

pub async fn get_playlist(
    Query(query): Query<PlaylistQuery>,
    State(fixture): State<Arc<MenuFixture>>,
) -> impl IntoResponse {
    // The real backend answers with the bare id string.
    Json(fixture.playlist_for(&query.theme))
}
