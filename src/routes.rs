use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
};
use serde::Deserialize;

use crate::{
    AppState, auth,
    error::AppResult,
    extract::{AppJson, AppQuery},
    filter::FilmFilter,
    models::{Film, FilmPatch, Genre, SearchResponse},
    normalize,
};

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/films", get(list_films).post(create_film))
        .route("/films/filter", get(filter_films))
        .route("/films/{id}", get(get_film).put(update_film).delete(delete_film))
        .route("/homepage_images", get(homepage_images))
        .route("/search", get(search))
        .route("/search/{imdb_id}", get(search_by_id))
        .route("/genres", get(genres))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new().nest("/api", api).with_state(state)
}

async fn list_films(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.films.all_films().await?))
}

async fn create_film(
    State(state): State<Arc<AppState>>,
    AppJson(patch): AppJson<FilmPatch>,
) -> AppResult<(StatusCode, Json<Film>)> {
    let film = state.films.add_film(patch).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.film_by_id(&id).await?))
}

async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<FilmPatch>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.update_film(&id, patch).await?))
}

async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.films.delete_film(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn filter_films(
    State(state): State<Arc<AppState>>,
    AppQuery(filter): AppQuery<FilmFilter>,
) -> AppResult<Json<Vec<Film>>> {
    let today: jiff::civil::Date = jiff::Zoned::now().into();
    Ok(Json(state.films.films_by_filter(&filter, today.year()).await?))
}

async fn homepage_images(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let today: jiff::civil::Date = jiff::Zoned::now().into();
    Ok(Json(state.films.homepage_images(today).await?))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    title: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    AppQuery(q): AppQuery<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    Ok(Json(state.omdb.search_by_title(q.title.trim()).await?))
}

/// OMDb details for one movie, normalized into a film payload but not stored.
async fn search_by_id(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> AppResult<Json<FilmPatch>> {
    let record = state.omdb.fetch_by_id(&imdb_id).await?;
    Ok(Json(normalize::normalize(&record)?))
}

async fn genres() -> Json<Vec<&'static str>> {
    Json(Genre::ALL.iter().map(|g| g.as_str()).collect())
}
