use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::Movie,
};

type MovieId = Result<Path<i64>, PathRejection>;
type MovieBody = Result<Json<Option<Movie>>, JsonRejection>;

pub async fn get_movie(State(state): State<Arc<AppState>>, id: MovieId) -> AppResult<Json<Movie>> {
    let id = movie_id(id)?;
    let movie = state.movies.read(id).await?;
    info!(id, "Returned movie");
    Ok(Json(movie))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: MovieBody,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let created = state.movies.create(movie_body(body)?).await?;
    info!(id = created.id, "Created movie");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    id: MovieId,
    body: MovieBody,
) -> AppResult<Json<Movie>> {
    let id = movie_id(id)?;
    state.movies.update(id, movie_body(body)?).await?;
    let updated = state.movies.read(id).await?;
    info!(id, "Updated movie");
    Ok(Json(updated))
}

pub async fn delete_movie(State(state): State<Arc<AppState>>, id: MovieId) -> AppResult<StatusCode> {
    let id = movie_id(id)?;
    state.movies.delete(id).await?;
    info!(id, "Deleted movie");
    Ok(StatusCode::NO_CONTENT)
}

fn movie_id(id: MovieId) -> AppResult<i64> {
    id.map(|Path(id)| id).map_err(|e| AppError::invalid(e.body_text()))
}

fn movie_body(body: MovieBody) -> AppResult<Option<Movie>> {
    body.map(|Json(movie)| movie).map_err(|e| AppError::invalid(e.body_text()))
}
