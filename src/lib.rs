pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::service::MovieService;

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieService,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/movies", post(routes::create_movie))
        .route(
            "/api/movies/{id}",
            get(routes::get_movie).put(routes::update_movie).delete(routes::delete_movie),
        )
        .with_state(Arc::new(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
