use std::sync::Arc;

use movies::{
    AppState, config::Config, db, repository::SeaOrmMovieRepository, service::MovieService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,movies=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let repo = SeaOrmMovieRepository::new(db);
    let state = AppState { movies: MovieService::new(Arc::new(repo)) };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, movies::app(state)).await?;

    Ok(())
}
