use std::sync::Arc;

use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    repository::MovieRepository,
};

/// Validation and orchestration for movie CRUD over a [`MovieRepository`].
#[derive(Clone)]
pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(repo: Arc<dyn MovieRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, movie: Option<Movie>) -> AppResult<Movie> {
        let mut movie = movie.ok_or_else(|| AppError::invalid("Movie cannot be null"))?;
        validate_new(&movie)?;

        // Ids are assigned by the store.
        movie.id = None;
        self.repo.save(movie).await
    }

    pub async fn read(&self, id: i64) -> AppResult<Movie> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(id))
    }

    /// Overwrites name, director and actors of the stored movie with those of
    /// `update`. Fields absent from `update` are cleared, and any id it
    /// carries is ignored.
    pub async fn update(&self, id: i64, update: Option<Movie>) -> AppResult<()> {
        let update = update.ok_or_else(|| AppError::invalid("Movie and ID cannot be null"))?;

        if !self.repo.exists_by_id(id).await? {
            debug!(id, "update of missing movie");
            return Err(AppError::NotFound(id));
        }

        // The row can vanish between the existence check and this load.
        let mut movie = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(id))?;
        movie.name = update.name;
        movie.director = update.director;
        movie.actors = update.actors;

        self.repo.save(movie).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            debug!(id, "delete of missing movie");
            return Err(AppError::NotFound(id));
        }
        self.repo.delete_by_id(id).await
    }
}

fn validate_new(movie: &Movie) -> AppResult<()> {
    if is_blank(movie.name.as_deref()) {
        return Err(AppError::invalid("Movie name cannot be empty"));
    }
    if is_blank(movie.director.as_deref()) {
        return Err(AppError::invalid("Movie director cannot be empty"));
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
