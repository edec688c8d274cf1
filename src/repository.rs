use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, Unchanged,
};

use crate::{
    entities::{movie, movie_actor},
    error::AppResult,
    models::Movie,
};

/// Keyed storage for movies.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Inserts when `movie.id` is `None` and returns the movie with its new
    /// id; otherwise overwrites the stored record carrying that id.
    async fn save(&self, movie: Movie) -> AppResult<Movie>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SeaOrmMovieRepository {
    db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let Some(row) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let actors = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.eq(id))
            .order_by_asc(movie_actor::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some(Movie::from_rows(row, actors)))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(movie::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn save(&self, movie: Movie) -> AppResult<Movie> {
        let txn = self.db.begin().await?;

        let model = movie::ActiveModel {
            id: movie.id.map_or(NotSet, Unchanged),
            name: Set(movie.name),
            director: Set(movie.director),
        };

        let row = match movie.id {
            None => model.insert(&txn).await?,
            Some(id) => {
                let row = model.update(&txn).await?;
                movie_actor::Entity::delete_many()
                    .filter(movie_actor::Column::MovieId.eq(id))
                    .exec(&txn)
                    .await?;
                row
            }
        };

        insert_actors(&txn, row.id, &movie.actors).await?;
        txn.commit().await?;

        tracing::debug!(id = row.id, actors = movie.actors.len(), "saved movie");
        Ok(Movie { id: Some(row.id), name: row.name, director: row.director, actors: movie.actors })
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let txn = self.db.begin().await?;

        movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        movie::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

async fn insert_actors<C: ConnectionTrait>(
    conn: &C,
    movie_id: i64,
    actors: &[String],
) -> Result<(), DbErr> {
    for (position, name) in actors.iter().enumerate() {
        let model = movie_actor::ActiveModel {
            movie_id: Set(movie_id),
            position: Set(position as i32),
            name: Set(name.clone()),
        };
        movie_actor::Entity::insert(model).exec_without_returning(conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::ConnectOptions;

    use super::*;
    use crate::{db, error::AppError};

    async fn repo() -> SeaOrmMovieRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        SeaOrmMovieRepository::new(db::connect_and_migrate(opts).await.unwrap())
    }

    fn don() -> Movie {
        Movie::new(
            "Don",
            "Farhan Akhtar",
            ["Shah Rukh Khan", "Priyanka Chopra", "Arjun Rampal", "Boman Irani", "Kareena Kapoor"],
        )
    }

    #[tokio::test]
    async fn save_assigns_fresh_ids() {
        let repo = repo().await;

        let first = repo.save(don()).await.unwrap();
        let second = repo.save(don()).await.unwrap();

        assert!(first.id.is_some());
        assert_ne!(first.id, second.id);
        assert_eq!(first.actors, don().actors);
    }

    #[tokio::test]
    async fn find_returns_actors_in_insertion_order() {
        let repo = repo().await;
        let saved = repo
            .save(Movie::new("Don", "Farhan Akhtar", ["Om Puri", "Arjun Rampal", "Om Puri"]))
            .await
            .unwrap();

        let found = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.actors, vec!["Om Puri", "Arjun Rampal", "Om Puri"]);
    }

    #[tokio::test]
    async fn save_with_id_replaces_record_wholesale() {
        let repo = repo().await;
        let saved = repo.save(don()).await.unwrap();
        let id = saved.id.unwrap();

        let replacement = Movie {
            id: Some(id),
            name: None,
            director: Some("Chandra Barot".into()),
            actors: vec!["Amitabh Bachchan".into()],
        };
        repo.save(replacement.clone()).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, replacement);
    }

    #[tokio::test]
    async fn save_with_unknown_id_fails() {
        let repo = repo().await;
        let mut ghost = don();
        ghost.id = Some(999);

        let err = repo.save(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(!repo.exists_by_id(999).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_movie_and_actors() {
        let repo = repo().await;
        let id = repo.save(don()).await.unwrap().id.unwrap();
        assert!(repo.exists_by_id(id).await.unwrap());

        repo.delete_by_id(id).await.unwrap();

        assert!(!repo.exists_by_id(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        let orphans = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.eq(id))
            .count(repo.db())
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
