use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{movie, movie_actor};

/// A movie as seen by callers: the wire shape and the service's working type.
///
/// `name` and `director` are optional so that absent fields survive
/// deserialization and reach validation instead of failing in the decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actors: Vec<String>,
}

impl Movie {
    pub fn new(
        name: impl Into<String>,
        director: impl Into<String>,
        actors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            director: Some(director.into()),
            actors: actors.into_iter().map(Into::into).collect(),
        }
    }

    /// Assembles a movie from its row and actor rows, which must already be
    /// ordered by position.
    pub fn from_rows(row: movie::Model, actors: Vec<movie_actor::Model>) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            director: row.director,
            actors: actors.into_iter().map(|a| a.name).collect(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let movie: Movie = serde_json::from_value(json!({ "name": "Don" })).unwrap();
        assert_eq!(movie.id, None);
        assert_eq!(movie.name.as_deref(), Some("Don"));
        assert_eq!(movie.director, None);
        assert!(movie.actors.is_empty());
    }

    #[test]
    fn null_actors_become_empty_list() {
        let movie: Movie =
            serde_json::from_value(json!({ "name": "Don", "actors": null })).unwrap();
        assert!(movie.actors.is_empty());
    }

    #[test]
    fn serializes_every_field() {
        let mut movie = Movie::new("Don", "Farhan Akhtar", ["Shah Rukh Khan", "Shah Rukh Khan"]);
        movie.id = Some(7);

        assert_eq!(
            serde_json::to_value(&movie).unwrap(),
            json!({
                "id": 7,
                "name": "Don",
                "director": "Farhan Akhtar",
                "actors": ["Shah Rukh Khan", "Shah Rukh Khan"],
            })
        );
    }

    #[test]
    fn unsaved_movie_serializes_null_id() {
        let value = serde_json::to_value(Movie::new("Don", "Farhan Akhtar", [] as [&str; 0]))
            .unwrap();
        assert!(value["id"].is_null());
        assert_eq!(value["actors"], json!([]));
    }

    #[test]
    fn from_rows_keeps_actor_order() {
        let row = movie::Model { id: 3, name: Some("Don".into()), director: None };
        let actors = vec![
            movie_actor::Model { movie_id: 3, position: 0, name: "Lara Dutta".into() },
            movie_actor::Model { movie_id: 3, position: 1, name: "Om Puri".into() },
        ];

        let movie = Movie::from_rows(row, actors);
        assert_eq!(movie.id, Some(3));
        assert_eq!(movie.actors, vec!["Lara Dutta", "Om Puri"]);
    }
}
