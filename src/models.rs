use serde::Deserialize;

/// Normalized metadata returned by the lookup provider, everything a movie
/// record needs except its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieLookup {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genre: String,
    pub poster: String,
}

/// A fully populated movie ready to be persisted.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genre: String,
    pub poster: String,
    pub user_id: i32,
}

impl NewMovie {
    pub fn from_lookup(found: MovieLookup, user_id: i32) -> Self {
        Self {
            title: found.title,
            year: found.year,
            director: found.director,
            genre: found.genre,
            poster: found.poster,
            user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMovieForm {
    pub title: String,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieForm {
    pub title: String,
}
