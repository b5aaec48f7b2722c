use serde::{Deserialize, Serialize};
use std::fmt;

use crate::remote::RemoteError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub u64);

impl MovieId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie as the presentation layer sees it.
///
/// Values are immutable; use [`Movie::with_favourite`] to get a copy with a
/// different flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub is_favourite: bool,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            vote_average: 0.0,
            is_favourite: false,
        }
    }

    #[must_use]
    pub fn with_favourite(&self, is_favourite: bool) -> Self {
        Self {
            is_favourite,
            ..self.clone()
        }
    }
}

/// Persisted row shape. Only store adapters construct these directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredMovie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub is_favourite: bool,
}

impl From<&Movie> for StoredMovie {
    #[allow(clippy::cast_possible_wrap)]
    fn from(movie: &Movie) -> Self {
        Self {
            // SQLite integers are signed; the bit pattern survives the cast both ways.
            id: movie.id.0 as i64,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: f64::from(movie.vote_average),
            is_favourite: movie.is_favourite,
        }
    }
}

impl From<StoredMovie> for Movie {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(row: StoredMovie) -> Self {
        Self {
            id: MovieId(row.id as u64),
            title: row.title,
            overview: row.overview,
            poster_path: row.poster_path,
            release_date: row.release_date,
            vote_average: row.vote_average as f32,
            is_favourite: row.is_favourite,
        }
    }
}

/// One entry of the popular-movies page returned by the movie API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Self {
            id: MovieId(raw.id),
            title: raw.title,
            overview: raw.overview,
            poster_path: raw.poster_path,
            // The API sends "" for unknown dates.
            release_date: raw.release_date.filter(|d| !d.is_empty()),
            vote_average: raw.vote_average,
            is_favourite: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMovieList {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<RawMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl RawMovieList {
    pub fn from_json(body: &str) -> Result<Self, RemoteError> {
        serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    pub fn into_movies(self) -> Vec<Movie> {
        self.results.into_iter().map(Movie::from).collect()
    }
}
