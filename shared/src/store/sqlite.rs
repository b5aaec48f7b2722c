use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, ErrorCode};
use tracing::{debug, instrument};

use super::{LocalStore, StoreError};
use crate::model::StoredMovie;

const CURRENT_SCHEMA_VERSION: u32 = 1;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        overview TEXT NOT NULL DEFAULT '',
        poster_path TEXT,
        release_date TEXT,
        vote_average REAL NOT NULL DEFAULT 0,
        is_favourite INTEGER NOT NULL DEFAULT 0,
        inserted_seq INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_movies_seq ON movies(inserted_seq);
"#;

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// SQLite-backed movie cache.
///
/// `rusqlite::Connection` is blocking, so every call runs on the blocking
/// pool and the connection mutex is only taken inside that closure.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        let found: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if found > CURRENT_SCHEMA_VERSION {
            return Err(StoreError::FutureSchema {
                found,
                max: CURRENT_SCHEMA_VERSION,
            });
        }

        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
        debug!(from = found, to = CURRENT_SCHEMA_VERSION, "movie store schema ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::LockFailed)?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Storage(format!("blocking task failed: {e}")))?
    }
}

fn read_all(conn: &mut Connection) -> Result<Vec<StoredMovie>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, overview, poster_path, release_date, vote_average, is_favourite
         FROM movies ORDER BY inserted_seq ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(StoredMovie {
            id: row.get(0)?,
            title: row.get(1)?,
            overview: row.get(2)?,
            poster_path: row.get(3)?,
            release_date: row.get(4)?,
            vote_average: row.get(5)?,
            is_favourite: row.get(6)?,
        })
    })?;

    let movies = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(movies)
}

fn insert_row(conn: &mut Connection, movie: &StoredMovie) -> Result<(), StoreError> {
    let tx = conn.transaction()?;

    let next_seq: i64 = tx
        .query_row("SELECT MAX(inserted_seq) FROM movies", [], |row| {
            row.get::<_, Option<i64>>(0)
        })?
        .map_or(0, |seq| seq + 1);

    let inserted = tx.execute(
        "INSERT INTO movies (id, title, overview, poster_path, release_date, vote_average, is_favourite, inserted_seq)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            movie.id,
            movie.title,
            movie.overview,
            movie.poster_path,
            movie.release_date,
            movie.vote_average,
            movie.is_favourite,
            next_seq,
        ],
    );

    match inserted {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            return Err(StoreError::Duplicate(movie.id));
        }
        Err(e) => return Err(e.into()),
    }

    tx.commit()?;
    Ok(())
}

#[async_trait::async_trait]
impl LocalStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<StoredMovie>, StoreError> {
        self.with_conn(read_all).await
    }

    #[instrument(skip(self, movie), fields(movie_id = movie.id))]
    async fn insert(&self, movie: StoredMovie) -> Result<(), StoreError> {
        self.with_conn(move |conn| insert_row(conn, &movie)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Movie, MovieId};
    use tempfile::tempdir;

    fn sample(id: u64, title: &str) -> StoredMovie {
        let mut movie = Movie::new(id, title);
        movie.poster_path = Some(format!("/{id}.jpg"));
        movie.vote_average = 7.5;
        StoredMovie::from(&movie)
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_read_back() {
        let store = SqliteStore::open_in_memory().unwrap();
        let row = sample(550, "Fight Club");

        store.insert(row.clone()).await.unwrap();

        let rows = store.get_all().await.unwrap();
        assert_eq!(rows, vec![row]);
        assert_eq!(Movie::from(rows[0].clone()).id, MovieId(550));
    }

    #[tokio::test]
    async fn duplicate_primary_key_is_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(sample(1, "first")).await.unwrap();

        let result = store.insert(sample(1, "again")).await;

        assert!(matches!(result, Err(StoreError::Duplicate(1))));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn preserves_insertion_order_not_id_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for id in [30, 10, 20] {
            store.insert(sample(id, "m")).await.unwrap();
        }

        let ids: Vec<_> = store.get_all().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn favourite_flag_survives() {
        let store = SqliteStore::open_in_memory().unwrap();
        let fav = StoredMovie::from(&Movie::new(9, "Heat").with_favourite(true));

        store.insert(fav).await.unwrap();

        assert!(store.get_all().await.unwrap()[0].is_favourite);
    }

    #[tokio::test]
    async fn file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(sample(1, "persisted")).await.unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        let rows = reopened.get_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "persisted");
    }

    #[test]
    fn future_schema_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
                .unwrap();
        }

        let result = SqliteStore::open(&path);

        assert!(matches!(result, Err(StoreError::FutureSchema { .. })));
    }
}
