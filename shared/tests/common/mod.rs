#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use movies_shared::{
    LocalStore, Movie, RawMovie, RemoteError, RemoteSource, StatusEvent, StatusReceiver,
    StoreError, StoredMovie,
};
use tokio::sync::mpsc;

pub fn raw(id: u64) -> RawMovie {
    RawMovie {
        id,
        title: format!("Movie {id}"),
        overview: format!("Overview {id}"),
        poster_path: Some(format!("/{id}.jpg")),
        release_date: Some("2024-01-01".into()),
        vote_average: 6.5,
    }
}

pub fn stored(id: u64) -> StoredMovie {
    StoredMovie::from(&Movie::from(raw(id)))
}

pub struct ScriptedRemote {
    result: Result<Vec<RawMovie>, RemoteError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedRemote {
    pub fn returning(ids: &[u64]) -> Self {
        Self {
            result: Ok(ids.iter().copied().map(raw).collect()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: RemoteError) -> Self {
        Self {
            result: Err(error),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RemoteSource for ScriptedRemote {
    async fn fetch_list(&self) -> Result<Vec<RawMovie>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Store double: serves fixed rows, optionally slowly, and reports every
/// insert attempt on a channel.
pub struct RecordingStore {
    rows: Vec<StoredMovie>,
    read_delay: Option<Duration>,
    fail_inserts: bool,
    inserted: mpsc::UnboundedSender<i64>,
}

impl RecordingStore {
    pub fn new(rows: Vec<StoredMovie>) -> (Self, mpsc::UnboundedReceiver<i64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                rows,
                read_delay: None,
                fail_inserts: false,
                inserted: tx,
            },
            rx,
        )
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }
}

#[async_trait::async_trait]
impl LocalStore for RecordingStore {
    async fn get_all(&self) -> Result<Vec<StoredMovie>, StoreError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.rows.clone())
    }

    async fn insert(&self, movie: StoredMovie) -> Result<(), StoreError> {
        let _ = self.inserted.send(movie.id);
        if self.fail_inserts {
            return Err(StoreError::Storage("injected failure".into()));
        }
        Ok(())
    }
}

pub fn drain(rx: &mut StatusReceiver) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
