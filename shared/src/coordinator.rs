use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn, Instrument};
use uuid::Uuid;

use crate::config::CoordinatorConfig;
use crate::model::{Movie, StoredMovie};
use crate::remote::{RemoteError, RemoteSource};
use crate::status::{FailureReason, LoadingGuard, StatusEvent, StatusSender};
use crate::store::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Remote,
}

/// Summary of one `fetch()`. The status events carry the actual data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { origin: DataOrigin, count: usize },
    Empty,
    Failed(FailureReason),
}

pub struct FetchCoordinator<R: RemoteSource, S: LocalStore> {
    remote: Arc<R>,
    store: Arc<S>,
    config: CoordinatorConfig,
    events: StatusSender,
}

impl<R, S> FetchCoordinator<R, S>
where
    R: RemoteSource + 'static,
    S: LocalStore + 'static,
{
    pub fn new(
        remote: Arc<R>,
        store: Arc<S>,
        config: CoordinatorConfig,
        events: StatusSender,
    ) -> Self {
        Self {
            remote,
            store,
            config,
            events,
        }
    }

    /// Cache first, remote second. `LoadingChanged(false)` is emitted on every
    /// exit, including when this future is dropped mid-flight.
    #[instrument(skip(self), fields(fetch_id = %Uuid::new_v4()))]
    pub async fn fetch(&self) -> FetchOutcome {
        let _loading = LoadingGuard::start(&self.events);

        if let Some(cached) = self.read_cache().await {
            let count = cached.len();
            info!(count, "serving movies from local store");
            self.events.emit(StatusEvent::Loaded(cached));
            return FetchOutcome::Loaded {
                origin: DataOrigin::Cache,
                count,
            };
        }

        let movies = match self.fetch_remote().await {
            Ok(movies) => movies,
            Err(e) => {
                let reason = e.failure_reason();
                warn!(error = %e, code = reason.code(), "remote fetch failed");
                self.events.emit(StatusEvent::Failed(reason));
                return FetchOutcome::Failed(reason);
            }
        };

        let count = movies.len();
        info!(count, "fetched movies from remote");

        if movies.is_empty() && self.config.report_empty {
            self.events.emit(StatusEvent::Empty);
            return FetchOutcome::Empty;
        }

        self.events.emit(StatusEvent::Loaded(movies.clone()));
        self.persist_in_background(movies);

        FetchOutcome::Loaded {
            origin: DataOrigin::Remote,
            count,
        }
    }

    /// Runs `fetch()` as its own task. Aborting the handle cancels the cache
    /// read and remote call but not persistence tasks already spawned.
    pub fn launch(self: &Arc<Self>) -> JoinHandle<FetchOutcome> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.fetch().await })
    }

    /// `None` means "go to the remote": deadline elapsed, store error or no rows.
    async fn read_cache(&self) -> Option<Vec<Movie>> {
        match timeout(self.config.cache_read_timeout, self.store.get_all()).await {
            Ok(Ok(rows)) if !rows.is_empty() => Some(rows.into_iter().map(Movie::from).collect()),
            Ok(Ok(_)) => {
                debug!("local store empty");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "local store read failed");
                None
            }
            Err(_) => {
                warn!(deadline = ?self.config.cache_read_timeout, "local store read timed out");
                None
            }
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<Movie>, RemoteError> {
        let raw = timeout(self.config.remote_timeout, self.remote.fetch_list())
            .await
            .map_err(|_| RemoteError::Timeout)??;
        Ok(raw.into_iter().map(Movie::from).collect())
    }

    fn persist_in_background(&self, movies: Vec<Movie>) {
        for movie in movies {
            let store = Arc::clone(&self.store);
            let span = tracing::debug_span!("persist_movie", movie_id = %movie.id);
            tokio::spawn(
                async move {
                    if let Err(e) = store.insert(StoredMovie::from(&movie)).await {
                        warn!(error = %e, "background persist failed");
                    }
                }
                .instrument(span),
            );
        }
    }
}
