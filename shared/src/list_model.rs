use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::{ConfigError, CoordinatorConfig};
use crate::coordinator::{FetchCoordinator, FetchOutcome};
use crate::favourite::FavouriteToggler;
use crate::model::Movie;
use crate::remote::RemoteSource;
use crate::status::{status_channel, StatusReceiver};
use crate::store::LocalStore;

/// Entry point for the shell: one coordinator and one toggler reporting into
/// a single status stream. Dependencies are passed in, never looked up.
pub struct MovieListModel<R: RemoteSource, S: LocalStore> {
    coordinator: Arc<FetchCoordinator<R, S>>,
    favourites: FavouriteToggler<S>,
}

impl<R, S> MovieListModel<R, S>
where
    R: RemoteSource + 'static,
    S: LocalStore + 'static,
{
    pub fn new(
        remote: Arc<R>,
        store: Arc<S>,
        config: CoordinatorConfig,
    ) -> Result<(Self, StatusReceiver), ConfigError> {
        config.validate()?;

        let (events, receiver) = status_channel();
        let coordinator = Arc::new(FetchCoordinator::new(
            remote,
            Arc::clone(&store),
            config,
            events.clone(),
        ));
        let favourites = FavouriteToggler::new(store, events);

        Ok((
            Self {
                coordinator,
                favourites,
            },
            receiver,
        ))
    }

    pub async fn fetch_popular(&self) -> FetchOutcome {
        self.coordinator.fetch().await
    }

    pub fn launch_fetch(&self) -> JoinHandle<FetchOutcome> {
        self.coordinator.launch()
    }

    pub async fn change_favourite_state(&self, movie: &Movie, is_favourite: bool) {
        self.favourites.set_favourite(movie, is_favourite).await;
    }
}
