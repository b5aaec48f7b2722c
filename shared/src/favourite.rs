use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::model::{Movie, StoredMovie};
use crate::status::{StatusEvent, StatusSender};
use crate::store::LocalStore;

pub struct FavouriteToggler<S: LocalStore> {
    store: Arc<S>,
    events: StatusSender,
}

impl<S: LocalStore> FavouriteToggler<S> {
    pub fn new(store: Arc<S>, events: StatusSender) -> Self {
        Self { store, events }
    }

    /// Only the "mark as favourite" direction is handled; `want == false` is
    /// a no-op and emits nothing.
    #[instrument(skip(self, movie), fields(movie_id = %movie.id))]
    pub async fn set_favourite(&self, movie: &Movie, want: bool) {
        if !want {
            debug!("unfavourite requested, nothing to do");
            return;
        }

        let favourite = movie.with_favourite(true);
        match self.store.insert(StoredMovie::from(&favourite)).await {
            Ok(()) => {
                info!("movie marked as favourite");
                self.events.emit(StatusEvent::ItemAdded(favourite));
            }
            Err(e) => {
                // Duplicate keys and every other store failure look the same upstream.
                warn!(error = %e, "favourite insert rejected");
                self.events.emit(StatusEvent::DuplicateFavourite);
            }
        }
    }
}
