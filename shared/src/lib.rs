#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod coordinator;
pub mod favourite;
pub mod list_model;
pub mod model;
pub mod remote;
pub mod status;
pub mod store;

use std::time::Duration;

pub use config::{ConfigError, CoordinatorConfig};
pub use coordinator::{DataOrigin, FetchCoordinator, FetchOutcome};
pub use favourite::FavouriteToggler;
pub use list_model::MovieListModel;
pub use model::{Movie, MovieId, RawMovie, RawMovieList, StoredMovie};
pub use remote::{RemoteError, RemoteSource};
pub use status::{status_channel, FailureReason, StatusEvent, StatusReceiver, StatusSender};
pub use store::{LocalStore, MemoryStore, StoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use store::SqliteStore;

pub const CACHE_READ_TIMEOUT: Duration = Duration::from_millis(3000);
pub const REMOTE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
