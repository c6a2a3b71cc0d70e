pub mod models;
pub mod store;

pub use models::{
    PendingRelease, ReleaseMarker, ReleaseMarkers, SeenState, TelegramCursor, TrackedPlaylist,
};
pub use store::{SaveStateError, StateStore};
