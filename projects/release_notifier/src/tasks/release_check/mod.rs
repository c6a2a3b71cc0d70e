pub mod index;

pub use index::{check_for_new_release, ReleaseCheckError, ReleaseOutcome};
