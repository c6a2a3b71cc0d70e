pub mod index;

pub use index::{check_playlist_milestones, MilestoneReport, PlaylistMilestonesError};
