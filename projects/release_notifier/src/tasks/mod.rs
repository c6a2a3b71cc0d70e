pub mod daily_checkin;
pub mod manual_commands;
pub mod playlist_milestones;
pub mod release_check;

use clap::ValueEnum;

/// Runnable units, listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Task {
    /// Handle `/release` and `/playlist` chat commands
    Commands,
    /// Announce the artist's newest release
    Release,
    /// Announce playlist follower milestones
    Playlists,
    /// Send the daily Telegram message
    Checkin,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Commands, Task::Release, Task::Playlists, Task::Checkin];

    /// Execution order, duplicates removed; empty means everything.
    pub fn plan(requested: &[Task]) -> Vec<Task> {
        if requested.is_empty() {
            return Task::ALL.to_vec();
        }
        let mut plan = requested.to_vec();
        plan.sort_unstable();
        plan.dedup();
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_runs_everything_in_order() {
        assert_eq!(Task::plan(&[]), Task::ALL.to_vec());
    }

    #[test]
    fn request_is_ordered_and_deduplicated() {
        assert_eq!(
            Task::plan(&[Task::Checkin, Task::Release, Task::Checkin]),
            vec![Task::Release, Task::Checkin]
        );
    }
}
