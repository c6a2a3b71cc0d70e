use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::notify::Channel;
use crate::release::Release;

/// Everything the notifier remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeenState {
    pub releases: ReleaseMarkers,
    pub playlists: BTreeMap<String, TrackedPlaylist>,
    pub telegram: TelegramCursor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMarker {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseMarkers {
    /// Latest auto-detected release.
    pub last_seen: Option<ReleaseMarker>,
    /// Ids of every release announced so far, detected or promoted.
    pub processed: Vec<String>,
    /// Release some channels already took while others refused it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingRelease>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRelease {
    pub id: String,
    pub delivered: Vec<Channel>,
}

impl ReleaseMarkers {
    /// Name matches count so that plain-text markers holding a name keep working.
    pub fn is_seen(&self, release: &Release) -> bool {
        let matches_marker = self
            .last_seen
            .as_ref()
            .is_some_and(|marker| marker.id == release.id || marker.name == release.name);

        matches_marker || self.was_processed(&release.id)
    }

    pub fn was_processed(&self, id: &str) -> bool {
        self.processed.iter().any(|seen| seen == id)
    }

    /// Channels that already announced `id` on an unfinished attempt.
    pub fn delivered_to(&self, id: &str) -> &[Channel] {
        match &self.pending {
            Some(pending) if pending.id == id => &pending.delivered,
            _ => &[],
        }
    }

    /// Remembers channels that took `id` so a retry only targets the rest.
    /// A partial delivery of a different release replaces the old entry.
    pub fn record_partial(&mut self, id: &str, delivered: &[Channel]) {
        match &mut self.pending {
            Some(pending) if pending.id == id => {
                for channel in delivered {
                    if !pending.delivered.contains(channel) {
                        pending.delivered.push(*channel);
                    }
                }
            }
            _ => {
                self.pending = Some(PendingRelease {
                    id: id.to_string(),
                    delivered: delivered.to_vec(),
                });
            }
        }
    }

    pub fn record_detected(&mut self, release: &Release) {
        self.last_seen = Some(ReleaseMarker {
            id: release.id.clone(),
            name: release.name.clone(),
        });
        self.remember(&release.id);
    }

    /// Leaves `last_seen` alone.
    pub fn record_promoted(&mut self, release: &Release) {
        self.remember(&release.id);
    }

    fn remember(&mut self, id: &str) {
        if !self.was_processed(id) {
            self.processed.push(id.to_string());
        }
        if self.pending.as_ref().is_some_and(|pending| pending.id == id) {
            self.pending = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedPlaylist {
    pub name: String,
    pub current_followers: u64,
    pub reached_milestones: Vec<u64>,
    pub added_notification_sent: bool,
}

impl TrackedPlaylist {
    pub fn new(name: impl Into<String>, followers: u64) -> Self {
        Self {
            name: name.into(),
            current_followers: followers,
            reached_milestones: Vec::new(),
            added_notification_sent: false,
        }
    }

    /// Milestones at or below `followers` that have not been announced yet, ascending.
    pub fn pending_milestones(&self, milestones: &[u64], followers: u64) -> Vec<u64> {
        let mut pending: Vec<u64> = milestones
            .iter()
            .copied()
            .filter(|milestone| *milestone <= followers)
            .filter(|milestone| !self.reached_milestones.contains(milestone))
            .collect();
        pending.sort_unstable();
        pending.dedup();
        pending
    }

    pub fn mark_reached(&mut self, milestone: u64) {
        if !self.reached_milestones.contains(&milestone) {
            self.reached_milestones.push(milestone);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramCursor {
    /// Next `getUpdates` offset; not a seen marker.
    pub update_offset: Option<i64>,
    pub last_check_in: Option<NaiveDate>,
}

impl TelegramCursor {
    pub fn advance_past(&mut self, update_id: i64) {
        let next = update_id + 1;
        match self.update_offset {
            Some(offset) if offset >= next => {}
            _ => self.update_offset = Some(next),
        }
    }
}
