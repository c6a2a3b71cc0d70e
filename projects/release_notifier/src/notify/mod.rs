pub mod delivery;
pub mod templates;

pub use delivery::{
    announce_milestone, announce_playlist_added, announce_release, reply, send_owner_text,
    Channel, DeliveryReport,
};
pub use templates::Announcement;
