pub mod index;

pub use index::{send_daily_check_in, CheckInOutcome, DailyCheckInError};
