use chrono::NaiveDate;
use interfaces_telegram_bot::BotApiError;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::context::AppContext;
use crate::notify::send_owner_text;
use crate::state::SeenState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// No Telegram chat or no DAILY_MESSAGE.
    Disabled,
    AlreadySentToday,
    Sent,
}

#[derive(Debug, Error)]
pub enum DailyCheckInError {
    #[error("SendMessage: {source}")]
    SendMessage {
        #[from]
        source: BotApiError,
    },
}

/// Posts the daily message once per calendar day (`today` is UTC).
#[instrument(skip_all, fields(%today))]
pub async fn send_daily_check_in(
    ctx: &AppContext,
    state: &mut SeenState,
    today: NaiveDate,
) -> Result<CheckInOutcome, DailyCheckInError> {
    let (Some(_), Some(text)) = (&ctx.config.telegram, ctx.config.daily_message.as_deref()) else {
        debug!("Daily check-in disabled");
        return Ok(CheckInOutcome::Disabled);
    };

    if state.telegram.last_check_in == Some(today) {
        debug!("Daily check-in already sent");
        return Ok(CheckInOutcome::AlreadySentToday);
    }

    send_owner_text(ctx, text).await?;
    state.telegram.last_check_in = Some(today);
    info!("Daily check-in sent");
    Ok(CheckInOutcome::Sent)
}
