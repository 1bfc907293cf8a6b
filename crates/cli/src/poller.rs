//! Long-polling loop: fetch updates, turn them into events, hand them to the bot.

use std::thread;
use std::time::Duration;

use visibot_telegram::TelegramError;

use crate::dispatch::Bot;
use crate::error::HandleError;
use crate::event::InboundEvent;
use crate::transport::TelegramTransport;

/// Pause after a failed getUpdates before polling again.
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(3);

pub struct Poller {
    transport: TelegramTransport,
    bot: Bot,
    username: Option<String>,
    timeout_secs: u64,
    offset: Option<i64>,
}

impl Poller {
    pub fn new(transport: TelegramTransport, bot: Bot, username: Option<String>, timeout_secs: u64) -> Self {
        Self { transport, bot, username, timeout_secs, offset: None }
    }

    /// Next update id the poller will ask for.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetch one batch of updates and handle each. Returns how many arrived.
    ///
    /// Every update is acknowledged (offset advanced) whether or not its
    /// handler succeeded; failed interactions are logged, never redelivered.
    pub fn poll_once(&mut self) -> Result<usize, TelegramError> {
        let updates = self.transport.client().get_updates(self.offset, self.timeout_secs)?;

        for update in &updates {
            self.offset = Some(update.update_id + 1);

            let Some(message) = &update.message else {
                continue;
            };
            let Some(event) = InboundEvent::from_message(message, self.username.as_deref()) else {
                log::debug!("chat {}: message {} ignored", message.chat.id, message.message_id);
                continue;
            };

            let chat = event.chat();
            match self.bot.handle(event, &self.transport) {
                Ok(outcome) => log::info!("chat {}: {:?}", chat, outcome),
                Err(e @ HandleError::Transport(_)) => log::warn!("chat {}: {}", chat, e),
                Err(e) => log::error!("chat {}: {}", chat, e),
            }
        }

        Ok(updates.len())
    }

    /// Poll until the token is rejected. Other polling errors are logged.
    pub fn run(&mut self) -> Result<(), TelegramError> {
        loop {
            match self.poll_once() {
                Ok(_) => {}
                Err(e @ TelegramError::Unauthorized(_)) => return Err(e),
                Err(e) => {
                    log::warn!("getUpdates failed: {}; polling again in {}s", e, POLL_ERROR_PAUSE.as_secs());
                    thread::sleep(POLL_ERROR_PAUSE);
                }
            }
        }
    }
}
