//! Visibility prediction bot.
//!
//! Users upload a CSV of weather observations; the bot replies with the
//! predicted meteorological visibility range for each row.

pub mod commands;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod formatter;
pub mod intake;
pub mod messages;
pub mod poller;
pub mod transport;

pub use dispatch::{Bot, Outcome};
pub use error::HandleError;
pub use event::{ChatId, Command, FileRef, InboundEvent};
pub use transport::{TelegramTransport, Transport};
