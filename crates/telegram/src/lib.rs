//! Telegram Bot API client.
//!
//! This crate owns the wire contract with the Bot API: token check, long
//! polling, replies, file download.
//!
//! No bot logic. No retries. Delivery semantics belong to the Bot API.

mod client;
pub mod types;

pub use client::{BotClient, TelegramError};
pub use types::{Chat, Document, File, Message, Update, User};
