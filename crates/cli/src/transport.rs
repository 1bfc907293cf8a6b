//! Outbound side of the bot: the operations handlers need from the transport.

use visibot_telegram::{BotClient, TelegramError};

use crate::event::{ChatId, FileRef};

pub trait Transport {
    fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TelegramError>;

    fn send_document(&self, chat: ChatId, file_name: &str, bytes: Vec<u8>) -> Result<(), TelegramError>;

    /// Fetch an upload's bytes. The bytes live for one handler call.
    fn fetch_file(&self, file: &FileRef) -> Result<Vec<u8>, TelegramError>;
}

/// Bot API transport with a download size ceiling.
#[derive(Clone)]
pub struct TelegramTransport {
    client: BotClient,
    max_file_bytes: u64,
}

impl TelegramTransport {
    pub fn new(client: BotClient, max_file_bytes: u64) -> Self {
        Self { client, max_file_bytes }
    }

    pub fn client(&self) -> &BotClient {
        &self.client
    }
}

impl Transport for TelegramTransport {
    fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TelegramError> {
        self.client.send_message(chat, text).map(|_| ())
    }

    fn send_document(&self, chat: ChatId, file_name: &str, bytes: Vec<u8>) -> Result<(), TelegramError> {
        self.client.send_document(chat, file_name, bytes).map(|_| ())
    }

    fn fetch_file(&self, file: &FileRef) -> Result<Vec<u8>, TelegramError> {
        // Refuse before asking for a download link when the size is announced.
        if let Some(size) = file.size {
            if size > self.max_file_bytes {
                return Err(TelegramError::TooLarge { size, limit: self.max_file_bytes });
            }
        }

        let remote = self.client.get_file(&file.file_id)?;
        let path = remote.file_path.ok_or_else(|| TelegramError::Api {
            code: None,
            description: format!("file {} has no download path", file.file_id),
        })?;
        self.client.download(&path, self.max_file_bytes)
    }
}
