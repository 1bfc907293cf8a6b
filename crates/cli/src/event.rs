//! Inbound events: what a Bot API message means to this bot.

use visibot_telegram::Message;

pub type ChatId = i64;

/// The two commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

/// Handle to an uploaded file, resolved to bytes by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub file_id: String,
    pub file_name: Option<String>,
    /// Size the transport announced, if any.
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command { chat: ChatId, command: Command },
    /// A message routed to file intake. `file` is `None` when nothing was attached.
    DocumentUpload { chat: ChatId, file: Option<FileRef> },
}

impl InboundEvent {
    pub fn chat(&self) -> ChatId {
        match self {
            InboundEvent::Command { chat, .. } | InboundEvent::DocumentUpload { chat, .. } => *chat,
        }
    }

    /// Classify a message. Returns `None` for messages the bot ignores:
    /// unknown commands, commands addressed to another bot, and messages
    /// with neither text, caption nor attachment (service messages, stickers).
    pub fn from_message(msg: &Message, bot_username: Option<&str>) -> Option<Self> {
        let chat = msg.chat.id;

        if let Some(doc) = &msg.document {
            return Some(InboundEvent::DocumentUpload {
                chat,
                file: Some(FileRef {
                    file_id: doc.file_id.clone(),
                    file_name: doc.file_name.clone(),
                    size: doc.file_size,
                }),
            });
        }

        let text = msg.text.as_deref().or(msg.caption.as_deref())?;
        if text.trim_start().starts_with('/') {
            let command = parse_command(text, bot_username)?;
            return Some(InboundEvent::Command { chat, command });
        }

        Some(InboundEvent::DocumentUpload { chat, file: None })
    }
}

/// Parse `/start`, `/help@botname args`, etc.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let word = text.trim_start().strip_prefix('/')?.split_whitespace().next()?;
    let (name, addressee) = match word.split_once('@') {
        Some((name, to)) => (name, Some(to)),
        None => (word, None),
    };

    if let (Some(to), Some(me)) = (addressee, bot_username) {
        if !to.eq_ignore_ascii_case(me) {
            return None;
        }
    }

    match name {
        "start" => Some(Command::Start),
        "help" => Some(Command::Help),
        _ => None,
    }
}
