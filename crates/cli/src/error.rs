use std::fmt;

use visibot_telegram::TelegramError;

/// A handler could not finish its interaction.
#[derive(Debug)]
pub enum HandleError {
    /// A local asset the handler must send is unreadable.
    AssetMissing { path: String, message: String },
    /// The transport failed to fetch or deliver.
    Transport(TelegramError),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetMissing { path, message } => write!(f, "asset '{path}' unavailable: {message}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl std::error::Error for HandleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::AssetMissing { .. } => None,
        }
    }
}

impl From<TelegramError> for HandleError {
    fn from(e: TelegramError) -> Self {
        Self::Transport(e)
    }
}
