// Configuration loading

pub mod settings;
pub mod token;

pub use settings::Settings;
pub use token::{resolve_token, TokenLookup, TokenSource};
