// Bot token lookup
//
// The token is resolved from, in order:
// 1. An explicit value (command-line flag)
// 2. System keychain
// 3. VISIBOT_TOKEN environment variable (CI/headless)
//
// The token is NEVER stored in settings.json

use std::env;

/// Service name for keychain storage
const KEYCHAIN_SERVICE: &str = "visibot";

/// Keychain account holding the bot token
const KEYCHAIN_ACCOUNT: &str = "telegram/token";

/// Environment variable consulted last
pub const TOKEN_ENV_VAR: &str = "VISIBOT_TOKEN";

/// Where a token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Passed on the command line
    Argument,
    /// Retrieved from system keychain
    Keychain,
    /// Retrieved from environment variable
    Environment,
    /// No token found
    None,
}

impl TokenSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSource::Argument => "argument",
            TokenSource::Keychain => "keychain",
            TokenSource::Environment => "environment",
            TokenSource::None => "none",
        }
    }
}

/// Result of token lookup
#[derive(Debug, Clone)]
pub struct TokenLookup {
    pub token: Option<String>,
    pub source: TokenSource,
}

/// Resolve the bot token. Empty values count as absent.
pub fn resolve_token(explicit: Option<&str>) -> TokenLookup {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return TokenLookup {
            token: Some(token.to_string()),
            source: TokenSource::Argument,
        };
    }

    #[cfg(feature = "keychain")]
    {
        if let Ok(entry) = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT) {
            if let Ok(token) = entry.get_password() {
                if !token.trim().is_empty() {
                    return TokenLookup {
                        token: Some(token.trim().to_string()),
                        source: TokenSource::Keychain,
                    };
                }
            }
        }
    }

    if let Ok(token) = env::var(TOKEN_ENV_VAR) {
        if !token.trim().is_empty() {
            return TokenLookup {
                token: Some(token.trim().to_string()),
                source: TokenSource::Environment,
            };
        }
    }

    TokenLookup {
        token: None,
        source: TokenSource::None,
    }
}

/// Store the bot token in the system keychain
#[cfg(feature = "keychain")]
pub fn set_token(token: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to create keychain entry: {}", e))?;

    entry
        .set_password(token)
        .map_err(|e| format!("Failed to store token in keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn set_token(_token: &str) -> Result<(), String> {
    Err(format!("Keychain support not enabled. Set {} instead.", TOKEN_ENV_VAR))
}

/// Delete the bot token from the system keychain
#[cfg(feature = "keychain")]
pub fn delete_token() -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to access keychain entry: {}", e))?;

    entry
        .delete_credential()
        .map_err(|e| format!("Failed to delete token from keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn delete_token() -> Result<(), String> {
    Err("Keychain support not enabled.".to_string())
}

/// Check if keychain support is available
pub fn keychain_available() -> bool {
    #[cfg(feature = "keychain")]
    {
        keyring::Entry::new(KEYCHAIN_SERVICE, "test").is_ok()
    }
    #[cfg(not(feature = "keychain"))]
    {
        false
    }
}

/// Mask a token for display: keep the numeric bot id and the last four characters.
pub fn mask_token(token: &str) -> String {
    let (id, secret) = token.split_once(':').unwrap_or(("", token));
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if id.is_empty() {
        format!("…{}", tail)
    } else {
        format!("{}:…{}", id, tail)
    }
}
