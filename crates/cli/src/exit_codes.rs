//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `visibot` exit codes.
//! Supervisors (systemd, container restarts) key off them: asset and token
//! failures will not fix themselves on restart, network failures might.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                                  |
//! |---------|------------|----------------------------------------------|
//! | 0       | Universal  | Success                                      |
//! | 2       | Universal  | CLI usage error (bad args, missing file)     |
//! | 10-19   | assets     | Model artifact / example template            |
//! | 20-29   | token      | Bot token lookup and keychain                |
//! | 30-39   | transport  | Bot API auth and connectivity                |
//! | 40-49   | predict    | Offline `visibot predict` input failures     |

use visibot_telegram::TelegramError;

// =============================================================================
// Universal (0, 2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, unreadable input file.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Assets (10-19)
// =============================================================================

/// Model artifact missing, unreadable, or structurally invalid.
pub const EXIT_MODEL: u8 = 10;

/// Example template (sent on /start) missing.
pub const EXIT_EXAMPLE: u8 = 11;

// =============================================================================
// Token (20-29)
// =============================================================================

/// No bot token from flag, keychain, or environment.
pub const EXIT_TOKEN_MISSING: u8 = 20;

/// Keychain error (cannot read/write the token).
pub const EXIT_KEYCHAIN: u8 = 21;

// =============================================================================
// Transport (30-39)
// =============================================================================

/// Bot API rejected the token.
pub const EXIT_TRANSPORT_AUTH: u8 = 30;

/// Bot API unreachable or answering with errors.
pub const EXIT_TRANSPORT_NETWORK: u8 = 31;

// =============================================================================
// Predict (40-49)
// =============================================================================

/// Input file is not valid comma-separated data.
pub const EXIT_PREDICT_PARSE: u8 = 40;

/// Input file has a header but no records.
pub const EXIT_PREDICT_EMPTY: u8 = 41;

/// Model rejected the table (column mismatch, non-numeric cells).
pub const EXIT_PREDICT_FAILED: u8 = 42;

/// Map a transport failure to its exit code.
pub fn transport_exit_code(err: &TelegramError) -> u8 {
    match err {
        TelegramError::Unauthorized(_) => EXIT_TRANSPORT_AUTH,
        _ => EXIT_TRANSPORT_NETWORK,
    }
}
