//! Telegram Bot API client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers what the bot needs: token check, long polling, text and document
//! replies, and downloading uploaded files.

use std::time::Duration;

use reqwest::blocking::multipart;
use serde::de::DeserializeOwned;

use crate::types::{ApiResponse, File, Message, Update, User};

/// Bot API client (blocking).
#[derive(Clone)]
pub struct BotClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

/// Error type for Bot API operations.
#[derive(Debug)]
pub enum TelegramError {
    /// Token rejected by the server
    Unauthorized(String),
    /// Network error
    Network(String),
    /// HTTP error with status code and a non-API body
    Http(u16, String),
    /// Bot API returned ok=false
    Api { code: Option<i64>, description: String },
    /// JSON parsing error
    Parse(String),
    /// File exceeds the configured download limit
    TooLarge { size: u64, limit: u64 },
}

impl std::fmt::Display for TelegramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelegramError::Unauthorized(msg) => write!(f, "Bot token rejected: {}", msg),
            TelegramError::Network(msg) => write!(f, "Network error: {}", msg),
            TelegramError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            TelegramError::Api { code: Some(code), description } => {
                write!(f, "Bot API error {}: {}", code, description)
            }
            TelegramError::Api { code: None, description } => {
                write!(f, "Bot API error: {}", description)
            }
            TelegramError::Parse(msg) => write!(f, "Parse error: {}", msg),
            TelegramError::TooLarge { size, limit } => {
                write!(f, "File is {} bytes, limit is {}", size, limit)
            }
        }
    }
}

impl std::error::Error for TelegramError {}

impl BotClient {
    /// Create a client. `request_timeout` must exceed the long-poll timeout.
    pub fn new(token: &str, api_base: &str, request_timeout: Duration) -> Result<Self, TelegramError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("visibot/{}", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Verify the token and get the bot's own account.
    pub fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}))
    }

    /// Long-poll for new messages. `offset` is one past the last seen update id.
    pub fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, TelegramError> {
        let mut body = serde_json::json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = serde_json::Value::from(offset);
        }
        self.call("getUpdates", &body)
    }

    pub fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.call("sendMessage", &serde_json::json!({ "chat_id": chat_id, "text": text }))
    }

    /// Upload `bytes` as a document named `file_name`.
    pub fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<Message, TelegramError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);

        let response = self.http.post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .map_err(network)?;

        read_envelope(response)
    }

    /// Resolve a file id to a downloadable path.
    pub fn get_file(&self, file_id: &str) -> Result<File, TelegramError> {
        self.call("getFile", &serde_json::json!({ "file_id": file_id }))
    }

    /// Download a file returned by `get_file`, refusing anything over `limit` bytes.
    pub fn download(&self, file_path: &str, limit: u64) -> Result<Vec<u8>, TelegramError> {
        let url = format!("{}/file/bot{}/{}", self.api_base, self.token, file_path);
        let response = self.http.get(url).send().map_err(network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TelegramError::Http(status, body));
        }
        if let Some(size) = response.content_length() {
            if size > limit {
                return Err(TelegramError::TooLarge { size, limit });
            }
        }

        let bytes = response.bytes().map_err(network)?;
        if bytes.len() as u64 > limit {
            return Err(TelegramError::TooLarge { size: bytes.len() as u64, limit });
        }
        Ok(bytes.to_vec())
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    fn call<T: DeserializeOwned>(&self, method: &str, body: &serde_json::Value) -> Result<T, TelegramError> {
        log::debug!("Bot API call: {}", method);
        let response = self.http.post(self.method_url(method))
            .json(body)
            .send()
            .map_err(network)?;

        read_envelope(response)
    }
}

// ── Free functions ──────────────────────────────────────────────────

/// Request URLs embed the token, so errors are stripped of them.
fn network(e: reqwest::Error) -> TelegramError {
    TelegramError::Network(e.without_url().to_string())
}

/// Decode the `{ok, result, description, error_code}` envelope.
/// The Bot API sends the envelope on error statuses too.
fn read_envelope<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, TelegramError> {
    let status = response.status().as_u16();
    let text = response.text().map_err(network)?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
        Ok(env) => env,
        Err(e) if (200..300).contains(&status) => return Err(TelegramError::Parse(e.to_string())),
        Err(_) => return Err(TelegramError::Http(status, text)),
    };

    if envelope.ok {
        return envelope.result
            .ok_or_else(|| TelegramError::Parse("Missing result in response".into()));
    }

    let description = envelope.description.unwrap_or_default();
    match envelope.error_code {
        Some(401) | Some(404) => Err(TelegramError::Unauthorized(description)),
        code => Err(TelegramError::Api { code, description }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const TOKEN: &str = "123:TEST";

    fn client(server: &MockServer) -> BotClient {
        BotClient::new(TOKEN, &server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_get_me() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/getMe");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": {"id": 99, "is_bot": true, "first_name": "Visibility", "username": "visibot"}
                }));
        });

        let me = client(&server).get_me().unwrap();
        mock.assert();
        assert_eq!(me.id, 99);
        assert!(me.is_bot);
        assert_eq!(me.username.as_deref(), Some("visibot"));
    }

    #[test]
    fn test_unauthorized_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/getMe");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"ok": false, "error_code": 401, "description": "Unauthorized"}));
        });

        let err = client(&server).get_me().unwrap_err();
        assert!(matches!(err, TelegramError::Unauthorized(ref d) if d == "Unauthorized"), "{err:?}");
    }

    #[test]
    fn test_api_error_keeps_description() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/sendMessage");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "ok": false, "error_code": 400, "description": "Bad Request: chat not found"
                }));
        });

        let err = client(&server).send_message(1, "hi").unwrap_err();
        match err {
            TelegramError::Api { code, description } => {
                assert_eq!(code, Some(400));
                assert!(description.contains("chat not found"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/getMe");
            then.status(502).body("Bad Gateway");
        });

        let err = client(&server).get_me().unwrap_err();
        assert!(matches!(err, TelegramError::Http(502, _)), "{err:?}");
    }

    #[test]
    fn test_get_updates_parses_messages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/getUpdates");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": [
                        {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 5, "type": "private"}, "text": "/start"}},
                        {"update_id": 11, "message": {"message_id": 2, "chat": {"id": 5, "type": "private"},
                            "document": {"file_id": "F1", "file_unique_id": "U1", "file_name": "a.csv"}}}
                    ]
                }));
        });

        let updates = client(&server).get_updates(Some(10), 0).unwrap();
        mock.assert();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/start"));
        assert_eq!(updates[1].message.as_ref().unwrap().document.as_ref().unwrap().file_id, "F1");
    }

    #[test]
    fn test_send_document_is_multipart() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/sendDocument");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": {"message_id": 3, "chat": {"id": 5, "type": "private"},
                        "document": {"file_id": "F2", "file_unique_id": "U2", "file_name": "example.csv"}}
                }));
        });

        let msg = client(&server)
            .send_document(5, "example.csv", b"T,U\n1,2\n".to_vec())
            .unwrap();
        mock.assert();
        assert_eq!(msg.document.unwrap().file_name.as_deref(), Some("example.csv"));
    }

    #[test]
    fn test_get_file_and_download() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:TEST/getFile");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": {"file_id": "F1", "file_unique_id": "U1", "file_size": 8, "file_path": "documents/file_1.csv"}
                }));
        });
        let download = server.mock(|when, then| {
            when.method(GET).path("/file/bot123:TEST/documents/file_1.csv");
            then.status(200).body("T,U\n1,2\n");
        });

        let c = client(&server);
        let file = c.get_file("F1").unwrap();
        let bytes = c.download(file.file_path.as_deref().unwrap(), 1024).unwrap();
        download.assert();
        assert_eq!(bytes, b"T,U\n1,2\n");
    }

    #[test]
    fn test_download_over_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/file/bot123:TEST/documents/big.csv");
            then.status(200).body("x".repeat(64));
        });

        let err = client(&server).download("documents/big.csv", 16).unwrap_err();
        assert!(matches!(err, TelegramError::TooLarge { size: 64, limit: 16 }), "{err:?}");
    }

    #[test]
    fn test_trailing_slash_in_api_base() {
        let c = BotClient::new(TOKEN, "https://api.example/", Duration::from_secs(1)).unwrap();
        assert_eq!(c.method_url("getMe"), "https://api.example/bot123:TEST/getMe");
    }
}
