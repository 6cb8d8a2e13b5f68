//! Stub backends for the translation, generative and webhook seams, plus a
//! throwaway local HTTP server for exercising the real clients.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;

use crate::dispatch::{TransportError, WebhookTransport};
use crate::llm_client::{LlmError, TextGenerator};
use crate::translation::{TranslationError, Translator};

// ────────────────────────────────────────────────────────────────────────────
// Translator
// ────────────────────────────────────────────────────────────────────────────

enum TranslatorMode {
    /// Known phrases are translated, anything else is echoed back.
    Mapping(HashMap<String, String>),
    Failing,
}

pub struct StubTranslator {
    mode: TranslatorMode,
    calls: AtomicUsize,
}

impl StubTranslator {
    pub fn mapping(pairs: &[(&str, &str)]) -> Self {
        Self {
            mode: TranslatorMode::Mapping(
                pairs
                    .iter()
                    .map(|(from, to)| (from.to_string(), to.to_string()))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn echo() -> Self {
        Self::mapping(&[])
    }

    pub fn failing() -> Self {
        Self {
            mode: TranslatorMode::Failing,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        _target_language: &str,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            TranslatorMode::Mapping(pairs) => {
                Ok(pairs.get(text).cloned().unwrap_or_else(|| text.to_string()))
            }
            TranslatorMode::Failing => Err(TranslationError::Status(429)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generative text service
// ────────────────────────────────────────────────────────────────────────────

enum GeneratorMode {
    Reply(String),
    Status(u16),
    MissingCredential,
}

pub struct StubGenerator {
    mode: GeneratorMode,
    last_request: Mutex<Option<(String, String)>>,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn with_mode(mode: GeneratorMode) -> Self {
        Self {
            mode,
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::with_mode(GeneratorMode::Reply(reply.to_string()))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_mode(GeneratorMode::Status(status))
    }

    pub fn missing_credential() -> Self {
        Self::with_mode(GeneratorMode::MissingCredential)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system, content)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().expect("stub mutex poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, system: &str, content: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("stub mutex poisoned") =
            Some((system.to_string(), content.to_string()));
        match &self.mode {
            GeneratorMode::Reply(reply) => Ok(reply.clone()),
            GeneratorMode::Status(status) => Err(LlmError::Api {
                status: *status,
                message: "stubbed failure".to_string(),
            }),
            GeneratorMode::MissingCredential => Err(LlmError::MissingCredential),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Webhook transport
// ────────────────────────────────────────────────────────────────────────────

pub struct RecordingTransport {
    status: Option<u16>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, serde_json::Value)>>,
}

impl RecordingTransport {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Every call fails at the transport level.
    pub fn unreachable() -> Self {
        Self {
            status: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, serde_json::Value)> {
        self.last_request.lock().expect("stub mutex poisoned").clone()
    }
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<u16, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("stub mutex poisoned") =
            Some((url.to_string(), body.clone()));
        match self.status {
            Some(status) => Ok(status),
            None => Err(TransportError::Http(unreachable_error())),
        }
    }
}

/// A genuine `reqwest::Error`, produced without touching the network.
fn unreachable_error() -> reqwest::Error {
    reqwest::Client::new()
        .post("not a url")
        .build()
        .expect_err("an invalid URL cannot build a request")
}

// ────────────────────────────────────────────────────────────────────────────
// Local HTTP server
// ────────────────────────────────────────────────────────────────────────────

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

/// Client whose calls give up after one second.
pub fn short_timeout_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(1))
        .build()
        .expect("test http client")
}
