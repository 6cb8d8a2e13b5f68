//! Translator Adapter: best-effort translation of free-text answers.
//!
//! `translate_or_original` is the only entry point the pipeline uses. It never
//! fails: any error from the backend is logged as a warning and the original
//! text is returned, flagged as degraded.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation service is not configured")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned status {0}")]
    Status(u16),

    #[error("translation service returned an empty translation")]
    Empty,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, TranslationError>;
}

/// Result of a fail-soft translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translated {
    pub text: String,
    /// True when the original text was kept because translation failed.
    pub degraded: bool,
    pub warning: Option<String>,
}

/// Translates `text`, falling back to the input unchanged on any failure.
pub async fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    target_language: &str,
) -> Translated {
    if text.trim().is_empty() {
        return Translated {
            text: text.to_string(),
            degraded: false,
            warning: None,
        };
    }

    match translator.translate(text, target_language).await {
        Ok(translated) => Translated {
            text: translated,
            degraded: false,
            warning: None,
        },
        Err(e) => {
            warn!("Translation to '{target_language}' failed, scoring original text: {e}");
            Translated {
                text: text.to_string(),
                degraded: true,
                warning: Some(format!("translation failed: {e}")),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LibreTranslate-compatible HTTP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP translator. With no URL configured every call fails soft with `Unconfigured`.
#[derive(Clone)]
pub struct HttpTranslator {
    client: Client,
    api_url: Option<String>,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(client: Client, api_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let api_url = self
            .api_url
            .as_deref()
            .ok_or(TranslationError::Unconfigured)?;

        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(api_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let parsed: TranslateResponse = response.json().await?;
        if parsed.translated_text.trim().is_empty() {
            return Err(TranslationError::Empty);
        }
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::test_support::{serve, short_timeout_client, StubTranslator};

    async fn translator_for(router: Router) -> HttpTranslator {
        let base = serve(router).await;
        HttpTranslator::new(
            short_timeout_client(),
            Some(format!("{base}/translate")),
            Some("test-key".to_string()),
        )
    }

    #[tokio::test]
    async fn test_success_returns_translation() {
        let translator = StubTranslator::mapping(&[("Me va bien", "I am doing well")]);
        let result = translate_or_original(&translator, "Me va bien", "en").await;
        assert_eq!(result.text, "I am doing well");
        assert!(!result.degraded);
        assert!(result.warning.is_none());
    }

    #[tokio::test]
    async fn test_failure_returns_original_text_unchanged() {
        let translator = StubTranslator::failing();
        let original = "  Trabajo duro todos los días!  ";
        let result = translate_or_original(&translator, original, "en").await;
        assert_eq!(result.text, original);
        assert!(result.degraded);
        assert!(result.warning.unwrap().contains("translation failed"));
    }

    #[tokio::test]
    async fn test_blank_input_skips_the_backend() {
        let translator = StubTranslator::failing();
        let result = translate_or_original(&translator, "   ", "en").await;
        assert_eq!(result.text, "   ");
        assert!(!result.degraded);
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_http_translator_fails_soft() {
        let translator = HttpTranslator::new(Client::new(), None, None);
        let err = translator.translate("hola", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::Unconfigured));

        let result = translate_or_original(&translator, "hola", "en").await;
        assert_eq!(result.text, "hola");
        assert!(result.degraded);
    }

    #[test]
    fn test_request_omits_missing_api_key() {
        let body = TranslateRequest {
            q: "hola",
            source: "auto",
            target: "en",
            format: "text",
            api_key: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("api_key").is_none());
        assert_eq!(value["target"], "en");
    }

    #[tokio::test]
    async fn test_http_translator_posts_libretranslate_request() {
        let router = Router::new().route(
            "/translate",
            post(|Json(body): Json<Value>| async move {
                let field = |name: &str| body[name].as_str().unwrap_or("-").to_string();
                Json(json!({
                    "translatedText": format!(
                        "{}|{}|{}|{}|{}",
                        field("q"),
                        field("source"),
                        field("target"),
                        field("format"),
                        field("api_key")
                    )
                }))
            }),
        );
        let translator = translator_for(router).await;

        let text = translator.translate("Me va bien", "en").await.unwrap();
        assert_eq!(text, "Me va bien|auto|en|text|test-key");
    }

    #[tokio::test]
    async fn test_http_translator_error_status_degrades() {
        let router = Router::new().route(
            "/translate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let translator = translator_for(router).await;

        let err = translator.translate("hola", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::Status(500)));

        let result = translate_or_original(&translator, "hola", "en").await;
        assert_eq!(result.text, "hola");
        assert!(result.degraded);
        assert!(result.warning.unwrap().contains("status 500"));
    }

    #[tokio::test]
    async fn test_http_translator_malformed_body_degrades() {
        let router = Router::new().route("/translate", post(|| async { "<html>oops</html>" }));
        let translator = translator_for(router).await;

        let err = translator.translate("hola", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::Http(_)));

        let result = translate_or_original(&translator, "hola", "en").await;
        assert_eq!(result.text, "hola");
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn test_http_translator_blank_translation_is_an_error() {
        let router = Router::new().route(
            "/translate",
            post(|| async { Json(json!({"translatedText": "  "})) }),
        );
        let translator = translator_for(router).await;

        let err = translator.translate("hola", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::Empty));
    }

    #[tokio::test]
    async fn test_http_translator_times_out_instead_of_hanging() {
        let router = Router::new().route(
            "/translate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"translatedText": "too late"}))
            }),
        );
        let translator = translator_for(router).await;

        let started = Instant::now();
        let err = translator.translate("hola", "en").await.unwrap_err();
        assert!(matches!(&err, TranslationError::Http(e) if e.is_timeout()));
        assert!(started.elapsed() < Duration::from_secs(4));

        let result = translate_or_original(&translator, "hola", "en").await;
        assert_eq!(result.text, "hola");
        assert!(result.degraded);
    }
}
