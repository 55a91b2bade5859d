//! Headline translation through the RapidAPI multi-translate service.
//!
//! # Architecture
//!
//! - [`Translate`]: async trait the pipeline depends on
//! - [`RapidTranslator`]: HTTP implementation
//!
//! The service takes `{"from", "to", "e", "q": [text]}` and answers with a JSON
//! array whose first element is the translation. Any failure is logged and
//! reported as `None`; there are no retries.

use crate::config::TranslatorConfig;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Translates text between two languages.
pub trait Translate {
    /// Translate `text` from `source_lang` to `target_lang`.
    ///
    /// Returns `None` on any failure, including an empty upstream result.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("translation service returned an empty result")]
    Empty,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    from: &'a str,
    to: &'a str,
    e: &'a str,
    q: [&'a str; 1],
}

/// Pull the translation out of a response body.
pub fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    let first = match body {
        Value::Array(items) => items.first().ok_or(TranslateError::Empty)?,
        other => {
            return Err(TranslateError::Malformed(format!(
                "expected an array, got {}",
                truncate_for_log(&other.to_string(), 120)
            )));
        }
    };

    let text = first
        .as_str()
        .ok_or_else(|| TranslateError::Malformed(format!("expected a string, got {first}")))?
        .trim();

    if text.is_empty() {
        Err(TranslateError::Empty)
    } else {
        Ok(text.to_string())
    }
}

/// [`Translate`] implementation backed by the RapidAPI endpoint.
#[derive(Debug, Clone)]
pub struct RapidTranslator {
    client: Client,
    config: TranslatorConfig,
}

impl RapidTranslator {
    pub fn new(client: Client, config: TranslatorConfig) -> Self {
        Self { client, config }
    }

    async fn request(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let payload = TranslateRequest {
            from: source_lang,
            to: target_lang,
            e: "",
            q: [text],
        };
        let host = self.config.endpoint.host_str().unwrap_or_default().to_string();

        let body: Value = self
            .client
            .post(self.config.endpoint.clone())
            .header("X-RapidAPI-Host", host)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_translation(&body)
    }
}

impl Translate for RapidTranslator {
    #[instrument(level = "info", skip_all, fields(from = source_lang, to = target_lang))]
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let t0 = Instant::now();
        match self.request(text, source_lang, target_lang).await {
            Ok(translated) => {
                debug!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    original = %truncate_for_log(text, 80),
                    translated = %truncate_for_log(&translated, 80),
                    "Translated text"
                );
                Some(translated)
            }
            Err(e) => {
                warn!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %e,
                    "Translation failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::build_client;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(server: &MockServer) -> RapidTranslator {
        RapidTranslator::new(
            build_client("test").unwrap(),
            TranslatorConfig {
                endpoint: Url::parse(&format!("{}/t", server.uri())).unwrap(),
                api_key: "secret-key".to_string(),
            },
        )
    }

    #[test]
    fn test_parse_translation() {
        assert_eq!(
            parse_translation(&json!(["Hello world", "ignored"])).unwrap(),
            "Hello world"
        );
        assert!(matches!(parse_translation(&json!([])), Err(TranslateError::Empty)));
        assert!(matches!(parse_translation(&json!(["  "])), Err(TranslateError::Empty)));
        assert!(matches!(
            parse_translation(&json!({"message": "quota"})),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_translation(&json!([42])),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_translate_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t"))
            .and(header("X-RapidAPI-Key", "secret-key"))
            .and(header("X-RapidAPI-Host", "127.0.0.1"))
            .and(body_json(json!({
                "from": "es",
                "to": "en",
                "e": "",
                "q": ["La crisis política"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["The political crisis"])))
            .expect(1)
            .mount(&server)
            .await;

        let translated = translator(&server)
            .translate("La crisis política", "es", "en")
            .await;
        assert_eq!(translated.as_deref(), Some("The political crisis"));
    }

    #[tokio::test]
    async fn test_translate_failures_are_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let t = translator(&server);
        assert!(t.translate("Hola", "es", "en").await.is_none());
    }

    #[tokio::test]
    async fn test_translate_malformed_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(translator(&server).translate("Hola", "es", "en").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_text_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["x"])))
            .expect(0)
            .mount(&server)
            .await;

        assert!(translator(&server).translate("   ", "es", "en").await.is_none());
    }
}
