use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};

use crate::conclusion::{ConclusionMode, ConclusionThresholds, FallbackPolicy};
use crate::llm_client;
use crate::scoring::ScoringRules;

/// Process-wide configuration loaded from environment variables.
/// Built once at start-up and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Generative-service credential. Only needed by the LLM strategy.
    pub openai_api_key: Option<String>,
    pub llm_api_url: String,
    /// Make.com webhook. Unset means every delivery fails as unconfigured.
    pub webhook_url: Option<String>,
    pub translation_api_url: Option<String>,
    pub translation_api_key: Option<String>,
    pub target_language: String,
    pub conclusion_mode: ConclusionMode,
    pub llm_fallback: FallbackPolicy,
    pub thresholds: ConclusionThresholds,
    pub scoring_rules: ScoringRules,
    /// Applied to every translation, LLM and webhook call.
    pub external_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = ConclusionThresholds::default();
        let thresholds = ConclusionThresholds {
            low: parse_or(&optional, "CONCLUSION_LOW_THRESHOLD", defaults.low)?,
            high: parse_or(&optional, "CONCLUSION_HIGH_THRESHOLD", defaults.high)?,
            positive_buffer: parse_or(&optional, "POSITIVE_BUFFER", defaults.positive_buffer)?,
            negative_buffer: parse_or(&optional, "NEGATIVE_BUFFER", defaults.negative_buffer)?,
        };
        validate_thresholds(&thresholds)?;

        let scoring_rules = match optional("SCORING_RULES_PATH") {
            Some(path) => load_scoring_rules(&path)?,
            None => ScoringRules::default(),
        };

        let timeout_secs: u64 = parse_or(&optional, "EXTERNAL_TIMEOUT_SECS", 30)?;
        ensure!(timeout_secs > 0, "EXTERNAL_TIMEOUT_SECS must be greater than zero");

        Ok(Config {
            port: parse_or(&optional, "PORT", 8080)?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            openai_api_key: optional("OPENAI_API_KEY"),
            llm_api_url: optional("LLM_API_URL")
                .unwrap_or_else(|| llm_client::DEFAULT_API_URL.to_string()),
            webhook_url: optional("MAKE_WEBHOOK_URL"),
            translation_api_url: optional("TRANSLATION_API_URL"),
            translation_api_key: optional("TRANSLATION_API_KEY"),
            target_language: optional("TARGET_LANGUAGE").unwrap_or_else(|| "en".to_string()),
            conclusion_mode: parse_or(&optional, "CONCLUSION_STRATEGY", ConclusionMode::Rules)?,
            llm_fallback: parse_or(&optional, "LLM_FALLBACK", FallbackPolicy::None)?,
            thresholds,
            scoring_rules,
            external_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(optional: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

fn validate_thresholds(thresholds: &ConclusionThresholds) -> Result<()> {
    ensure!(
        thresholds.low <= thresholds.high,
        "CONCLUSION_LOW_THRESHOLD ({}) must not exceed CONCLUSION_HIGH_THRESHOLD ({})",
        thresholds.low,
        thresholds.high
    );
    for (key, value) in [
        ("POSITIVE_BUFFER", thresholds.positive_buffer),
        ("NEGATIVE_BUFFER", thresholds.negative_buffer),
    ] {
        ensure!(
            value.is_finite() && value >= 0.0,
            "{key} must be a non-negative number"
        );
    }
    Ok(())
}

fn load_scoring_rules(path: &str) -> Result<ScoringRules> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scoring rules from '{path}'"))?;
    serde_json::from_str(&raw).with_context(|| format!("Scoring rules in '{path}' are not valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.target_language, "en");
        assert_eq!(config.conclusion_mode, ConclusionMode::Rules);
        assert_eq!(config.llm_fallback, FallbackPolicy::None);
        assert_eq!(config.thresholds, ConclusionThresholds::default());
        assert_eq!(config.scoring_rules, ScoringRules::default());
        assert_eq!(config.external_timeout, Duration::from_secs(30));
        assert_eq!(config.llm_api_url, llm_client::DEFAULT_API_URL);
        assert!(config.webhook_url.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("MAKE_WEBHOOK_URL", "   "), ("OPENAI_API_KEY", "")]).unwrap();
        assert!(config.webhook_url.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("MAKE_WEBHOOK_URL", "https://hook.make.com/abc"),
            ("CONCLUSION_STRATEGY", "llm"),
            ("LLM_FALLBACK", "rules"),
            ("CONCLUSION_LOW_THRESHOLD", "-1"),
            ("CONCLUSION_HIGH_THRESHOLD", "5"),
            ("POSITIVE_BUFFER", "0.25"),
            ("EXTERNAL_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.webhook_url.as_deref(), Some("https://hook.make.com/abc"));
        assert_eq!(config.conclusion_mode, ConclusionMode::Llm);
        assert_eq!(config.llm_fallback, FallbackPolicy::Rules);
        assert_eq!(config.thresholds.low, -1);
        assert_eq!(config.thresholds.high, 5);
        assert_eq!(config.thresholds.positive_buffer, 0.25);
        assert_eq!(config.thresholds.negative_buffer, 0.5);
        assert_eq!(config.external_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("CONCLUSION_STRATEGY", "magic")]).is_err());
        assert!(load(&[("EXTERNAL_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("NEGATIVE_BUFFER", "-0.1")]).is_err());
        let err = load(&[
            ("CONCLUSION_LOW_THRESHOLD", "8"),
            ("CONCLUSION_HIGH_THRESHOLD", "3"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_scoring_rules_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categorical": [{{"field": "co_signer", "deltas": {{"yes": 5, "no": -5}}}}]}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = load(&[("SCORING_RULES_PATH", path.as_str())]).unwrap();
        assert_eq!(config.scoring_rules.categorical.len(), 1);
        assert_eq!(config.scoring_rules.categorical[0].deltas["yes"], 5);
        assert!(config.scoring_rules.numeric.is_empty());
    }

    #[test]
    fn test_missing_scoring_rules_file_is_an_error() {
        let err = load(&[("SCORING_RULES_PATH", "/nonexistent/rules.json")]).unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring rules"));
    }
}
