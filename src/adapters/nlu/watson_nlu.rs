//! Watson NLU Analyzer - Implementation of NluAnalyzer for IBM Watson
//! Natural Language Understanding.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::domain::conversation::{Entity, Sentiment};
use crate::ports::{NluAnalysis, NluAnalyzer, NluError};

pub const DEFAULT_NLU_VERSION: &str = "2022-04-07";

const KEYWORD_LIMIT: u32 = 10;
const ENTITY_LIMIT: u32 = 10;
const CATEGORY_LIMIT: u32 = 3;

#[derive(Debug, Clone)]
pub struct WatsonNluConfig {
    api_key: Secret<String>,
    /// Service instance URL.
    pub url: String,
    /// API version date.
    pub version: String,
    pub timeout: Duration,
}

impl WatsonNluConfig {
    pub fn new(api_key: Secret<String>, url: impl Into<String>) -> Self {
        Self {
            api_key,
            url: url.into(),
            version: DEFAULT_NLU_VERSION.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct WatsonNluAnalyzer {
    config: WatsonNluConfig,
    client: Client,
}

impl WatsonNluAnalyzer {
    pub fn new(config: WatsonNluConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/v1/analyze?version={}",
            self.config.url.trim_end_matches('/'),
            self.config.version
        )
    }
}

fn analyze_body(text: &str) -> serde_json::Value {
    json!({
        "text": text,
        "features": {
            "keywords": { "limit": KEYWORD_LIMIT },
            "entities": { "limit": ENTITY_LIMIT },
            "sentiment": {},
            "categories": { "limit": CATEGORY_LIMIT },
        },
        "language": "en",
    })
}

#[async_trait]
impl NluAnalyzer for WatsonNluAnalyzer {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, NluError> {
        let response = self
            .client
            .post(self.analyze_url())
            .basic_auth("apikey", Some(self.config.api_key.expose_secret()))
            .json(&analyze_body(text))
            .send()
            .await
            .map_err(|e| NluError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NluError::Unavailable(format!("{}: {}", status, body)));
        }

        let body: WatsonNluResponse = response
            .json()
            .await
            .map_err(|e| NluError::Parse(e.to_string()))?;

        Ok(body.into())
    }
}

/// Analyzer used when no NLU service is configured. Every call reports
/// `NotConfigured`, which callers turn into default signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNluAnalyzer;

#[async_trait]
impl NluAnalyzer for DisabledNluAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<NluAnalysis, NluError> {
        Err(NluError::NotConfigured)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Watson NLU API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize, Serialize)]
struct WatsonNluResponse {
    #[serde(default)]
    keywords: Vec<WatsonText>,
    #[serde(default)]
    entities: Vec<WatsonEntity>,
    #[serde(default)]
    sentiment: Option<WatsonSentiment>,
    #[serde(default)]
    categories: Vec<WatsonCategory>,
}

#[derive(Debug, Deserialize, Serialize)]
struct WatsonText {
    text: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct WatsonEntity {
    #[serde(rename = "type")]
    kind: String,
    text: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct WatsonSentiment {
    document: Option<WatsonLabel>,
}

#[derive(Debug, Deserialize, Serialize)]
struct WatsonLabel {
    label: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct WatsonCategory {
    label: String,
}

impl From<WatsonNluResponse> for NluAnalysis {
    fn from(body: WatsonNluResponse) -> Self {
        let sentiment = body
            .sentiment
            .and_then(|s| s.document)
            .map(|d| Sentiment::from_label(&d.label))
            .unwrap_or_default();

        NluAnalysis {
            keywords: body.keywords.into_iter().map(|k| k.text).collect(),
            entities: body
                .entities
                .into_iter()
                .map(|e| Entity::new(e.kind, e.text))
                .collect(),
            sentiment,
            categories: body.categories.into_iter().map(|c| c.label).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_url_includes_version() {
        let analyzer = WatsonNluAnalyzer::new(WatsonNluConfig::new(
            Secret::new("k".into()),
            "https://nlu.example/",
        ));
        assert_eq!(
            analyzer.analyze_url(),
            "https://nlu.example/v1/analyze?version=2022-04-07"
        );
    }

    #[test]
    fn request_body_requests_all_features() {
        let body = analyze_body("I have a headache");
        assert_eq!(body["text"], "I have a headache");
        assert_eq!(body["features"]["keywords"]["limit"], 10);
        assert_eq!(body["features"]["entities"]["limit"], 10);
        assert_eq!(body["features"]["categories"]["limit"], 3);
        assert!(body["features"]["sentiment"].is_object());
    }

    #[test]
    fn response_maps_to_analysis() {
        let body: WatsonNluResponse = serde_json::from_str(
            r#"{
                "keywords": [{"text": "headache", "relevance": 0.9}, {"text": "fever"}],
                "entities": [{"type": "HealthCondition", "text": "migraine"}],
                "sentiment": {"document": {"label": "negative", "score": -0.7}},
                "categories": [{"label": "/health and fitness/disease", "score": 0.8}]
            }"#,
        )
        .unwrap();

        let analysis: NluAnalysis = body.into();

        assert_eq!(analysis.keywords, vec!["headache".to_string(), "fever".to_string()]);
        assert_eq!(analysis.entities, vec![Entity::new("HealthCondition", "migraine")]);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.categories, vec!["/health and fitness/disease".to_string()]);
    }

    #[test]
    fn missing_sections_default() {
        let body: WatsonNluResponse = serde_json::from_str("{}").unwrap();
        let analysis: NluAnalysis = body.into();
        assert_eq!(analysis, NluAnalysis::default());
    }

    #[tokio::test]
    async fn disabled_analyzer_reports_not_configured() {
        let result = DisabledNluAnalyzer.analyze("hello").await;
        assert_eq!(result, Err(NluError::NotConfigured));
    }
}
