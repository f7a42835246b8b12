//! Google Safe Browsing v4 client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::SafetyVerdict;
use crate::domain::gateways::{GatewayError, SafetyGateway};

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// Client for the `threatMatches:find` endpoint.
///
/// When no API key is configured every URL is reported as safe; the
/// deployment opted out of threat detection.
pub struct GoogleSafeBrowsingClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleSafeBrowsingClient {
    pub fn new(http: reqwest::Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            http,
            endpoint,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct ThreatResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: Option<String>,
    platform_type: Option<String>,
    threat_entry_type: Option<String>,
    threat: Option<ThreatEntry>,
}

#[derive(Deserialize)]
struct ThreatEntry {
    url: Option<String>,
}

#[async_trait]
impl SafetyGateway for GoogleSafeBrowsingClient {
    async fn check(&self, url: &str) -> Result<SafetyVerdict, GatewayError> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!("no Safe Browsing key configured, marking URL as safe");
            return Ok(SafetyVerdict::safe());
        };

        let body = json!({
            "client": {
                "clientId": "fractal-link",
                "clientVersion": env!("CARGO_PKG_VERSION"),
            },
            "threatInfo": {
                "threatTypes": THREAT_TYPES,
                "platformTypes": ["ANY_PLATFORM"],
                "threatEntryTypes": ["URL"],
                "threatEntries": [{ "url": url }],
            },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Request(format!(
                "threat lookup returned {status}"
            )));
        }

        let parsed: ThreatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Payload(e.to_string()))?;

        // An empty body (no matches) means no known threats.
        match parsed.matches.into_iter().next() {
            None => Ok(SafetyVerdict::safe()),
            Some(m) => Ok(SafetyVerdict {
                safe: false,
                threat_type: m.threat_type,
                platform_type: m.platform_type,
                threat_entry_type: m.threat_entry_type,
                threat_info: m.threat.and_then(|t| t.url),
            }),
        }
    }
}
