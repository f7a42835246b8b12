//! api-ninjas profanity filter client used for branded-name screening.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::gateways::{GatewayError, NameScreeningGateway};

/// Client for the api-ninjas `profanityfilter` endpoint.
///
/// Without an API key every branded name is rejected; names cannot be
/// screened, so they are never approved.
pub struct NinjaProfanityFilter {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl NinjaProfanityFilter {
    pub fn new(http: reqwest::Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            http,
            endpoint,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct ProfanityResponse {
    has_profanity: bool,
}

#[async_trait]
impl NameScreeningGateway for NinjaProfanityFilter {
    async fn screen(&self, name: &str) -> Result<bool, GatewayError> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!("no profanity filter key configured, rejecting branded name");
            return Ok(false);
        };

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("text", name)])
            .header("X-Api-Key", api_key)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Request(format!(
                "profanity filter returned {status}"
            )));
        }

        let parsed: ProfanityResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Payload(e.to_string()))?;

        Ok(!parsed.has_profanity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, api_key: Option<&str>) -> NinjaProfanityFilter {
        NinjaProfanityFilter::new(
            reqwest::Client::new(),
            format!("{}/v1/profanityfilter", server.uri()),
            api_key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn clean_name_is_approved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("text", "my-brand"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "original": "my-brand",
                "censored": "my-brand",
                "has_profanity": false,
            })))
            .mount(&server)
            .await;

        let approved = client(&server, Some("test-key"))
            .screen("my-brand")
            .await
            .unwrap();

        assert!(approved);
    }

    #[tokio::test]
    async fn profane_name_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "original": "bad-word",
                "censored": "***-word",
                "has_profanity": true,
            })))
            .mount(&server)
            .await;

        let approved = client(&server, Some("test-key"))
            .screen("bad-word")
            .await
            .unwrap();

        assert!(!approved);
    }

    #[tokio::test]
    async fn missing_key_rejects_without_calling_out() {
        let server = MockServer::start().await;

        let approved = client(&server, None).screen("my-brand").await.unwrap();

        assert!(!approved);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
