//! Google ID token verification via the tokeninfo endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::AuthUser;
use crate::domain::gateways::AuthVerifier;
use crate::error::AppError;

/// Verifies Google ID tokens by asking the tokeninfo endpoint.
///
/// The endpoint validates the signature; this client additionally checks
/// the audience and expiry before trusting the claims.
pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
}

impl GoogleTokenVerifier {
    pub fn new(http: reqwest::Client, endpoint: String, client_id: String) -> Self {
        Self {
            http,
            endpoint,
            client_id,
        }
    }
}

#[derive(Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    exp: String,
}

#[async_trait]
impl AuthVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("tokeninfo request failed: {e}");
                AppError::unauthorized("Token verification failed", json!({}))
            })?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized("Invalid ID token", json!({})));
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            tracing::error!("tokeninfo payload unreadable: {e}");
            AppError::unauthorized("Token verification failed", json!({}))
        })?;

        if info.aud != self.client_id {
            return Err(AppError::unauthorized(
                "Token issued for a different client",
                json!({}),
            ));
        }

        let exp: i64 = info
            .exp
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid ID token", json!({})))?;
        if exp <= chrono::Utc::now().timestamp() {
            return Err(AppError::unauthorized("Token has expired", json!({})));
        }

        Ok(AuthUser {
            id: info.sub,
            email: info.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier(server: &MockServer) -> GoogleTokenVerifier {
        GoogleTokenVerifier::new(
            reqwest::Client::new(),
            format!("{}/oauth2/v3/tokeninfo", server.uri()),
            "client-id.apps.googleusercontent.com".to_string(),
        )
    }

    fn token_body(aud: &str, exp: i64) -> serde_json::Value {
        json!({
            "aud": aud,
            "sub": "sub-123",
            "email": "user@example.com",
            "email_verified": "true",
            "exp": exp.to_string(),
        })
    }

    #[tokio::test]
    async fn valid_token_yields_identity() {
        let server = MockServer::start().await;
        let exp = chrono::Utc::now().timestamp() + 600;
        Mock::given(method("GET"))
            .and(query_param("id_token", "good-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("client-id.apps.googleusercontent.com", exp)),
            )
            .mount(&server)
            .await;

        let user = verifier(&server).verify("good-token").await.unwrap();

        assert_eq!(user.id, "sub-123");
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let result = verifier(&server).verify("bad-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn wrong_audience_is_unauthorized() {
        let server = MockServer::start().await;
        let exp = chrono::Utc::now().timestamp() + 600;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(token_body("someone-else.apps", exp)),
            )
            .mount(&server)
            .await;

        let result = verifier(&server).verify("stolen-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let server = MockServer::start().await;
        let exp = chrono::Utc::now().timestamp() - 60;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("client-id.apps.googleusercontent.com", exp)),
            )
            .mount(&server)
            .await;

        let result = verifier(&server).verify("old-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }
}
