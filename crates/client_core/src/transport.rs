use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{RegisterRequest, RegisterResponse, REGISTER_ROUTE};
use tracing::debug;
use url::Url;

use crate::error::RegistrationError;

#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, RegistrationError>;
}

/// Posts registration drafts as JSON to `{server_url}/api/auth/register`.
pub struct HttpRegistrationApi {
    http: Client,
    endpoint: Url,
}

impl HttpRegistrationApi {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, RegistrationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RegistrationError::Transport(err.to_string()))?;
        Self::with_client(http, server_url)
            .map_err(|err| RegistrationError::Transport(format!("invalid server url: {err}")))
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(&format!(
            "{}{}",
            server_url.trim().trim_end_matches('/'),
            REGISTER_ROUTE
        ))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, RegistrationError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| RegistrationError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RegistrationError::Transport(err.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "registration response received");

        // The body is decoded before the status is inspected, so a non-JSON
        // page surfaces as a decode error whatever the status. Any valid JSON
        // is accepted.
        let value: Value = serde_json::from_slice(&body)
            .map_err(|err| RegistrationError::Decode(err.to_string()))?;
        let parsed = RegisterResponse::from_value(&value);

        if status.is_success() {
            Ok(parsed)
        } else {
            Err(RegistrationError::Application {
                status: status.as_u16(),
                message: parsed.message,
            })
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
