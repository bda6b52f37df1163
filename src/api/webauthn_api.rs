use crate::{
    api::Api,
    webauthn::{FinishRequest, LoginBeginResponse, LoginFinishResponse, RegistrationBeginResponse},
};
use anyhow::{Context, bail};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// API to work with the relying party WebAuthn endpoints.
pub struct WebAuthnApi<'a> {
    api: &'a Api,
}

impl<'a> WebAuthnApi<'a> {
    /// Creates WebAuthn API.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Requests credential creation options for a new registration.
    pub async fn register_begin(&self) -> anyhow::Result<RegistrationBeginResponse> {
        self.begin("webauthn/register/begin").await
    }

    /// Submits the created credential, the response is opaque to the client.
    pub async fn register_finish(&self, request: &FinishRequest) -> anyhow::Result<Value> {
        self.finish("webauthn/register/finish", request).await
    }

    /// Requests credential request options for a new sign-in.
    pub async fn login_begin(&self) -> anyhow::Result<LoginBeginResponse> {
        self.begin("webauthn/login/begin").await
    }

    /// Submits the assertion.
    pub async fn login_finish(
        &self,
        request: &FinishRequest,
    ) -> anyhow::Result<LoginFinishResponse> {
        self.finish("webauthn/login/finish", request).await
    }

    async fn begin<R: DeserializeOwned>(&self, path: &str) -> anyhow::Result<R> {
        let endpoint = self.api.config.api.endpoint(path);
        let response = self
            .api
            .network
            .http_client
            .post(&endpoint)
            .send()
            .await
            .with_context(|| format!("Cannot begin ceremony ({endpoint})."))?;

        Self::read_response(response, &endpoint).await
    }

    async fn finish<R: DeserializeOwned>(
        &self,
        path: &str,
        request: &FinishRequest,
    ) -> anyhow::Result<R> {
        let endpoint = self.api.config.api.endpoint(path);
        let response = self
            .api
            .network
            .http_client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request.to_form_body())
            .send()
            .await
            .with_context(|| format!("Cannot finish ceremony ({endpoint})."))?;

        Self::read_response(response, &endpoint).await
    }

    async fn read_response<R: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> anyhow::Result<R> {
        let status_code = response.status();
        if status_code.is_success() {
            return response
                .json()
                .await
                .with_context(|| format!("Cannot deserialize response ({endpoint})."));
        }

        bail!(
            "Request failed with status {status_code} ({endpoint}): {}",
            response.text().await.unwrap_or_default()
        )
    }
}
