use crate::config::{ApiConfig, HttpClientConfig};
use anyhow::Context;
use reqwest::cookie::Jar;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::sync::Arc;

/// Network utilities.
#[derive(Clone)]
pub struct Network {
    pub http_client: ClientWithMiddleware,
}

impl Network {
    /// Creates a new `Network` instance.
    pub fn new(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }

    /// Creates a `Network` instance with the HTTP client configured to talk to the specified API.
    pub fn create(
        api_config: &ApiConfig,
        client_config: &HttpClientConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(create_http_client(api_config, client_config)?))
    }
}

/// Builds HTTP client wrapped with the tracing middleware. Requests are never retried.
fn create_http_client(
    api_config: &ApiConfig,
    client_config: &HttpClientConfig,
) -> anyhow::Result<ClientWithMiddleware> {
    let jar = Jar::default();
    if let Some(ref session_cookie) = client_config.session_cookie {
        jar.add_cookie_str(session_cookie, &api_config.root);
    }

    let mut builder = reqwest::Client::builder()
        .pool_idle_timeout(client_config.pool_idle_timeout)
        .connection_verbose(client_config.verbose)
        .cookie_provider(Arc::new(jar));
    if let Some(timeout) = client_config.timeout {
        builder = builder.timeout(timeout);
    }

    let client = builder.build().context("Cannot build HTTP client.")?;
    Ok(ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .build())
}
