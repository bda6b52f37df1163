mod api_config;
mod authenticator_config;
mod http_config;
mod raw_config;

pub use self::{
    api_config::ApiConfig,
    authenticator_config::AuthenticatorConfig,
    http_config::{HttpClientConfig, HttpConfig},
    raw_config::RawConfig,
};

/// Main ceremony client config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Version of the binary.
    pub version: String,
    /// Configuration of the relying party API.
    pub api: ApiConfig,
    /// Configuration for the HTTP functionality.
    pub http: HttpConfig,
    /// Configuration for the bundled software authenticator.
    pub authenticator: AuthenticatorConfig,
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api: raw_config.api,
            http: raw_config.http,
            authenticator: raw_config.authenticator,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, RawConfig};

    #[test]
    fn conversion_from_raw_config() {
        let raw_config = RawConfig::default();
        let config = Config::from(raw_config.clone());

        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.api, raw_config.api);
        assert_eq!(config.http, raw_config.http);
        assert_eq!(config.authenticator, raw_config.authenticator);
    }
}
