use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Configuration of the relying party API the ceremonies talk to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Versioned API root, WebAuthn endpoints live under `{root}/webauthn`.
    pub root: Url,
}

impl ApiConfig {
    /// Returns the absolute URL of the endpoint at the specified path relative to the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.root.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root: Url::parse("http://localhost:8080/api/v1")
                .expect("Cannot parse API root parameter."),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ApiConfig;
    use url::Url;

    #[test]
    fn builds_endpoints() -> anyhow::Result<()> {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("webauthn/register/begin"),
            "http://localhost:8080/api/v1/webauthn/register/begin"
        );

        let config = ApiConfig {
            root: Url::parse("https://files.example.com/api/v1/")?,
        };
        assert_eq!(
            config.endpoint("/webauthn/login/finish"),
            "https://files.example.com/api/v1/webauthn/login/finish"
        );

        Ok(())
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        let config: ApiConfig = toml::from_str(
            r#"
        root = 'https://files.example.com/api/v2'
    "#,
        )?;
        assert_eq!(
            config,
            ApiConfig {
                root: Url::parse("https://files.example.com/api/v2")?,
            }
        );

        Ok(())
    }
}
