use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration for the bundled software platform authenticator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuthenticatorConfig {
    /// Origin reported in the client data. Defaults to the origin of the API root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Url>,
    /// Whether the authenticator reports itself as capable of user verification.
    #[serde(default = "default_user_verification")]
    pub user_verification: bool,
    /// Path to the JSON file credentials are persisted to. Credentials are kept in memory only
    /// if not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            origin: None,
            user_verification: default_user_verification(),
            credentials_path: None,
        }
    }
}

const fn default_user_verification() -> bool {
    true
}
