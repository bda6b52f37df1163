mod webauthn_api;

pub use self::webauthn_api::WebAuthnApi;
use crate::{config::Config, network::Network};

/// Collection of the relying party APIs the ceremonies talk to.
#[derive(Clone)]
pub struct Api {
    pub config: Config,
    pub network: Network,
}

impl Api {
    /// Instantiates APIs collection with the specified config and network.
    pub fn new(config: Config, network: Network) -> Self {
        Self { config, network }
    }

    /// Returns an API to work with the WebAuthn endpoints.
    pub fn webauthn(&self) -> WebAuthnApi<'_> {
        WebAuthnApi::new(self)
    }
}
