mod platform_error;
mod soft_platform;

use crate::webauthn::{
    ClientExtensionResults, PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};
use futures::future::BoxFuture;
use tracing::warn;

pub use self::{platform_error::PlatformError, soft_platform::SoftPlatform};

/// Trait describing a facade for the platform credential API (`navigator.credentials` in
/// browsers). Both ceremonies may suspend for as long as the user interaction takes.
pub trait PlatformCredentials: Sync + Send + 'static {
    /// Checks whether a user-verifying platform authenticator is available.
    fn is_user_verifying_platform_authenticator_available(
        &self,
    ) -> BoxFuture<'_, Result<bool, PlatformError>>;

    /// Runs the credential creation ceremony.
    fn create<'a>(
        &'a self,
        options: &'a PublicKeyCredentialCreationOptions,
    ) -> BoxFuture<'a, Result<PlatformRegistration, PlatformError>>;

    /// Runs the credential assertion ceremony.
    fn get<'a>(
        &'a self,
        options: &'a PublicKeyCredentialRequestOptions,
    ) -> BoxFuture<'a, Result<PlatformAssertion, PlatformError>>;
}

/// Credential produced by the platform during registration, binary fields as is.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRegistration {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub credential_type: String,
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
    /// Present only if the platform exposes the transports the authenticator supports.
    pub transports: Option<Vec<String>>,
    pub client_extension_results: ClientExtensionResults,
}

/// Assertion produced by the platform during authentication, binary fields as is.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformAssertion {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub credential_type: String,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
    pub client_extension_results: ClientExtensionResults,
}

/// Checks whether ceremonies can be offered at all. Missing platform API and a failing
/// capability check both resolve to `false`, absence of the capability isn't an error.
pub async fn probe_availability<P: PlatformCredentials>(platform: Option<&P>) -> bool {
    let Some(platform) = platform else {
        return false;
    };

    match platform
        .is_user_verifying_platform_authenticator_available()
        .await
    {
        Ok(available) => available,
        Err(err) => {
            warn!("Cannot check platform authenticator availability: {err}");
            false
        }
    }
}
