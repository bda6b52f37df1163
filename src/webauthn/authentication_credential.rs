use crate::{codec::Base64Url, platform::PlatformAssertion, webauthn::ClientExtensionResults};
use serde_derive::{Deserialize, Serialize};
use serde_with::serde_as;

/// Result of the credential assertion ceremony in the form the relying party expects on
/// "finish": every binary field is base64url text.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationCredential {
    pub id: String,
    #[serde_as(as = "Base64Url")]
    pub raw_id: Vec<u8>,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub response: AuthenticatorAssertionResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_extension_results: Option<ClientExtensionResults>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorAssertionResponse {
    #[serde_as(as = "Base64Url")]
    pub authenticator_data: Vec<u8>,
    #[serde_as(as = "Base64Url")]
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Vec<u8>,
    #[serde_as(as = "Base64Url")]
    pub signature: Vec<u8>,
    /// Omitted entirely when the authenticator didn't return a user handle.
    #[serde_as(as = "Option<Base64Url>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Vec<u8>>,
}

impl From<PlatformAssertion> for AuthenticationCredential {
    fn from(assertion: PlatformAssertion) -> Self {
        Self {
            id: assertion.id,
            raw_id: assertion.raw_id,
            credential_type: assertion.credential_type,
            response: AuthenticatorAssertionResponse {
                authenticator_data: assertion.authenticator_data,
                client_data_json: assertion.client_data_json,
                signature: assertion.signature,
                user_handle: assertion.user_handle,
            },
            client_extension_results: Some(assertion.client_extension_results)
                .filter(|results| !results.is_empty()),
        }
    }
}
