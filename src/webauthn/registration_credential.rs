use crate::{
    codec::Base64Url, platform::PlatformRegistration, webauthn::ClientExtensionResults,
};
use serde_derive::{Deserialize, Serialize};
use serde_with::serde_as;

/// Result of the credential creation ceremony in the form the relying party expects on
/// "finish": every binary field is base64url text.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCredential {
    pub id: String,
    #[serde_as(as = "Base64Url")]
    pub raw_id: Vec<u8>,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub response: AuthenticatorAttestationResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_extension_results: Option<ClientExtensionResults>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorAttestationResponse {
    #[serde_as(as = "Base64Url")]
    pub attestation_object: Vec<u8>,
    #[serde_as(as = "Base64Url")]
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

impl From<PlatformRegistration> for RegistrationCredential {
    fn from(registration: PlatformRegistration) -> Self {
        Self {
            id: registration.id,
            raw_id: registration.raw_id,
            credential_type: registration.credential_type,
            response: AuthenticatorAttestationResponse {
                attestation_object: registration.attestation_object,
                client_data_json: registration.client_data_json,
                transports: registration.transports,
            },
            client_extension_results: Some(registration.client_extension_results)
                .filter(|results| !results.is_empty()),
        }
    }
}
