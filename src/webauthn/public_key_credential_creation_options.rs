use crate::{
    codec::Base64Url,
    webauthn::{PublicKeyCredentialDescriptor, UserEntity},
};
use anyhow::Context;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::serde_as;

/// Options of the credential creation ceremony with every binary field decoded. Fields the
/// ceremony doesn't know about are kept in `extra` and passed to the platform as is.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptions {
    pub rp: RelyingPartyEntity,
    pub user: UserEntity,
    #[serde_as(as = "Base64Url")]
    pub challenge: Vec<u8>,
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PublicKeyCredentialCreationOptions {
    /// Decodes options received from the relying party: the challenge, the user id and the id
    /// of every excluded credential are converted from base64url text to binary.
    pub fn decode(options: Value) -> anyhow::Result<Self> {
        serde_json::from_value(options)
            .context("Cannot decode public key credential creation options.")
    }
}

/// Relying party the credential is scoped to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelyingPartyEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Public key algorithm the relying party accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type")]
    pub credential_type: String,
    /// COSE algorithm identifier, e.g. `-7` for ES256.
    pub alg: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelectionCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_resident_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<String>,
}
