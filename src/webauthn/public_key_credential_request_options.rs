use crate::{codec::Base64Url, webauthn::PublicKeyCredentialDescriptor};
use anyhow::Context;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::serde_as;

/// Options of the credential assertion ceremony with every binary field decoded. Unlike the
/// creation options, these carry an allow-list and no user.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptions {
    #[serde_as(as = "Base64Url")]
    pub challenge: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PublicKeyCredentialRequestOptions {
    /// Decodes options received from the relying party: the challenge and the id of every
    /// allowed credential are converted from base64url text to binary.
    pub fn decode(options: Value) -> anyhow::Result<Self> {
        serde_json::from_value(options)
            .context("Cannot decode public key credential request options.")
    }
}
