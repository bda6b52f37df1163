use crate::codec::Base64Url;
use serde_derive::{Deserialize, Serialize};
use serde_with::serde_as;

/// Identifies a credential in exclude- and allow-lists.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialDescriptor {
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Credential id, binary.
    #[serde_as(as = "Base64Url")]
    pub id: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}
