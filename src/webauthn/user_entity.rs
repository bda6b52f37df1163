use crate::codec::Base64Url;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::serde_as;

/// User account the new credential is created for.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// User handle, binary.
    #[serde_as(as = "Base64Url")]
    pub id: Vec<u8>,
    pub name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
