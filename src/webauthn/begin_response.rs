use crate::webauthn::RequestId;
use serde_derive::Deserialize;
use serde_json::Value;

/// Response of the registration "begin" call. Options stay in their wire form until the
/// ceremony decodes them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationBeginResponse {
    pub public_key_credential_creation_options: Value,
    pub request_id: RequestId,
}

/// Response of the authentication "begin" call.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginBeginResponse {
    pub public_key_credential_request_options: Value,
    pub request_id: RequestId,
}
