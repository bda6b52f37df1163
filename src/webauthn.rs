mod authentication_credential;
mod begin_response;
mod finish_request;
mod login_finish_response;
mod public_key_credential_creation_options;
mod public_key_credential_descriptor;
mod public_key_credential_request_options;
mod registration_credential;
mod request_id;
mod user_entity;

pub use self::{
    authentication_credential::AuthenticationCredential,
    begin_response::{LoginBeginResponse, RegistrationBeginResponse},
    finish_request::FinishRequest,
    login_finish_response::LoginFinishResponse,
    public_key_credential_creation_options::PublicKeyCredentialCreationOptions,
    public_key_credential_descriptor::PublicKeyCredentialDescriptor,
    public_key_credential_request_options::PublicKeyCredentialRequestOptions,
    registration_credential::RegistrationCredential,
    request_id::RequestId,
    user_entity::UserEntity,
};

/// Client extension outputs returned by the platform, forwarded to the relying party untouched.
pub type ClientExtensionResults = serde_json::Map<String, serde_json::Value>;

/// The only credential type WebAuthn defines.
pub const PUBLIC_KEY_CREDENTIAL_TYPE: &str = "public-key";
