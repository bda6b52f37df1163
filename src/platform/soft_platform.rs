use crate::{
    codec::{Base64Url, encode},
    config::Config,
    platform::{PlatformAssertion, PlatformCredentials, PlatformError, PlatformRegistration},
    webauthn::{
        ClientExtensionResults, PUBLIC_KEY_CREDENTIAL_TYPE, PublicKeyCredentialCreationOptions,
        PublicKeyCredentialDescriptor, PublicKeyCredentialRequestOptions,
    },
};
use anyhow::{Context, anyhow};
use ciborium::Value as CborValue;
use futures::future::BoxFuture;
use p256::ecdsa::{Signature, SigningKey, signature::Signer};
use serde_derive::{Deserialize, Serialize};
use serde_json::json;
use serde_with::serde_as;
use sha2::{Digest, Sha256};
use std::{
    fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};
use tracing::debug;
use url::Url;

/// COSE algorithm identifier of ES256 (ECDSA w/ SHA-256 on P-256).
const COSE_ALGORITHM_ES256: i64 = -7;

/// Authenticator data flags.
const FLAG_USER_PRESENT: u8 = 0x01;
const FLAG_USER_VERIFIED: u8 = 0x04;
const FLAG_ATTESTED_CREDENTIAL_DATA: u8 = 0x40;

/// Length of the randomly generated credential ids.
const CREDENTIAL_ID_LENGTH: usize = 32;

/// Software platform authenticator used where no real platform credential API exists. It
/// produces ES256 credentials with `none` attestation.
pub struct SoftPlatform {
    origin: Url,
    user_verification: bool,
    credentials_path: Option<PathBuf>,
    credentials: Mutex<Vec<SoftCredential>>,
}

/// Credential as stored by the software authenticator.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SoftCredential {
    #[serde_as(as = "Base64Url")]
    id: Vec<u8>,
    rp_id: String,
    #[serde_as(as = "Base64Url")]
    user_handle: Vec<u8>,
    #[serde_as(as = "Base64Url")]
    private_key: Vec<u8>,
    sign_count: u32,
}

impl SoftPlatform {
    /// Creates a software authenticator, loading previously persisted credentials if the file
    /// at `credentials_path` exists.
    pub fn open(
        origin: Url,
        user_verification: bool,
        credentials_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let credentials = match credentials_path {
            Some(ref path) if path.exists() => {
                let content = fs::read(path)
                    .with_context(|| format!("Cannot read credentials file ({path:?})."))?;
                serde_json::from_slice(&content)
                    .with_context(|| format!("Cannot parse credentials file ({path:?})."))?
            }
            _ => vec![],
        };

        Ok(Self {
            origin,
            user_verification,
            credentials_path,
            credentials: Mutex::new(credentials),
        })
    }

    /// Creates a software authenticator for the origin of the configured API root unless the
    /// origin is configured explicitly.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let origin = match config.authenticator.origin {
            Some(ref origin) => origin.clone(),
            None => Url::parse(&config.api.root.origin().ascii_serialization())
                .context("API root doesn't have a valid origin.")?,
        };

        Self::open(
            origin,
            config.authenticator.user_verification,
            config.authenticator.credentials_path.clone(),
        )
    }

    /// Origin the authenticator reports in the client data.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn create_credential(
        &self,
        options: &PublicKeyCredentialCreationOptions,
    ) -> Result<PlatformRegistration, PlatformError> {
        let supports_es256 = options.pub_key_cred_params.iter().any(|params| {
            params.credential_type == PUBLIC_KEY_CREDENTIAL_TYPE
                && params.alg == COSE_ALGORITHM_ES256
        });
        if !supports_es256 {
            return Err(PlatformError::NotSupported(
                "none of the requested public key algorithms".to_string(),
            ));
        }

        let rp_id = self.resolve_rp_id(options.rp.id.as_deref())?;
        let user_verification = options
            .authenticator_selection
            .as_ref()
            .and_then(|selection| selection.user_verification.as_deref());
        self.ensure_user_verification(user_verification)?;

        let mut credentials = self.lock_credentials()?;
        let excluded = options.exclude_credentials.as_deref().unwrap_or_default();
        if credentials
            .iter()
            .any(|credential| credential.rp_id == rp_id && is_listed(excluded, &credential.id))
        {
            return Err(PlatformError::InvalidState);
        }

        let signing_key = generate_signing_key()?;
        let credential_id = random_bytes::<CREDENTIAL_ID_LENGTH>()?.to_vec();

        let mut auth_data = self.authenticator_data(&rp_id, FLAG_ATTESTED_CREDENTIAL_DATA, 0);
        // AAGUID, software authenticator doesn't have one.
        auth_data.extend_from_slice(&[0u8; 16]);
        auth_data.extend_from_slice(&(credential_id.len() as u16).to_be_bytes());
        auth_data.extend_from_slice(&credential_id);
        auth_data.extend_from_slice(&cose_public_key(&signing_key)?);

        let attestation_object = to_cbor(&CborValue::Map(vec![
            (
                CborValue::Text("fmt".to_string()),
                CborValue::Text("none".to_string()),
            ),
            (CborValue::Text("attStmt".to_string()), CborValue::Map(vec![])),
            (CborValue::Text("authData".to_string()), CborValue::Bytes(auth_data)),
        ]))?;

        let mut client_extension_results = ClientExtensionResults::new();
        let requests_cred_props = options
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("credProps"))
            .and_then(|cred_props| cred_props.as_bool())
            .unwrap_or_default();
        if requests_cred_props {
            client_extension_results.insert("credProps".to_string(), json!({ "rk": true }));
        }

        let mut updated_credentials = credentials.clone();
        updated_credentials.push(SoftCredential {
            id: credential_id.clone(),
            rp_id,
            user_handle: options.user.id.clone(),
            private_key: signing_key.to_bytes().to_vec(),
            sign_count: 0,
        });
        self.persist(&updated_credentials)?;
        *credentials = updated_credentials;

        debug!(
            credential.id = %encode(&credential_id),
            "Created software authenticator credential."
        );

        Ok(PlatformRegistration {
            id: encode(&credential_id),
            raw_id: credential_id,
            credential_type: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
            attestation_object,
            client_data_json: self.client_data("webauthn.create", &options.challenge)?,
            transports: Some(vec!["internal".to_string()]),
            client_extension_results,
        })
    }

    fn assert_credential(
        &self,
        options: &PublicKeyCredentialRequestOptions,
    ) -> Result<PlatformAssertion, PlatformError> {
        let rp_id = self.resolve_rp_id(options.rp_id.as_deref())?;
        self.ensure_user_verification(options.user_verification.as_deref())?;

        let mut credentials = self.lock_credentials()?;
        let allowed = options.allow_credentials.as_deref().unwrap_or_default();
        let credential_index = credentials
            .iter()
            .position(|credential| {
                credential.rp_id == rp_id
                    && (allowed.is_empty() || is_listed(allowed, &credential.id))
            })
            .ok_or(PlatformError::NotAllowed)?;

        // The counter only moves once the store is written.
        let mut updated_credentials = credentials.clone();
        let credential = &mut updated_credentials[credential_index];
        credential.sign_count = credential.sign_count.wrapping_add(1);
        let credential = credential.clone();

        let auth_data = self.authenticator_data(&rp_id, 0, credential.sign_count);
        let client_data_json = self.client_data("webauthn.get", &options.challenge)?;

        let signing_key = SigningKey::from_slice(&credential.private_key)
            .map_err(|err| PlatformError::Unknown(format!("Invalid credential key: {err}")))?;
        let mut signed_data = auth_data.clone();
        signed_data.extend_from_slice(&Sha256::digest(&client_data_json));
        let signature: Signature = signing_key.sign(&signed_data);

        let assertion = PlatformAssertion {
            id: encode(&credential.id),
            raw_id: credential.id.clone(),
            credential_type: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
            authenticator_data: auth_data,
            client_data_json,
            signature: signature.to_der().as_bytes().to_vec(),
            user_handle: Some(credential.user_handle.clone()),
            client_extension_results: ClientExtensionResults::new(),
        };
        self.persist(&updated_credentials)?;
        *credentials = updated_credentials;

        Ok(assertion)
    }

    /// Falls back to the origin host if the relying party didn't specify its id, and makes sure
    /// the id is a registrable suffix of the origin host otherwise.
    fn resolve_rp_id(&self, rp_id: Option<&str>) -> Result<String, PlatformError> {
        let host = self.origin.host_str().ok_or(PlatformError::Security)?;
        match rp_id {
            None => Ok(host.to_string()),
            Some(rp_id) if host == rp_id || host.ends_with(&format!(".{rp_id}")) => {
                Ok(rp_id.to_string())
            }
            Some(_) => Err(PlatformError::Security),
        }
    }

    fn ensure_user_verification(&self, requirement: Option<&str>) -> Result<(), PlatformError> {
        if requirement == Some("required") && !self.user_verification {
            return Err(PlatformError::NotAllowed);
        }

        Ok(())
    }

    /// Builds authenticator data without attested credential data: rpIdHash, flags and the
    /// signature counter.
    fn authenticator_data(&self, rp_id: &str, extra_flags: u8, sign_count: u32) -> Vec<u8> {
        let mut flags = FLAG_USER_PRESENT | extra_flags;
        if self.user_verification {
            flags |= FLAG_USER_VERIFIED;
        }

        let mut auth_data = Sha256::digest(rp_id.as_bytes()).to_vec();
        auth_data.push(flags);
        auth_data.extend_from_slice(&sign_count.to_be_bytes());
        auth_data
    }

    fn client_data(&self, ceremony_type: &str, challenge: &[u8]) -> Result<Vec<u8>, PlatformError> {
        serde_json::to_vec(&json!({
            "type": ceremony_type,
            "challenge": encode(challenge),
            "origin": self.origin.origin().ascii_serialization(),
            "crossOrigin": false
        }))
        .map_err(|err| PlatformError::Unknown(format!("Cannot serialize client data: {err}")))
    }

    fn lock_credentials(&self) -> Result<MutexGuard<'_, Vec<SoftCredential>>, PlatformError> {
        self.credentials
            .lock()
            .map_err(|_| PlatformError::Unknown("Credential store is poisoned.".to_string()))
    }

    fn persist(&self, credentials: &[SoftCredential]) -> Result<(), PlatformError> {
        let Some(ref path) = self.credentials_path else {
            return Ok(());
        };

        serde_json::to_vec_pretty(credentials)
            .map_err(|err| anyhow!(err))
            .and_then(|content| {
                fs::write(path, content)
                    .with_context(|| format!("Cannot write credentials file ({path:?})."))
            })
            .map_err(|err| PlatformError::Unknown(format!("{err:#}")))
    }
}

impl PlatformCredentials for SoftPlatform {
    fn is_user_verifying_platform_authenticator_available(
        &self,
    ) -> BoxFuture<'_, Result<bool, PlatformError>> {
        Box::pin(futures::future::ready(Ok(self.user_verification)))
    }

    fn create<'a>(
        &'a self,
        options: &'a PublicKeyCredentialCreationOptions,
    ) -> BoxFuture<'a, Result<PlatformRegistration, PlatformError>> {
        Box::pin(async move { self.create_credential(options) })
    }

    fn get<'a>(
        &'a self,
        options: &'a PublicKeyCredentialRequestOptions,
    ) -> BoxFuture<'a, Result<PlatformAssertion, PlatformError>> {
        Box::pin(async move { self.assert_credential(options) })
    }
}

fn is_listed(descriptors: &[PublicKeyCredentialDescriptor], id: &[u8]) -> bool {
    descriptors.iter().any(|descriptor| descriptor.id == id)
}

fn random_bytes<const N: usize>() -> Result<[u8; N], PlatformError> {
    let mut bytes = [0u8; N];
    getrandom::fill(&mut bytes)
        .map_err(|err| PlatformError::Unknown(format!("Cannot generate random bytes: {err}")))?;
    Ok(bytes)
}

fn generate_signing_key() -> Result<SigningKey, PlatformError> {
    SigningKey::from_slice(&random_bytes::<32>()?)
        .map_err(|err| PlatformError::Unknown(format!("Cannot generate credential key: {err}")))
}

/// Encodes the public key as COSE EC2 key: `{1: 2, 3: -7, -1: 1, -2: x, -3: y}`.
fn cose_public_key(signing_key: &SigningKey) -> Result<Vec<u8>, PlatformError> {
    let point = signing_key.verifying_key().to_encoded_point(false);
    let point = point.as_bytes();

    to_cbor(&CborValue::Map(vec![
        (CborValue::Integer(1.into()), CborValue::Integer(2.into())),
        (
            CborValue::Integer(3.into()),
            CborValue::Integer(COSE_ALGORITHM_ES256.into()),
        ),
        (CborValue::Integer((-1).into()), CborValue::Integer(1.into())),
        (
            CborValue::Integer((-2).into()),
            CborValue::Bytes(point[1..33].to_vec()),
        ),
        (
            CborValue::Integer((-3).into()),
            CborValue::Bytes(point[33..65].to_vec()),
        ),
    ]))
}

fn to_cbor(value: &CborValue) -> Result<Vec<u8>, PlatformError> {
    let mut bytes = vec![];
    ciborium::into_writer(value, &mut bytes)
        .map_err(|err| PlatformError::Unknown(format!("Cannot encode CBOR: {err}")))?;
    Ok(bytes)
}
