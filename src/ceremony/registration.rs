use crate::{
    api::Api,
    ceremony::{CeremonyKind, CeremonyStage},
    error::Error,
    logging::CeremonyLogContext,
    platform::PlatformCredentials,
    webauthn::{
        FinishRequest, PublicKeyCredentialCreationOptions, RegistrationCredential, RequestId,
    },
};
use serde_json::Value;
use tracing::{error, info};

/// Registration options received from the relying party, still in their wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationBegun {
    pub options: Value,
    pub request_id: RequestId,
}

/// Credential created by the platform, ready to be submitted to the relying party.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationInvoked {
    pub credential: RegistrationCredential,
    pub request_id: RequestId,
}

/// Registration ceremony: `begin` → `invoke` → `finish`. Every transition consumes the state
/// produced by the previous one, a failed transition ends the ceremony.
pub struct RegistrationCeremony<'a, P: PlatformCredentials> {
    api: &'a Api,
    platform: &'a P,
    log_context: CeremonyLogContext,
}

impl<'a, P: PlatformCredentials> RegistrationCeremony<'a, P> {
    /// Creates a new registration ceremony.
    pub fn new(api: &'a Api, platform: &'a P) -> Self {
        Self {
            api,
            platform,
            log_context: CeremonyLogContext::new(CeremonyKind::Registration),
        }
    }

    /// Runs the whole ceremony and resolves with the relying party's finish response.
    pub async fn run(&self) -> Result<Value, Error> {
        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Idle,
            "Starting registration ceremony."
        );

        let begun = self.begin().await?;
        let invoked = self.invoke(begun).await?;
        self.finish(invoked).await
    }

    /// Requests credential creation options from the relying party.
    pub async fn begin(&self) -> Result<RegistrationBegun, Error> {
        let response = self
            .api
            .webauthn()
            .register_begin()
            .await
            .map_err(|err| self.fail(Error::network(err)))?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Begun,
            "Received credential creation options."
        );

        Ok(RegistrationBegun {
            options: response.public_key_credential_creation_options,
            request_id: response.request_id,
        })
    }

    /// Decodes the options and asks the platform to create a credential.
    pub async fn invoke(&self, begun: RegistrationBegun) -> Result<RegistrationInvoked, Error> {
        let options = PublicKeyCredentialCreationOptions::decode(begun.options)
            .map_err(|err| self.fail(Error::network(err)))?;

        let registration = self.platform.create(&options).await.map_err(|err| {
            self.fail(Error::ceremony(
                anyhow::Error::new(err).context("Platform didn't create a credential."),
            ))
        })?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::CeremonyInvoked,
            "Platform created a credential."
        );

        Ok(RegistrationInvoked {
            credential: RegistrationCredential::from(registration),
            request_id: begun.request_id,
        })
    }

    /// Submits the created credential. A failure here leaves the registration outcome unknown:
    /// the relying party may have stored the credential already.
    pub async fn finish(&self, invoked: RegistrationInvoked) -> Result<Value, Error> {
        let request = FinishRequest::new(invoked.request_id, &invoked.credential)
            .map_err(|err| self.fail(Error::from(err)))?;

        let response = self
            .api
            .webauthn()
            .register_finish(&request)
            .await
            .map_err(|err| self.fail(Error::indeterminate(err)))?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Finished,
            "Registration ceremony finished."
        );

        Ok(response)
    }

    fn fail(&self, err: Error) -> Error {
        error!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Failed,
            "Registration ceremony failed ({:?}): {err:?}",
            err.kind()
        );
        err
    }
}
