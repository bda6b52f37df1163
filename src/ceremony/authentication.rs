use crate::{
    api::Api,
    ceremony::{CeremonyKind, CeremonyStage, Navigator},
    error::Error,
    logging::CeremonyLogContext,
    platform::PlatformCredentials,
    webauthn::{
        AuthenticationCredential, FinishRequest, LoginFinishResponse,
        PublicKeyCredentialRequestOptions, RequestId,
    },
};
use serde_json::Value;
use tracing::{error, info};

/// Authentication options received from the relying party, still in their wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticationBegun {
    pub options: Value,
    pub request_id: RequestId,
}

/// Assertion produced by the platform, ready to be submitted to the relying party.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticationInvoked {
    pub credential: AuthenticationCredential,
    pub request_id: RequestId,
}

/// Authentication ceremony: `begin` → `invoke` → `finish`, then navigation if the relying party
/// asks for it.
pub struct AuthenticationCeremony<'a, P: PlatformCredentials, N: Navigator> {
    api: &'a Api,
    platform: &'a P,
    navigator: &'a N,
    log_context: CeremonyLogContext,
}

impl<'a, P: PlatformCredentials, N: Navigator> AuthenticationCeremony<'a, P, N> {
    /// Creates a new authentication ceremony.
    pub fn new(api: &'a Api, platform: &'a P, navigator: &'a N) -> Self {
        Self {
            api,
            platform,
            navigator,
            log_context: CeremonyLogContext::new(CeremonyKind::Authentication),
        }
    }

    /// Runs the whole ceremony and resolves with the relying party's finish response.
    pub async fn run(&self) -> Result<LoginFinishResponse, Error> {
        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Idle,
            "Starting authentication ceremony."
        );

        let begun = self.begin().await?;
        let invoked = self.invoke(begun).await?;
        self.finish(invoked).await
    }

    /// Requests credential request options from the relying party.
    pub async fn begin(&self) -> Result<AuthenticationBegun, Error> {
        let response = self
            .api
            .webauthn()
            .login_begin()
            .await
            .map_err(|err| self.fail(Error::network(err)))?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Begun,
            "Received credential request options."
        );

        Ok(AuthenticationBegun {
            options: response.public_key_credential_request_options,
            request_id: response.request_id,
        })
    }

    /// Decodes the options and asks the platform for an assertion.
    pub async fn invoke(
        &self,
        begun: AuthenticationBegun,
    ) -> Result<AuthenticationInvoked, Error> {
        let options = PublicKeyCredentialRequestOptions::decode(begun.options)
            .map_err(|err| self.fail(Error::network(err)))?;

        let assertion = self.platform.get(&options).await.map_err(|err| {
            self.fail(Error::ceremony(
                anyhow::Error::new(err).context("Platform didn't assert a credential."),
            ))
        })?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::CeremonyInvoked,
            "Platform asserted a credential."
        );

        Ok(AuthenticationInvoked {
            credential: AuthenticationCredential::from(assertion),
            request_id: begun.request_id,
        })
    }

    /// Submits the assertion and navigates if the sign-in succeeded with a redirect location.
    pub async fn finish(
        &self,
        invoked: AuthenticationInvoked,
    ) -> Result<LoginFinishResponse, Error> {
        let request = FinishRequest::new(invoked.request_id, &invoked.credential)
            .map_err(|err| self.fail(Error::from(err)))?;

        let response = self
            .api
            .webauthn()
            .login_finish(&request)
            .await
            .map_err(|err| self.fail(Error::indeterminate(err)))?;

        info!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Finished,
            "Authentication ceremony finished (success: {}).",
            response.success
        );

        if let Some(location) = response.redirect_target() {
            self.navigator.navigate(location);
        }

        Ok(response)
    }

    fn fail(&self, err: Error) -> Error {
        error!(
            ceremony.id = %self.log_context.id,
            ceremony.kind = %self.log_context.kind,
            ceremony.stage = %CeremonyStage::Failed,
            "Authentication ceremony failed ({:?}): {err:?}",
            err.kind()
        );
        err
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ceremony::navigator::tests::MockNavigator,
        codec::encode,
        error::ErrorKind,
        platform::{
            PlatformError, SoftPlatform,
            tests::{MockPlatform, mock_platform_assertion},
        },
        tests::mock_api,
        webauthn::{AuthenticationCredential, LoginFinishResponse, RequestId},
    };
    use httpmock::MockServer;
    use serde_json::{Value, json};

    fn mock_begin_response() -> Value {
        json!({
            "requestId": "req-2",
            "publicKeyCredentialRequestOptions": {
                "challenge": "bG9naW4tY2hhbGxlbmdl",
                "allowCredentials": [{ "type": "public-key", "id": "AQID_w" }],
                "userVerification": "required"
            }
        })
    }

    async fn mock_begin(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/begin");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(mock_begin_response());
            })
            .await;
    }

    #[tokio::test]
    async fn passes_binary_fields_to_platform() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let api = mock_api(&server)?;
        let platform = MockPlatform::new();
        let navigator = MockNavigator::default();
        mock_begin(&server).await;

        let ceremony = api.authentication(&platform, &navigator);
        let begun = ceremony.begin().await?;
        assert_eq!(begun.request_id, RequestId::from("req-2"));

        ceremony.invoke(begun).await?;

        let request_options = platform.request_options.lock().unwrap();
        assert_eq!(request_options.len(), 1);
        assert_eq!(request_options[0].challenge, b"login-challenge");
        assert_eq!(
            request_options[0]
                .allow_credentials
                .as_ref()
                .map(|descriptors| descriptors
                    .iter()
                    .map(|descriptor| descriptor.id.clone())
                    .collect::<Vec<_>>()),
            Some(vec![vec![1, 2, 3, 255]])
        );
        assert_eq!(
            request_options[0].user_verification.as_deref(),
            Some("required")
        );

        Ok(())
    }

    #[tokio::test]
    async fn submits_user_handle_only_when_present() -> anyhow::Result<()> {
        for (user_handle, expected_user_handle) in [
            (Some(b"user-1".to_vec()), Some(json!("dXNlci0x"))),
            (None, None),
        ] {
            let server = MockServer::start_async().await;
            let api = mock_api(&server)?;
            let platform = MockPlatform::new().with_assertion(Ok({
                let mut assertion = mock_platform_assertion();
                assertion.user_handle = user_handle.clone();
                assertion
            }));
            let navigator = MockNavigator::default();
            mock_begin(&server).await;

            let ceremony = api.authentication(&platform, &navigator);
            let invoked = ceremony.invoke(ceremony.begin().await?).await?;

            let credential = serde_json::to_value(&invoked.credential)?;
            assert_eq!(
                credential["response"].get("userHandle").cloned(),
                expected_user_handle
            );
            let credential = serde_json::to_string(&invoked.credential)?;

            let finish_mock = server
                .mock_async(|when, then| {
                    when.method(httpmock::Method::POST)
                        .path("/api/v1/webauthn/login/finish")
                        .form_urlencoded_tuple("requestId", "req-2")
                        .form_urlencoded_tuple("credential", credential);
                    then.status(200)
                        .header("Content-Type", "application/json")
                        .json_body(json!({ "success": true }));
                })
                .await;

            ceremony.finish(invoked).await?;
            finish_mock.assert_async().await;
        }

        Ok(())
    }

    #[tokio::test]
    async fn navigates_only_after_successful_sign_in_with_redirect() -> anyhow::Result<()> {
        for (finish_response, expected_locations) in [
            (
                json!({ "success": true, "redirectUrl": "/home" }),
                vec!["/home".to_string()],
            ),
            (json!({ "success": true }), vec![]),
            (json!({ "success": false }), vec![]),
            (json!({ "success": false, "redirectUrl": "/home" }), vec![]),
        ] {
            let server = MockServer::start_async().await;
            let api = mock_api(&server)?;
            let platform = MockPlatform::new();
            let navigator = MockNavigator::default();
            mock_begin(&server).await;

            let expected_response: LoginFinishResponse =
                serde_json::from_value(finish_response.clone())?;
            server
                .mock_async(|when, then| {
                    when.method(httpmock::Method::POST)
                        .path("/api/v1/webauthn/login/finish");
                    then.status(200)
                        .header("Content-Type", "application/json")
                        .json_body(finish_response);
                })
                .await;

            let response = api.authentication(&platform, &navigator).run().await?;
            assert_eq!(response, expected_response);
            assert_eq!(*navigator.locations.lock().unwrap(), expected_locations);
        }

        Ok(())
    }

    #[tokio::test]
    async fn does_not_finish_rejected_ceremony() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let api = mock_api(&server)?;
        let platform = MockPlatform::new().with_assertion(Err(PlatformError::Security));
        let navigator = MockNavigator::default();
        mock_begin(&server).await;

        let finish_mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/finish");
                then.status(200)
                    .json_body(json!({ "success": true, "redirectUrl": "/home" }));
            })
            .await;

        let err = api
            .authentication(&platform, &navigator)
            .run()
            .await
            .unwrap_err();
        finish_mock.assert_calls_async(0).await;

        assert_eq!(err.kind(), ErrorKind::Ceremony);
        assert_eq!(
            err.root_cause().downcast_ref::<PlatformError>(),
            Some(&PlatformError::Security)
        );
        assert!(navigator.locations.lock().unwrap().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn fails_with_indeterminate_error_on_finish() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let api = mock_api(&server)?;
        let platform = MockPlatform::new();
        let navigator = MockNavigator::default();
        mock_begin(&server).await;

        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/finish");
                then.status(503);
            })
            .await;

        let err = api
            .authentication(&platform, &navigator)
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Indeterminate);
        assert!(err.is_network());
        assert!(navigator.locations.lock().unwrap().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn fails_with_network_error_on_begin() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let api = mock_api(&server)?;
        let platform = MockPlatform::new();
        let navigator = MockNavigator::default();

        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/begin");
                then.status(403).body("Forbidden");
            })
            .await;

        let err = api
            .authentication(&platform, &navigator)
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(platform.request_options.lock().unwrap().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn registers_and_signs_in_with_soft_platform() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let api = mock_api(&server)?;
        let platform = SoftPlatform::from_config(&api.config)?;
        let navigator = MockNavigator::default();
        assert_eq!(platform.origin().as_str(), format!("{}/", server.base_url()));

        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/register/begin");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "requestId": "req-1",
                        "publicKeyCredentialCreationOptions": {
                            "rp": { "name": "Files" },
                            "user": { "id": "dXNlci0x", "name": "jane", "displayName": "Jane" },
                            "challenge": "cmVnaXN0cmF0aW9uLWNoYWxsZW5nZQ",
                            "pubKeyCredParams": [{ "type": "public-key", "alg": -7 }]
                        }
                    }));
            })
            .await;
        let register_finish_mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/register/finish")
                    .form_urlencoded_tuple("requestId", "req-1");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({}));
            })
            .await;

        let registration = api.registration(&platform);
        let registered = registration.invoke(registration.begin().await?).await?;
        let credential_id = registered.credential.id.clone();
        assert_eq!(credential_id, encode(&registered.credential.raw_id));
        registration.finish(registered).await?;
        register_finish_mock.assert_async().await;

        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/begin");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "requestId": "req-2",
                        "publicKeyCredentialRequestOptions": {
                            "challenge": "bG9naW4tY2hhbGxlbmdl",
                            "allowCredentials": [{ "type": "public-key", "id": credential_id }]
                        }
                    }));
            })
            .await;
        let login_finish_mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/api/v1/webauthn/login/finish")
                    .form_urlencoded_tuple("requestId", "req-2");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({ "success": true, "redirectUrl": "/files" }));
            })
            .await;

        let authentication = api.authentication(&platform, &navigator);
        let asserted = authentication
            .invoke(authentication.begin().await?)
            .await?;
        let AuthenticationCredential { id, response, .. } = asserted.credential.clone();
        assert_eq!(id, credential_id);
        assert_eq!(response.user_handle, Some(b"user-1".to_vec()));

        let finish_response = authentication.finish(asserted).await?;
        login_finish_mock.assert_async().await;

        assert!(finish_response.success);
        assert_eq!(*navigator.locations.lock().unwrap(), vec!["/files".to_string()]);

        Ok(())
    }
}
