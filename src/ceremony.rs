mod authentication;
mod ceremony_kind;
mod ceremony_stage;
mod navigator;
mod registration;

pub use self::{
    authentication::AuthenticationCeremony,
    ceremony_kind::CeremonyKind,
    ceremony_stage::CeremonyStage,
    navigator::{Navigator, TerminalNavigator},
    registration::RegistrationCeremony,
};
use crate::{api::Api, platform::PlatformCredentials};

impl Api {
    /// Returns a new registration ceremony backed by the specified platform.
    pub fn registration<'a, P: PlatformCredentials>(
        &'a self,
        platform: &'a P,
    ) -> RegistrationCeremony<'a, P> {
        RegistrationCeremony::new(self, platform)
    }

    /// Returns a new authentication ceremony backed by the specified platform and navigator.
    pub fn authentication<'a, P: PlatformCredentials, N: Navigator>(
        &'a self,
        platform: &'a P,
        navigator: &'a N,
    ) -> AuthenticationCeremony<'a, P, N> {
        AuthenticationCeremony::new(self, platform, navigator)
    }
}
