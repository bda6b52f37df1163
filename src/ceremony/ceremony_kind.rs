use serde_derive::Serialize;
use std::fmt::{Display, Formatter};

/// Kind of the WebAuthn ceremony.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CeremonyKind {
    /// Creates a new credential (`navigator.credentials.create`).
    Registration,
    /// Asserts an existing credential (`navigator.credentials.get`).
    Authentication,
}

impl Display for CeremonyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Registration => "registration",
            Self::Authentication => "authentication",
        })
    }
}
