use serde_derive::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Opaque token the relying party returns from "begin" and expects back verbatim on the
/// matching "finish" call.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// The token is signed by the relying party and must not end up in logs.
impl Debug for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("RequestId(***)")
    }
}
