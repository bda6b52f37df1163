use crate::ceremony::CeremonyKind;
use serde_derive::Serialize;
use uuid::Uuid;

/// Represents a context of a single ceremony invocation used for the structured logging.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct CeremonyLogContext {
    /// Unique id of the ceremony invocation, never sent to the relying party.
    pub id: Uuid,
    /// Kind of the ceremony.
    pub kind: CeremonyKind,
}

impl CeremonyLogContext {
    /// Returns context used for the structured logging of a new ceremony invocation.
    pub fn new(kind: CeremonyKind) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
        }
    }
}
