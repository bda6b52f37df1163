use std::fmt::{Display, Formatter};

/// Stages every ceremony goes through: `idle → begun → ceremony-invoked → finished`, with
/// `failed` reachable from `begun` and `ceremony-invoked`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CeremonyStage {
    Idle,
    Begun,
    CeremonyInvoked,
    Finished,
    Failed,
}

impl Display for CeremonyStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Begun => "begun",
            Self::CeremonyInvoked => "ceremony-invoked",
            Self::Finished => "finished",
            Self::Failed => "failed",
        })
    }
}
