//! Error types surfaced by the orchestrator.

use crate::env::{ContentError, OracleError, RoomId, WorldId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::ActorKind;
#[cfg(feature = "serde")]
use crate::state::ProfileError;

use super::mode::GameMode;

/// Errors returned by [`super::GameEngine::update`].
///
/// Every variant is a configuration or invariant failure; the orchestrator
/// never retries and the host is expected to stop the session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("no handler registered for mode {0}")]
    UnmappedMode(GameMode),

    #[error("no factory entry registered for actor kind {0}")]
    UnmappedActorKind(ActorKind),

    #[error("handler for {expected} received the {found} machine")]
    MachineMismatch { expected: GameMode, found: GameMode },

    #[error("room {room} in world {world:?} has no entrance")]
    MissingEntrance { world: WorldId, room: RoomId },

    #[error("room {room} in world {world:?} has no stairs")]
    MissingStairs { world: WorldId, room: RoomId },

    #[error("cellar {room} in world {world:?} has no exits")]
    MissingCellarExit { world: WorldId, room: RoomId },

    #[error("entrance stack is empty")]
    EmptyEntranceStack,

    #[cfg(feature = "serde")]
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl EngineError {
    /// Logs the error at the point it is about to leave the engine.
    pub(crate) fn logged(self) -> Self {
        tracing::error!(code = self.error_code(), error = %self, "engine failure");
        self
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            Self::Content(error) => error.severity(),
            #[cfg(feature = "serde")]
            Self::Profile(_) => ErrorSeverity::Internal,
            Self::MachineMismatch { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(error) => error.error_code(),
            Self::Content(error) => error.error_code(),
            Self::UnmappedMode(_) => "ENGINE_UNMAPPED_MODE",
            Self::UnmappedActorKind(_) => "ENGINE_UNMAPPED_ACTOR_KIND",
            Self::MachineMismatch { .. } => "ENGINE_MACHINE_MISMATCH",
            Self::MissingEntrance { .. } => "ENGINE_MISSING_ENTRANCE",
            Self::MissingStairs { .. } => "ENGINE_MISSING_STAIRS",
            Self::MissingCellarExit { .. } => "ENGINE_MISSING_CELLAR_EXIT",
            Self::EmptyEntranceStack => "ENGINE_EMPTY_ENTRANCE_STACK",
            #[cfg(feature = "serde")]
            Self::Profile(error) => error.error_code(),
        }
    }
}
