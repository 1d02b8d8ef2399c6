//! Common error infrastructure for overworld-core.
//!
//! Domain-specific errors (`OracleError`, `ContentError`, `EngineError`) live
//! next to the modules that raise them and implement [`GameError`] so hosts can
//! classify failures uniformly.
//!
//! # Classification
//!
//! - **Configuration errors** (malformed static content, unmapped modes or
//!   actor kinds) are fatal. Content is fixed at load time and cannot be
//!   partially valid.
//! - **Invariant violations** (a mode handler receiving another mode's machine)
//!   are internal errors. Countdowns clamp at zero instead of wrapping.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the host may continue with a fallback.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: cheat command naming a missing room.
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a mode handler receiving a machine of another mode.
    Internal,

    /// Fatal error - content or configuration is broken, cannot continue.
    ///
    /// Examples: missing world oracle, dangling room connection.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all overworld-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_and_internal_are_not_recoverable() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
