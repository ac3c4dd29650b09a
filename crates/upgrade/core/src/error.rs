//! Common error infrastructure for upgrade-core.
//!
//! Two families of failure exist:
//!
//! - **Catalog construction** ([`CatalogError`]): the only failure allowed to
//!   halt startup. A catalog with a duplicate id is rejected as a whole.
//! - **Runtime input** ([`AcceptError`]): a bad id or an out-of-turn request.
//!   These never mutate state; the caller decides whether to surface them.
//!
//! Degenerate sampling and empty pools are not errors at all and therefore
//! have no variant here.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that was rejected without touching state.
    ///
    /// Examples: unknown upgrade id, accepting an upgrade that was not offered
    Validation,

    /// Construction cannot continue.
    ///
    /// Examples: duplicate catalog id, unreadable catalog source
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the failure must stop the caller.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all upgrade-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure while building an [`crate::UpgradeCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate upgrade id `{id}` in catalog source")]
    DuplicateId { id: String },

    #[error("invalid upgrade definition `{id}`: {reason}")]
    InvalidDefinition { id: String, reason: &'static str },

    #[error("catalog source could not be read: {0}")]
    Source(String),
}

impl EngineError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::InvalidDefinition { .. } => "CATALOG_INVALID_DEFINITION",
            Self::Source(_) => "CATALOG_SOURCE",
        }
    }
}

/// Rejected accumulator or decision-point request.
///
/// Returned by [`crate::ModifierAccumulator`] and
/// [`crate::SelectionCoordinator`]. State is unchanged whenever one of these
/// is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AcceptError {
    #[error("upgrade `{id}` is not part of the catalog")]
    UnknownUpgrade { id: String },

    #[error("upgrade `{id}` is already at its stack limit of {max}")]
    StackLimitReached { id: String, max: u32 },

    #[error("upgrade `{id}` is not active")]
    NotActive { id: String },

    #[error("upgrade `{id}` was not part of the current offer")]
    NotOffered { id: String },

    #[error("no offer is pending")]
    NoPendingOffer,
}

impl EngineError for AcceptError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUpgrade { .. } => "UPGRADE_UNKNOWN",
            Self::StackLimitReached { .. } => "UPGRADE_STACK_LIMIT",
            Self::NotActive { .. } => "UPGRADE_NOT_ACTIVE",
            Self::NotOffered { .. } => "UPGRADE_NOT_OFFERED",
            Self::NoPendingOffer => "DECISION_NO_OFFER",
        }
    }
}
