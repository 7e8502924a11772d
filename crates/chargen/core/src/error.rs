//! Common error infrastructure for chargen-core.
//!
//! Every build transition either commits completely or fails with a
//! [`BuildError`] and leaves the character untouched. Failures are ordinary
//! outcomes of player input, so none of them is ever classified as fatal.
//!
//! # Design Principles
//!
//! - **Stable taxonomy**: [`BuildErrorKind`] is a fieldless mirror of
//!   [`BuildError`] that transport layers can map without inspecting payloads
//! - **Rich Context**: variants carry the ids, locations and point amounts
//!   involved
//! - **Severity Classification**: see [`ErrorSeverity`]

use crate::catalog::{ModuleId, TraitId};
use crate::prereq::{Location, LocationError};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: may succeed later once the character changes (points
///   are refunded, a dependent option is removed)
/// - **Validation**: the request itself is wrong and should not be retried
/// - **Internal**: catalog and character disagree in a way a request cannot fix
/// - **Fatal**: state is corrupted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all chargen-core errors.
pub trait DomainError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Which lookup came back empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingEntity {
    /// Module id is not in the catalog.
    CatalogModule(ModuleId),
    /// Module exists but has no option at that location.
    CatalogOption { module: ModuleId, location: Location },
    /// Trait id is not in the catalog.
    CatalogTrait(TraitId),
    /// Character has not added this module.
    SelectedModule(ModuleId),
    /// Character has not selected this option.
    SelectedOption { module: ModuleId, location: Location },
    /// Character does not carry this trait.
    SelectedTrait(TraitId),
}

impl core::fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CatalogModule(id) => write!(f, "module '{id}' is not in the catalog"),
            Self::CatalogOption { module, location } => {
                write!(f, "module '{module}' has no option at {location}")
            }
            Self::CatalogTrait(id) => write!(f, "trait '{id}' is not in the catalog"),
            Self::SelectedModule(id) => write!(f, "module '{id}' has not been added"),
            Self::SelectedOption { module, location } => {
                write!(f, "option {location} of module '{module}' is not selected")
            }
            Self::SelectedTrait(id) => write!(f, "trait '{id}' is not selected"),
        }
    }
}

/// Which addition would duplicate an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExistingEntity {
    Module(ModuleId),
    Trait(TraitId),
}

impl core::fmt::Display for ExistingEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Module(id) => write!(f, "module '{id}'"),
            Self::Trait(id) => write!(f, "trait '{id}'"),
        }
    }
}

/// Failure of a build transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildError {
    #[error("not found: {0}")]
    NotFound(MissingEntity),

    #[error("option {location} of module '{module}' is already selected")]
    AlreadySelected { module: ModuleId, location: Location },

    #[error("{0} is already part of the build")]
    AlreadyExists(ExistingEntity),

    #[error("option {location} of module '{module}' requires a selection in tier {required_tier}")]
    PrerequisiteNotMet {
        module: ModuleId,
        location: Location,
        required_tier: u32,
    },

    #[error("option {location} of module '{module}' is required by {dependents:?}")]
    HasDependents {
        module: ModuleId,
        location: Location,
        dependents: Vec<Location>,
    },

    #[error("insufficient module points: need {required}, have {available}")]
    InsufficientPoints { required: u32, available: u32 },

    #[error("trait cap reached ({cap} traits)")]
    TraitCapReached { cap: usize },

    #[error("invalid location '{raw}': {reason}")]
    InvalidLocation { raw: String, reason: LocationError },
}

/// Fieldless discriminant of [`BuildError`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BuildErrorKind {
    NotFound,
    AlreadySelected,
    AlreadyExists,
    PrerequisiteNotMet,
    HasDependents,
    InsufficientPoints,
    TraitCapReached,
    InvalidLocation,
}

impl BuildError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            Self::NotFound(_) => BuildErrorKind::NotFound,
            Self::AlreadySelected { .. } => BuildErrorKind::AlreadySelected,
            Self::AlreadyExists(_) => BuildErrorKind::AlreadyExists,
            Self::PrerequisiteNotMet { .. } => BuildErrorKind::PrerequisiteNotMet,
            Self::HasDependents { .. } => BuildErrorKind::HasDependents,
            Self::InsufficientPoints { .. } => BuildErrorKind::InsufficientPoints,
            Self::TraitCapReached { .. } => BuildErrorKind::TraitCapReached,
            Self::InvalidLocation { .. } => BuildErrorKind::InvalidLocation,
        }
    }

    pub(crate) fn invalid_location(raw: &str, reason: LocationError) -> Self {
        Self::InvalidLocation {
            raw: raw.to_string(),
            reason,
        }
    }
}

impl DomainError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Budget and dependents change as the build changes.
            Self::InsufficientPoints { .. }
            | Self::HasDependents { .. }
            | Self::PrerequisiteNotMet { .. }
            | Self::TraitCapReached { .. } => ErrorSeverity::Recoverable,
            Self::NotFound(_)
            | Self::AlreadySelected { .. }
            | Self::AlreadyExists(_)
            | Self::InvalidLocation { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        self.kind().into()
    }
}

/// Rejected catalog snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate module id '{0}'")]
    DuplicateModule(ModuleId),

    #[error("duplicate trait id '{0}'")]
    DuplicateTrait(TraitId),

    #[error("module '{module}' lists option {location} more than once")]
    DuplicateOption { module: ModuleId, location: Location },
}

impl DomainError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateModule(_) => "duplicate_module",
            Self::DuplicateTrait(_) => "duplicate_trait",
            Self::DuplicateOption { .. } => "duplicate_option",
        }
    }
}
