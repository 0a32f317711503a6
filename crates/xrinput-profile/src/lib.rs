mod builder;
mod cache;
mod defaults;
mod document;
mod expand;
mod indices;
mod merge;
mod profile;
mod schema;
mod selector;
mod types;
mod validate;

use std::fmt;

use thiserror::Error;

use xrinput_gamepad::Handedness;

pub use builder::ProfileBuilder;
pub use cache::ProfileCache;
pub use document::{
    AssetProfile, AxisSlot, ComponentDescriptor, ComponentOverride, GamepadLayout,
    Layout, LayoutOverride, RegistryProfile, ResponseOverride,
};
pub use expand::{expand_layouts, HandKey};
pub use indices::integrate_gamepad_indices;
pub use merge::merge_profile;
pub use profile::{MergedLayout, MergedProfile, ResolvedComponent};
pub use schema::{SchemaIssue, SchemaKind, SchemaReport, SchemaValidator, SkipSchemaValidation};
pub use selector::{match_profile, ProfileMatch, ProfilesList, ProfilesListEntry};
pub use types::{
    AxisName, ComponentProperty, ComponentState, ComponentType, GamepadIndices,
    GamepadMapping, StateSet, ValueNodeProperty, VisualResponseDescriptor,
};
pub use validate::{is_generic_profile, validate_profile, ProfileIndex};

/// Gamepad mapping name that pins the first button and axis slots.
pub const CANONICAL_MAPPING: &str = "xr-standard";

/// Profile ids with this prefix describe generic hardware.
pub const GENERIC_PROFILE_PREFIX: &str = "generic-";

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Identifies the profile, and optionally the hand, an error belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub profile_id: Box<str>,
    pub hand: Option<Handedness>,
}

impl Scope {
    pub fn profile(profile_id: &str) -> Self {
        Self {
            profile_id: profile_id.into(),
            hand: None,
        }
    }

    pub fn with_hand(&self, hand: Handedness) -> Self {
        Self {
            profile_id: self.profile_id.clone(),
            hand: Some(hand),
        }
    }

    pub(crate) fn mismatch(&self, message: impl Into<String>) -> ProfileError {
        ProfileError::StructuralMismatch {
            scope: self.clone(),
            message: message.into(),
        }
    }

    pub(crate) fn ordering(&self, message: impl Into<String>) -> ProfileError {
        ProfileError::OrderingViolation {
            scope: self.clone(),
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(&self, reference: impl Into<String>) -> ProfileError {
        ProfileError::DuplicateReference {
            scope: self.clone(),
            reference: reference.into(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hand {
            Some(hand) => write!(f, "profile \"{}\" ({hand})", self.profile_id),
            None => write!(f, "profile \"{}\"", self.profile_id),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{scope}: {} schema violation(s), first at {}", .issues.len(), first_issue(.issues))]
    SchemaViolation {
        scope: Scope,
        issues: Vec<SchemaIssue>,
    },
    #[error("{scope}: {message}")]
    StructuralMismatch { scope: Scope, message: String },
    #[error("{scope}: {message}")]
    OrderingViolation { scope: Scope, message: String },
    #[error("{scope}: duplicate reference to {reference}")]
    DuplicateReference { scope: Scope, reference: String },
    #[error("{scope}: unexpected visual response source \"{property}\"")]
    UnknownSource { scope: Scope, property: String },

    #[error("json deserialize error: {0}")]
    JsonDeserializeError(#[from] serde_json::Error),
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
}

impl ProfileError {
    /// Profile and hand the error was raised for, if it carries one.
    pub fn scope(&self) -> Option<&Scope> {
        match self {
            ProfileError::SchemaViolation { scope, .. }
            | ProfileError::StructuralMismatch { scope, .. }
            | ProfileError::OrderingViolation { scope, .. }
            | ProfileError::DuplicateReference { scope, .. }
            | ProfileError::UnknownSource { scope, .. } => Some(scope),
            ProfileError::JsonDeserializeError(_)
            | ProfileError::YamlDeserializeError(_) => None,
        }
    }
}

fn first_issue(issues: &[SchemaIssue]) -> String {
    issues
        .first()
        .map(|issue| format!("{}: {}", issue.path, issue.message))
        .unwrap_or_else(|| "<no details>".to_string())
}
