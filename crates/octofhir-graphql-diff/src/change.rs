//! Change report records

use octofhir_graphql_types::{TypeDefinition, TypeKind};
use serde::Serialize;
use std::fmt;

/// Kinds of changes that can invalidate previously valid requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakingChangeKind {
    TypeRemoved,
    TypeChangedKind,
    TypeRemovedFromUnion,
    ValueRemovedFromEnum,
    RequiredInputFieldAdded,
    InterfaceRemovedFromObject,
    FieldRemoved,
    FieldChangedKind,
    ArgRemoved,
    ArgChangedKind,
    RequiredArgAdded,
    DirectiveRemoved,
    DirectiveArgRemoved,
    RequiredDirectiveArgAdded,
    DirectiveRepeatableRemoved,
    DirectiveLocationRemoved,
}

impl fmt::Display for BreakingChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeRemoved => "TYPE_REMOVED",
            Self::TypeChangedKind => "TYPE_CHANGED_KIND",
            Self::TypeRemovedFromUnion => "TYPE_REMOVED_FROM_UNION",
            Self::ValueRemovedFromEnum => "VALUE_REMOVED_FROM_ENUM",
            Self::RequiredInputFieldAdded => "REQUIRED_INPUT_FIELD_ADDED",
            Self::InterfaceRemovedFromObject => "INTERFACE_REMOVED_FROM_OBJECT",
            Self::FieldRemoved => "FIELD_REMOVED",
            Self::FieldChangedKind => "FIELD_CHANGED_KIND",
            Self::ArgRemoved => "ARG_REMOVED",
            Self::ArgChangedKind => "ARG_CHANGED_KIND",
            Self::RequiredArgAdded => "REQUIRED_ARG_ADDED",
            Self::DirectiveRemoved => "DIRECTIVE_REMOVED",
            Self::DirectiveArgRemoved => "DIRECTIVE_ARG_REMOVED",
            Self::RequiredDirectiveArgAdded => "REQUIRED_DIRECTIVE_ARG_ADDED",
            Self::DirectiveRepeatableRemoved => "DIRECTIVE_REPEATABLE_REMOVED",
            Self::DirectiveLocationRemoved => "DIRECTIVE_LOCATION_REMOVED",
        };
        write!(f, "{name}")
    }
}

/// Kinds of backward-compatible changes that may still alter client-visible
/// behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DangerousChangeKind {
    ValueAddedToEnum,
    TypeAddedToUnion,
    OptionalInputFieldAdded,
    OptionalArgAdded,
    InterfaceAddedToObject,
    ArgDefaultValueChanged,
}

impl fmt::Display for DangerousChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ValueAddedToEnum => "VALUE_ADDED_TO_ENUM",
            Self::TypeAddedToUnion => "TYPE_ADDED_TO_UNION",
            Self::OptionalInputFieldAdded => "OPTIONAL_INPUT_FIELD_ADDED",
            Self::OptionalArgAdded => "OPTIONAL_ARG_ADDED",
            Self::InterfaceAddedToObject => "INTERFACE_ADDED_TO_OBJECT",
            Self::ArgDefaultValueChanged => "ARG_DEFAULT_VALUE_CHANGED",
        };
        write!(f, "{name}")
    }
}

/// One reported breaking change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakingChange {
    pub kind: BreakingChangeKind,
    pub description: String,
}

impl BreakingChange {
    pub(crate) fn new(kind: BreakingChangeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl fmt::Display for BreakingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

/// One reported dangerous change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DangerousChange {
    pub kind: DangerousChangeKind,
    pub description: String,
}

impl DangerousChange {
    pub(crate) fn new(kind: DangerousChangeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl fmt::Display for DangerousChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

/// Article-prefixed kind phrase used in change descriptions
pub(crate) fn type_kind_phrase(definition: &TypeDefinition) -> &'static str {
    match definition.kind() {
        TypeKind::Scalar => "a Scalar type",
        TypeKind::Object => "an Object type",
        TypeKind::Interface => "an Interface type",
        TypeKind::Union => "a Union type",
        TypeKind::Enum => "an Enum type",
        TypeKind::InputObject => "an Input Object type",
        // Wrappers never appear as named definitions
        TypeKind::List | TypeKind::NonNull => "a wrapping type",
    }
}
