//! GraphQL type system definitions
//!
//! This module defines the building blocks of the type graph:
//! - `TypeRef`, the name-keyed lazy reference with `List`/`NonNull` wrappers
//! - `TypeDefinition`, the closed variant over the six named kinds
//! - Field, argument, enum-value, and directive definitions
//!
//! Every inter-type reference is a name resolved against the owning
//! [`Schema`](crate::Schema); definitions never hold pointers to each other,
//! which makes self- and mutually-recursive types safe to construct.

use crate::Value;
use indexmap::IndexMap;
use octofhir_graphql_ast::DirectiveLocation;
use std::fmt;
use std::str::FromStr;

/// A reference to a type in the graph
///
/// The base case is a type name; `List` and `NonNull` wrappers compose over
/// it or over each other. Invariant: `NonNull` never wraps `NonNull` - the
/// [`TypeRef::non_null`] constructor preserves this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named type in the owning graph
    Named(String),
    /// A list of the inner type
    List(Box<TypeRef>),
    /// A non-null wrapper over the inner type
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Create a named type reference
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a list wrapper
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Create a non-null wrapper; wrapping an already non-null reference is
    /// a no-op
    pub fn non_null(inner: TypeRef) -> Self {
        match inner {
            Self::NonNull(_) => inner,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Get the innermost named type
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    /// Strip one outer `NonNull` wrapper, if present
    pub fn nullable(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Check if the outermost wrapper is `NonNull`
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Check if this reference (after stripping one `NonNull`) is a list
    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), Self::List(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// The fixed set of type kinds, matching the introspection wire names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// The canonical wire-format name of this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCALAR" => Ok(Self::Scalar),
            "OBJECT" => Ok(Self::Object),
            "INTERFACE" => Ok(Self::Interface),
            "UNION" => Ok(Self::Union),
            "ENUM" => Ok(Self::Enum),
            "INPUT_OBJECT" => Ok(Self::InputObject),
            "LIST" => Ok(Self::List),
            "NON_NULL" => Ok(Self::NonNull),
            _ => Err(()),
        }
    }
}

/// A scalar's input parse function
///
/// Takes the raw input value and returns the coerced value or a rejection
/// message. A plain function pointer keeps the graph `Clone` and `Debug`.
pub type ScalarFn = fn(&Value) -> Result<Value, String>;

/// A named type definition in the graph
///
/// The kind set is closed; every consumer matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    /// Get the type name
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    /// Get the type description
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(def) => def.description.as_deref(),
            Self::Object(def) => def.description.as_deref(),
            Self::Interface(def) => def.description.as_deref(),
            Self::Union(def) => def.description.as_deref(),
            Self::Enum(def) => def.description.as_deref(),
            Self::InputObject(def) => def.description.as_deref(),
        }
    }

    /// Get the kind of this definition
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Check if this is an abstract type (Interface or Union)
    pub const fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Check if this type may appear in input positions
    pub const fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Check if this type may appear in output positions
    pub const fn is_output_type(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }

    /// Get the output fields for Object and Interface kinds
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            Self::Object(def) => Some(&def.fields),
            Self::Interface(def) => Some(&def.fields),
            _ => None,
        }
    }

    /// Get the input fields for the InputObject kind
    pub fn input_fields(&self) -> Option<&IndexMap<String, InputValueDefinition>> {
        match self {
            Self::InputObject(def) => Some(&def.fields),
            _ => None,
        }
    }

    /// Get the enum values for the Enum kind
    pub fn enum_values(&self) -> Option<&IndexMap<String, EnumValueDefinition>> {
        match self {
            Self::Enum(def) => Some(&def.values),
            _ => None,
        }
    }

    /// Get the registered possible-type names for abstract kinds
    pub fn possible_types(&self) -> Option<&[String]> {
        match self {
            Self::Interface(def) => Some(&def.possible_types),
            Self::Union(def) => Some(&def.members),
            _ => None,
        }
    }

    /// Get the implemented interface names for the Object kind
    pub fn interfaces(&self) -> Option<&[String]> {
        match self {
            Self::Object(def) => Some(&def.interfaces),
            _ => None,
        }
    }
}

/// A scalar type
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    /// Input parse function; `None` means the scalar accepts any value as-is
    pub parse: Option<ScalarFn>,
}

impl ScalarType {
    /// Create a pass-through scalar
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parse: None,
        }
    }

    /// Attach an input parse function
    pub fn with_parse(mut self, parse: ScalarFn) -> Self {
        self.parse = Some(parse);
        self
    }
}

/// An object type
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    /// Implemented interface names, in declaration order
    pub interfaces: Vec<String>,
    /// Fields keyed by name, in declaration order
    pub fields: IndexMap<String, FieldDefinition>,
}

/// An interface type
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldDefinition>,
    /// Names of the Object types implementing this interface; derived by
    /// the builders, never author-declared
    pub possible_types: Vec<String>,
}

/// A union type
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    /// Member Object type names, in declaration order; these are the
    /// union's possible types
    pub members: Vec<String>,
}

/// An enum type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    /// Values keyed by name, in declaration order
    pub values: IndexMap<String, EnumValueDefinition>,
}

/// A single declared value of an enum type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Deprecation reason; `Some` means deprecated
    pub deprecation: Option<String>,
}

impl EnumValueDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation: None,
        }
    }

    /// Check if this value is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// An input object type
#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputValueDefinition>,
}

/// A field of an object or interface type
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Arguments keyed by name, in declaration order
    pub arguments: IndexMap<String, InputValueDefinition>,
    /// Output type reference
    pub ty: TypeRef,
    /// Deprecation reason; `Some` means deprecated
    pub deprecation: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: IndexMap::new(),
            ty,
            deprecation: None,
        }
    }

    /// Check if this field is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// An argument of a field or directive, or a field of an input object
///
/// Input references only ever name Scalar, Enum, or InputObject types
/// (wrapped freely in `List`/`NonNull`); the builders enforce this.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Input type reference
    pub ty: TypeRef,
    /// Declared default value
    pub default_value: Option<Value>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    /// A value is required when its type is non-null and no default exists
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

/// A directive definition
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Valid syntactic locations
    pub locations: Vec<DirectiveLocation>,
    /// Arguments keyed by name, in declaration order
    pub arguments: IndexMap<String, InputValueDefinition>,
    /// Whether the directive may be applied repeatedly at one location
    pub repeatable: bool,
}

impl DirectiveDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: Vec::new(),
            arguments: IndexMap::new(),
            repeatable: false,
        }
    }
}
