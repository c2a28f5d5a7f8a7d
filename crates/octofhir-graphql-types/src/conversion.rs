//! Conversion between literal syntax-tree nodes and runtime values
//!
//! `value_from_ast` reads a literal against a declared type, resolving
//! variable references from a caller-supplied map. The functions distinguish
//! "no value" (`None`) from an explicit null (`Some(Value::Null)`) so a
//! caller can still apply its own default when a variable is unresolved.
//! Shape mismatches yield the absent outcome, never a panic.

use crate::{Schema, TypeDefinition, TypeRef, Value, is_specified_scalar_name, MAX_INT, MIN_INT};
use indexmap::IndexMap;
use octofhir_graphql_ast::ValueNode;

/// Variable values by name, as supplied with a request
pub type Variables = IndexMap<String, Value>;

/// Produce a runtime value from a literal node read against a type
///
/// Returns `None` when the literal has no value under the type: an
/// unresolved variable, a null under `NonNull`, or a shape mismatch.
pub fn value_from_ast(
    node: &ValueNode,
    ty: &TypeRef,
    schema: &Schema,
    variables: Option<&Variables>,
) -> Option<Value> {
    if let ValueNode::Variable(name) = node {
        let value = variables?.get(name)?.clone();
        // An explicit null variable cannot flow into a non-null position
        if value.is_null() && ty.is_non_null() {
            return None;
        }
        // Variable values are assumed coerced already
        return Some(value);
    }

    match ty {
        TypeRef::NonNull(inner) => {
            if node.is_null() {
                None
            } else {
                value_from_ast(node, inner, schema, variables)
            }
        }

        _ if node.is_null() => Some(Value::Null),

        TypeRef::List(item_type) => match node {
            ValueNode::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    if is_missing_variable(item, variables) {
                        // An unresolved item is a null, unless the position forbids it
                        if item_type.is_non_null() {
                            return None;
                        }
                        values.push(Value::Null);
                    } else {
                        values.push(value_from_ast(item, item_type, schema, variables)?);
                    }
                }
                Some(Value::List(values))
            }
            single => {
                let value = value_from_ast(single, item_type, schema, variables)?;
                Some(Value::List(vec![value]))
            }
        },

        TypeRef::Named(name) => match schema.type_definition(name)? {
            TypeDefinition::InputObject(input_object) => {
                let ValueNode::Object(field_nodes) = node else {
                    return None;
                };
                let mut entries = IndexMap::new();
                for (field_name, field) in &input_object.fields {
                    let field_node = field_nodes
                        .iter()
                        .find(|candidate| &candidate.name == field_name);
                    match field_node {
                        Some(field_node)
                            if !is_missing_variable(&field_node.value, variables) =>
                        {
                            let value =
                                value_from_ast(&field_node.value, &field.ty, schema, variables)?;
                            entries.insert(field_name.clone(), value);
                        }
                        _ => {
                            if let Some(default) = &field.default_value {
                                entries.insert(field_name.clone(), default.clone());
                            } else if field.ty.is_non_null() {
                                return None;
                            }
                        }
                    }
                }
                Some(Value::Object(entries))
            }

            TypeDefinition::Enum(enum_type) => match node {
                ValueNode::Enum(value) if enum_type.values.contains_key(value) => {
                    Some(Value::Enum(value.clone()))
                }
                _ => None,
            },

            TypeDefinition::Scalar(scalar) => {
                if is_specified_scalar_name(name) {
                    parse_specified_scalar_literal(name, node)
                } else {
                    let value = value_from_ast_untyped(node, variables);
                    match scalar.parse {
                        Some(parse) => parse(&value).ok(),
                        None => Some(value),
                    }
                }
            }

            // Object, Interface, and Union types have no input literals
            _ => None,
        },
    }
}

/// Specified scalars only accept their own literal kinds
fn parse_specified_scalar_literal(name: &str, node: &ValueNode) -> Option<Value> {
    match (name, node) {
        ("Int", ValueNode::Int(i)) if (MIN_INT..=MAX_INT).contains(i) => Some(Value::Int(*i)),
        ("Float", ValueNode::Int(i)) => Some(Value::Float(*i as f64)),
        ("Float", ValueNode::Float(f)) => Some(Value::Float(*f)),
        ("String", ValueNode::String(s)) => Some(Value::String(s.clone())),
        ("Boolean", ValueNode::Boolean(b)) => Some(Value::Boolean(*b)),
        ("ID", ValueNode::String(s)) => Some(Value::String(s.clone())),
        ("ID", ValueNode::Int(i)) => Some(Value::String(i.to_string())),
        _ => None,
    }
}

fn is_missing_variable(node: &ValueNode, variables: Option<&Variables>) -> bool {
    match node {
        ValueNode::Variable(name) => variables.is_none_or(|vars| !vars.contains_key(name)),
        _ => false,
    }
}

/// Produce a runtime value from a literal node with no target type
///
/// A purely structural reading: objects become mappings, lists become
/// sequences, scalars keep their literal kind. Unresolved variables read as
/// null.
pub fn value_from_ast_untyped(node: &ValueNode, variables: Option<&Variables>) -> Value {
    match node {
        ValueNode::Null => Value::Null,
        ValueNode::Int(i) => Value::Int(*i),
        ValueNode::Float(f) => Value::Float(*f),
        ValueNode::String(s) => Value::String(s.clone()),
        ValueNode::Boolean(b) => Value::Boolean(*b),
        ValueNode::Enum(name) => Value::Enum(name.clone()),
        ValueNode::List(items) => Value::List(
            items
                .iter()
                .map(|item| value_from_ast_untyped(item, variables))
                .collect(),
        ),
        ValueNode::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|field| {
                    (
                        field.name.clone(),
                        value_from_ast_untyped(&field.value, variables),
                    )
                })
                .collect(),
        ),
        ValueNode::Variable(name) => variables
            .and_then(|vars| vars.get(name))
            .cloned()
            .unwrap_or(Value::Null),
    }
}

/// Produce a literal node representing a runtime value under a type
///
/// The inverse of [`value_from_ast`]: `None` means the value has no
/// representation - null under `NonNull`, an out-of-range or non-finite
/// number, an undeclared enum value, or a required input field missing.
pub fn ast_from_value(value: &Value, ty: &TypeRef, schema: &Schema) -> Option<ValueNode> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                None
            } else {
                ast_from_value(value, inner, schema)
            }
        }

        _ if value.is_null() => Some(ValueNode::Null),

        TypeRef::List(item_type) => match value {
            Value::List(items) => Some(ValueNode::List(
                items
                    .iter()
                    .filter_map(|item| ast_from_value(item, item_type, schema))
                    .collect(),
            )),
            // A single value renders as the bare item literal
            single => ast_from_value(single, item_type, schema),
        },

        TypeRef::Named(name) => match schema.type_definition(name)? {
            TypeDefinition::InputObject(input_object) => {
                let Value::Object(entries) = value else {
                    return None;
                };
                let mut field_nodes = Vec::new();
                for (field_name, field) in &input_object.fields {
                    match entries.get(field_name) {
                        Some(entry) => {
                            let node = ast_from_value(entry, &field.ty, schema)?;
                            field_nodes.push(octofhir_graphql_ast::ObjectFieldNode::new(
                                field_name.clone(),
                                node,
                            ));
                        }
                        None if field.is_required() => return None,
                        None => {}
                    }
                }
                Some(ValueNode::Object(field_nodes))
            }

            TypeDefinition::Enum(enum_type) => {
                let candidate = match value {
                    Value::Enum(candidate) | Value::String(candidate) => candidate,
                    _ => return None,
                };
                enum_type
                    .values
                    .contains_key(candidate)
                    .then(|| ValueNode::Enum(candidate.clone()))
            }

            TypeDefinition::Scalar(_) => {
                if is_specified_scalar_name(name) {
                    specified_scalar_to_ast(name, value)
                } else {
                    ast_from_untyped(value)
                }
            }

            _ => None,
        },
    }
}

fn specified_scalar_to_ast(name: &str, value: &Value) -> Option<ValueNode> {
    match (name, value) {
        ("Int", Value::Int(i)) if (MIN_INT..=MAX_INT).contains(i) => Some(ValueNode::Int(*i)),
        ("Int", Value::Float(f)) if f.is_finite() && f.fract() == 0.0 => {
            let i = *f as i64;
            (MIN_INT..=MAX_INT).contains(&i).then_some(ValueNode::Int(i))
        }
        ("Float", Value::Int(i)) => Some(ValueNode::Int(*i)),
        ("Float", Value::Float(f)) if f.is_finite() => Some(ValueNode::Float(*f)),
        ("String", Value::String(s)) => Some(ValueNode::String(s.clone())),
        ("Boolean", Value::Boolean(b)) => Some(ValueNode::Boolean(*b)),
        ("ID", Value::String(s)) => Some(ValueNode::String(s.clone())),
        ("ID", Value::Int(i)) => Some(ValueNode::Int(*i)),
        _ => None,
    }
}

/// Structural value-to-literal conversion for pass-through scalars
fn ast_from_untyped(value: &Value) -> Option<ValueNode> {
    match value {
        Value::Null => Some(ValueNode::Null),
        Value::Boolean(b) => Some(ValueNode::Boolean(*b)),
        Value::Int(i) => Some(ValueNode::Int(*i)),
        Value::Float(f) if f.is_finite() => Some(ValueNode::Float(*f)),
        Value::Float(_) => None,
        Value::String(s) => Some(ValueNode::String(s.clone())),
        Value::Enum(name) => Some(ValueNode::Enum(name.clone())),
        Value::List(items) => Some(ValueNode::List(
            items.iter().map(ast_from_untyped).collect::<Option<_>>()?,
        )),
        Value::Object(entries) => Some(ValueNode::Object(
            entries
                .iter()
                .map(|(name, entry)| {
                    ast_from_untyped(entry).map(|node| {
                        octofhir_graphql_ast::ObjectFieldNode::new(name.clone(), node)
                    })
                })
                .collect::<Option<_>>()?,
        )),
    }
}
