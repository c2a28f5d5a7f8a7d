//! Breaking change detection

use crate::change::{BreakingChange, BreakingChangeKind, type_kind_phrase};
use crate::safety::{is_change_safe_for_input, is_change_safe_for_output};
use octofhir_graphql_types::{Schema, TypeDefinition, is_specified_scalar_name};

/// Find every change from `old` to `new` that can invalidate a previously
/// valid request
///
/// Types present in `old` are visited in their declared order, so the
/// report is identical across repeated runs.
pub fn find_breaking_changes(old: &Schema, new: &Schema) -> Vec<BreakingChange> {
    let mut changes = Vec::new();
    find_removed_types(old, new, &mut changes);
    find_types_changed_kind(old, new, &mut changes);
    find_types_removed_from_unions(old, new, &mut changes);
    find_values_removed_from_enums(old, new, &mut changes);
    find_required_input_fields_added(old, new, &mut changes);
    find_interfaces_removed_from_objects(old, new, &mut changes);
    find_field_changes(old, new, &mut changes);
    find_arg_changes(old, new, &mut changes);
    find_directive_changes(old, new, &mut changes);
    changes
}

fn find_removed_types(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for name in old.types().keys() {
        // Specified scalars come and go with references to them
        if is_specified_scalar_name(name) {
            continue;
        }
        if new.type_definition(name).is_none() {
            changes.push(BreakingChange::new(
                BreakingChangeKind::TypeRemoved,
                format!("Type '{name}' was removed"),
            ));
        }
    }
}

fn find_types_changed_kind(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let Some(new_type) = new.type_definition(name) else {
            continue;
        };
        if old_type.kind() != new_type.kind() {
            changes.push(BreakingChange::new(
                BreakingChangeKind::TypeChangedKind,
                format!(
                    "Type '{name}' changed from {} to {}",
                    type_kind_phrase(old_type),
                    type_kind_phrase(new_type)
                ),
            ));
        }
    }
}

fn find_types_removed_from_unions(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Union(old_union), Some(TypeDefinition::Union(new_union))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for member in &old_union.members {
            if !new_union.members.contains(member) {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::TypeRemovedFromUnion,
                    format!("Type '{member}' was removed from union type '{name}'"),
                ));
            }
        }
    }
}

fn find_values_removed_from_enums(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Enum(old_enum), Some(TypeDefinition::Enum(new_enum))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for value in old_enum.values.keys() {
            if !new_enum.values.contains_key(value) {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::ValueRemovedFromEnum,
                    format!("Enum value '{name}.{value}' was removed from enum type '{name}'"),
                ));
            }
        }
    }
}

fn find_required_input_fields_added(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::InputObject(old_input), Some(TypeDefinition::InputObject(new_input))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for (field_name, new_field) in &new_input.fields {
            if !old_input.fields.contains_key(field_name) && new_field.is_required() {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::RequiredInputFieldAdded,
                    format!("A required field '{field_name}' on input type '{name}' was added"),
                ));
            }
        }
    }
}

fn find_interfaces_removed_from_objects(
    old: &Schema,
    new: &Schema,
    changes: &mut Vec<BreakingChange>,
) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Object(old_object), Some(TypeDefinition::Object(new_object))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for interface in &old_object.interfaces {
            if !new_object.interfaces.contains(interface) {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::InterfaceRemovedFromObject,
                    format!("'{name}' no longer implements interface '{interface}'"),
                ));
            }
        }
    }
}

/// Removed and retyped fields, for output types and input objects alike
fn find_field_changes(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let Some(new_type) = new.type_definition(name) else {
            continue;
        };

        // Object and Interface fields follow the output rule
        if let (Some(old_fields), Some(new_fields)) = (old_type.fields(), new_type.fields()) {
            for (field_name, old_field) in old_fields {
                match new_fields.get(field_name) {
                    None => changes.push(BreakingChange::new(
                        BreakingChangeKind::FieldRemoved,
                        format!("Field '{name}.{field_name}' was removed"),
                    )),
                    Some(new_field) => {
                        if !is_change_safe_for_output(&old_field.ty, &new_field.ty) {
                            changes.push(BreakingChange::new(
                                BreakingChangeKind::FieldChangedKind,
                                format!(
                                    "Field '{name}.{field_name}' changed type from '{}' to '{}'",
                                    old_field.ty, new_field.ty
                                ),
                            ));
                        }
                    }
                }
            }
        }

        // Input object fields follow the input rule
        if let (Some(old_fields), Some(new_fields)) =
            (old_type.input_fields(), new_type.input_fields())
        {
            for (field_name, old_field) in old_fields {
                match new_fields.get(field_name) {
                    None => changes.push(BreakingChange::new(
                        BreakingChangeKind::FieldRemoved,
                        format!("Field '{name}.{field_name}' was removed"),
                    )),
                    Some(new_field) => {
                        if !is_change_safe_for_input(&old_field.ty, &new_field.ty) {
                            changes.push(BreakingChange::new(
                                BreakingChangeKind::FieldChangedKind,
                                format!(
                                    "Field '{name}.{field_name}' changed type from '{}' to '{}'",
                                    old_field.ty, new_field.ty
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }
}

fn find_arg_changes(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_type) in old.types() {
        let Some(new_type) = new.type_definition(name) else {
            continue;
        };
        let (Some(old_fields), Some(new_fields)) = (old_type.fields(), new_type.fields()) else {
            continue;
        };

        for (field_name, old_field) in old_fields {
            let Some(new_field) = new_fields.get(field_name) else {
                continue;
            };
            for (arg_name, old_arg) in &old_field.arguments {
                match new_field.arguments.get(arg_name) {
                    None => changes.push(BreakingChange::new(
                        BreakingChangeKind::ArgRemoved,
                        format!("'{name}.{field_name}' arg '{arg_name}' was removed"),
                    )),
                    Some(new_arg) => {
                        if !is_change_safe_for_input(&old_arg.ty, &new_arg.ty) {
                            changes.push(BreakingChange::new(
                                BreakingChangeKind::ArgChangedKind,
                                format!(
                                    "'{name}.{field_name}' arg '{arg_name}' has changed type from '{}' to '{}'",
                                    old_arg.ty, new_arg.ty
                                ),
                            ));
                        }
                    }
                }
            }
            for (arg_name, new_arg) in &new_field.arguments {
                if !old_field.arguments.contains_key(arg_name) && new_arg.is_required() {
                    changes.push(BreakingChange::new(
                        BreakingChangeKind::RequiredArgAdded,
                        format!(
                            "A required arg '{arg_name}' on '{name}.{field_name}' was added"
                        ),
                    ));
                }
            }
        }
    }
}

fn find_directive_changes(old: &Schema, new: &Schema, changes: &mut Vec<BreakingChange>) {
    for (name, old_directive) in old.directives() {
        let Some(new_directive) = new.directive(name) else {
            changes.push(BreakingChange::new(
                BreakingChangeKind::DirectiveRemoved,
                format!("Directive '@{name}' was removed"),
            ));
            continue;
        };

        for arg_name in old_directive.arguments.keys() {
            if !new_directive.arguments.contains_key(arg_name) {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::DirectiveArgRemoved,
                    format!("Arg '{arg_name}' was removed from directive '@{name}'"),
                ));
            }
        }
        for (arg_name, new_arg) in &new_directive.arguments {
            if !old_directive.arguments.contains_key(arg_name) && new_arg.is_required() {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::RequiredDirectiveArgAdded,
                    format!("A required arg '{arg_name}' on directive '@{name}' was added"),
                ));
            }
        }

        if old_directive.repeatable && !new_directive.repeatable {
            changes.push(BreakingChange::new(
                BreakingChangeKind::DirectiveRepeatableRemoved,
                format!("Repeatable flag was removed from directive '@{name}'"),
            ));
        }

        for location in &old_directive.locations {
            if !new_directive.locations.contains(location) {
                changes.push(BreakingChange::new(
                    BreakingChangeKind::DirectiveLocationRemoved,
                    format!("'{location}' was removed from directive '@{name}'"),
                ));
            }
        }
    }
}
