//! Dangerous change detection

use crate::change::{DangerousChange, DangerousChangeKind};
use octofhir_graphql_types::{Schema, TypeDefinition};

/// Find every change from `old` to `new` that is backward-compatible but
/// may alter client-visible behaviour
///
/// Same traversal contract as breaking-change detection: old graph's
/// declaration order, deterministic output.
pub fn find_dangerous_changes(old: &Schema, new: &Schema) -> Vec<DangerousChange> {
    let mut changes = Vec::new();
    find_values_added_to_enums(old, new, &mut changes);
    find_types_added_to_unions(old, new, &mut changes);
    find_optional_input_fields_added(old, new, &mut changes);
    find_optional_args_added(old, new, &mut changes);
    find_interfaces_added_to_objects(old, new, &mut changes);
    find_changed_default_values(old, new, &mut changes);
    changes
}

fn find_values_added_to_enums(old: &Schema, new: &Schema, changes: &mut Vec<DangerousChange>) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Enum(old_enum), Some(TypeDefinition::Enum(new_enum))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for value in new_enum.values.keys() {
            if !old_enum.values.contains_key(value) {
                changes.push(DangerousChange::new(
                    DangerousChangeKind::ValueAddedToEnum,
                    format!("Enum value '{name}.{value}' was added to enum type '{name}'"),
                ));
            }
        }
    }
}

fn find_types_added_to_unions(old: &Schema, new: &Schema, changes: &mut Vec<DangerousChange>) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Union(old_union), Some(TypeDefinition::Union(new_union))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for member in &new_union.members {
            if !old_union.members.contains(member) {
                changes.push(DangerousChange::new(
                    DangerousChangeKind::TypeAddedToUnion,
                    format!("Type '{member}' was added to union type '{name}'"),
                ));
            }
        }
    }
}

fn find_optional_input_fields_added(
    old: &Schema,
    new: &Schema,
    changes: &mut Vec<DangerousChange>,
) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::InputObject(old_input), Some(TypeDefinition::InputObject(new_input))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for (field_name, new_field) in &new_input.fields {
            if !old_input.fields.contains_key(field_name) && !new_field.is_required() {
                changes.push(DangerousChange::new(
                    DangerousChangeKind::OptionalInputFieldAdded,
                    format!("An optional field '{field_name}' on input type '{name}' was added"),
                ));
            }
        }
    }
}

fn find_optional_args_added(old: &Schema, new: &Schema, changes: &mut Vec<DangerousChange>) {
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
            for (arg_name, new_arg) in &new_field.arguments {
                if !old_field.arguments.contains_key(arg_name) && !new_arg.is_required() {
                    changes.push(DangerousChange::new(
                        DangerousChangeKind::OptionalArgAdded,
                        format!("An optional arg '{arg_name}' on '{name}.{field_name}' was added"),
                    ));
                }
            }
        }
    }
}

fn find_interfaces_added_to_objects(
    old: &Schema,
    new: &Schema,
    changes: &mut Vec<DangerousChange>,
) {
    for (name, old_type) in old.types() {
        let (TypeDefinition::Object(old_object), Some(TypeDefinition::Object(new_object))) =
            (old_type, new.type_definition(name))
        else {
            continue;
        };
        for interface in &new_object.interfaces {
            if !old_object.interfaces.contains(interface) {
                changes.push(DangerousChange::new(
                    DangerousChangeKind::InterfaceAddedToObject,
                    format!("'{interface}' added to interfaces implemented by '{name}'"),
                ));
            }
        }
    }
}

/// Default values of field arguments and input-object fields
fn find_changed_default_values(old: &Schema, new: &Schema, changes: &mut Vec<DangerousChange>) {
    for (name, old_type) in old.types() {
        let Some(new_type) = new.type_definition(name) else {
            continue;
        };

        if let (Some(old_fields), Some(new_fields)) = (old_type.fields(), new_type.fields()) {
            for (field_name, old_field) in old_fields {
                let Some(new_field) = new_fields.get(field_name) else {
                    continue;
                };
                for (arg_name, old_arg) in &old_field.arguments {
                    let Some(new_arg) = new_field.arguments.get(arg_name) else {
                        continue;
                    };
                    if old_arg.default_value != new_arg.default_value {
                        changes.push(DangerousChange::new(
                            DangerousChangeKind::ArgDefaultValueChanged,
                            format!(
                                "'{name}.{field_name}' arg '{arg_name}' has changed defaultValue"
                            ),
                        ));
                    }
                }
            }
        }

        if let (Some(old_fields), Some(new_fields)) =
            (old_type.input_fields(), new_type.input_fields())
        {
            for (field_name, old_field) in old_fields {
                let Some(new_field) = new_fields.get(field_name) else {
                    continue;
                };
                if old_field.default_value != new_field.default_value {
                    changes.push(DangerousChange::new(
                        DangerousChangeKind::ArgDefaultValueChanged,
                        format!("'{name}.{field_name}' has changed defaultValue"),
                    ));
                }
            }
        }
    }
}
