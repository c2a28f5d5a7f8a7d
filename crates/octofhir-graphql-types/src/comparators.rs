//! Structural comparators over types in a graph
//!
//! All three predicates are total and recurse only through `List`/`NonNull`
//! wrappers, so they terminate on any input. Both arguments must reference
//! types of the same graph; cross-graph comparison is undefined.

use crate::{Schema, TypeDefinition, TypeRef};

/// Structural type equality
///
/// Wrappers must match exactly; the base case is named-type identity.
/// Symmetric and reflexive.
pub fn is_equal_type(a: &TypeRef, b: &TypeRef) -> bool {
    match (a, b) {
        (TypeRef::Named(a), TypeRef::Named(b)) => a == b,
        (TypeRef::List(a), TypeRef::List(b)) => is_equal_type(a, b),
        (TypeRef::NonNull(a), TypeRef::NonNull(b)) => is_equal_type(a, b),
        _ => false,
    }
}

/// Check if `maybe_subtype` is a subtype of `super_type` within `schema`
///
/// - Equal types are subtypes of each other.
/// - `NonNull(T)` is a subtype of both `NonNull(S)` and plain `S` when `T`
///   is a subtype of `S`; plain `T` is never a subtype of `NonNull(S)`.
/// - `List(T)` is a subtype of `List(S)` when `T` is a subtype of `S`;
///   lists and non-lists never relate.
/// - A named Object type is a subtype of an abstract type it is registered
///   under.
pub fn is_type_sub_type_of(schema: &Schema, maybe_subtype: &TypeRef, super_type: &TypeRef) -> bool {
    if is_equal_type(maybe_subtype, super_type) {
        return true;
    }

    // A non-null supertype only admits non-null subtypes
    if let TypeRef::NonNull(super_inner) = super_type {
        return match maybe_subtype {
            TypeRef::NonNull(sub_inner) => is_type_sub_type_of(schema, sub_inner, super_inner),
            _ => false,
        };
    }

    // A nullable supertype admits a non-null subtype of its base
    let maybe_subtype = maybe_subtype.nullable();

    if let TypeRef::List(super_inner) = super_type {
        return match maybe_subtype {
            TypeRef::List(sub_inner) => is_type_sub_type_of(schema, sub_inner, super_inner),
            _ => false,
        };
    }
    if matches!(maybe_subtype, TypeRef::List(_)) {
        return false;
    }

    // Base case: a concrete member of an abstract supertype
    match (maybe_subtype, super_type) {
        (TypeRef::Named(sub_name), TypeRef::Named(super_name)) => {
            let super_def = schema.type_definition(super_name);
            let sub_def = schema.type_definition(sub_name);
            matches!(super_def, Some(def) if def.is_abstract())
                && matches!(sub_def, Some(TypeDefinition::Object(_)))
                && schema.is_possible_type(super_name, sub_name)
        }
        _ => false,
    }
}

/// Check if two types could ever reference overlapping sets of objects
///
/// Used to decide whether two fragment conditions can both apply.
pub fn do_types_overlap(schema: &Schema, a: &TypeRef, b: &TypeRef) -> bool {
    if is_equal_type(a, b) {
        return true;
    }

    let (TypeRef::Named(a_name), TypeRef::Named(b_name)) = (a, b) else {
        return false;
    };
    let (Some(a_def), Some(b_def)) = (
        schema.type_definition(a_name),
        schema.type_definition(b_name),
    ) else {
        return false;
    };

    match (a_def.is_abstract(), b_def.is_abstract()) {
        // Two abstract types overlap when their possible sets intersect
        (true, true) => schema
            .possible_types(a_name)
            .iter()
            .any(|possible| schema.is_possible_type(b_name, possible)),
        (true, false) => schema.is_possible_type(a_name, b_name),
        (false, true) => schema.is_possible_type(b_name, a_name),
        (false, false) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FieldDefinition, InterfaceType, ObjectType, ScalarType, UnionType,
    };
    use indexmap::IndexMap;

    fn schema() -> Schema {
        let mut types = IndexMap::new();
        types.insert(
            "String".to_string(),
            TypeDefinition::Scalar(ScalarType::new("String")),
        );
        for name in ["Dog", "Cat", "Fish"] {
            types.insert(
                name.to_string(),
                TypeDefinition::Object(ObjectType {
                    name: name.to_string(),
                    description: None,
                    interfaces: if name == "Fish" { vec![] } else { vec!["Pet".to_string()] },
                    fields: [(
                        "name".to_string(),
                        FieldDefinition::new("name", TypeRef::named("String")),
                    )]
                    .into_iter()
                    .collect(),
                }),
            );
        }
        types.insert(
            "Pet".to_string(),
            TypeDefinition::Interface(InterfaceType {
                name: "Pet".to_string(),
                description: None,
                fields: [(
                    "name".to_string(),
                    FieldDefinition::new("name", TypeRef::named("String")),
                )]
                .into_iter()
                .collect(),
                possible_types: vec!["Dog".to_string(), "Cat".to_string()],
            }),
        );
        types.insert(
            "CatOrFish".to_string(),
            TypeDefinition::Union(UnionType {
                name: "CatOrFish".to_string(),
                description: None,
                members: vec!["Cat".to_string(), "Fish".to_string()],
            }),
        );
        types.insert(
            "FishOnly".to_string(),
            TypeDefinition::Union(UnionType {
                name: "FishOnly".to_string(),
                description: None,
                members: vec!["Fish".to_string()],
            }),
        );
        Schema::new(types, IndexMap::new(), None, None, None)
    }

    fn named(name: &str) -> TypeRef {
        TypeRef::named(name)
    }

    #[test]
    fn test_equality_is_structural() {
        assert!(is_equal_type(&named("Dog"), &named("Dog")));
        assert!(!is_equal_type(&named("Dog"), &named("Cat")));
        assert!(is_equal_type(
            &TypeRef::list(named("Dog")),
            &TypeRef::list(named("Dog"))
        ));
        assert!(!is_equal_type(&TypeRef::list(named("Dog")), &named("Dog")));
        assert!(!is_equal_type(
            &TypeRef::non_null(named("Dog")),
            &named("Dog")
        ));
    }

    #[test]
    fn test_subtype_is_reflexive() {
        let s = schema();
        for ty in [named("Dog"), TypeRef::list(named("Pet")), TypeRef::non_null(named("String"))] {
            assert!(is_type_sub_type_of(&s, &ty, &ty));
        }
    }

    #[test]
    fn test_non_null_narrowing() {
        let s = schema();
        let string = named("String");
        let non_null_string = TypeRef::non_null(named("String"));
        assert!(is_type_sub_type_of(&s, &non_null_string, &string));
        assert!(!is_type_sub_type_of(&s, &string, &non_null_string));
    }

    #[test]
    fn test_list_variance() {
        let s = schema();
        let list_dog = TypeRef::list(named("Dog"));
        let list_pet = TypeRef::list(named("Pet"));
        assert!(is_type_sub_type_of(&s, &list_dog, &list_pet));
        assert!(!is_type_sub_type_of(&s, &list_pet, &list_dog));
        // A list never relates to its element type
        assert!(!is_type_sub_type_of(&s, &list_dog, &named("Dog")));
        assert!(!is_type_sub_type_of(&s, &named("Dog"), &list_dog));
    }

    #[test]
    fn test_member_of_abstract() {
        let s = schema();
        assert!(is_type_sub_type_of(&s, &named("Dog"), &named("Pet")));
        assert!(is_type_sub_type_of(&s, &named("Cat"), &named("CatOrFish")));
        assert!(!is_type_sub_type_of(&s, &named("Dog"), &named("CatOrFish")));
        // The relation is directional
        assert!(!is_type_sub_type_of(&s, &named("Pet"), &named("Dog")));
    }

    #[test]
    fn test_overlap() {
        let s = schema();
        // Identity
        assert!(do_types_overlap(&s, &named("Pet"), &named("Pet")));
        // Abstract vs abstract: Cat is in both
        assert!(do_types_overlap(&s, &named("Pet"), &named("CatOrFish")));
        assert!(!do_types_overlap(&s, &named("Pet"), &named("FishOnly")));
        // Abstract vs concrete
        assert!(do_types_overlap(&s, &named("Pet"), &named("Dog")));
        assert!(do_types_overlap(&s, &named("Fish"), &named("FishOnly")));
        assert!(!do_types_overlap(&s, &named("Pet"), &named("Fish")));
        // Concrete vs concrete
        assert!(!do_types_overlap(&s, &named("Dog"), &named("Cat")));
    }
}
