//! Substitutability checks across two graphs
//!
//! The two compared references live in different graphs, so the named base
//! case is name identity and wrapper recursion mirrors the single-graph
//! subtype relation; abstract possible-type membership is deliberately not
//! consulted across graphs.

use octofhir_graphql_types::TypeRef;

/// An output position change is safe when every old reader still works:
/// the new type must be the old type or a non-null narrowing of it.
pub(crate) fn is_change_safe_for_output(old: &TypeRef, new: &TypeRef) -> bool {
    match old {
        TypeRef::Named(old_name) => match new {
            TypeRef::Named(new_name) => old_name == new_name,
            // Narrowing to non-null is safe for readers
            TypeRef::NonNull(new_inner) => is_change_safe_for_output(old, new_inner),
            TypeRef::List(_) => false,
        },
        TypeRef::List(old_inner) => match new {
            TypeRef::List(new_inner) => is_change_safe_for_output(old_inner, new_inner),
            TypeRef::NonNull(new_inner) => is_change_safe_for_output(old, new_inner),
            TypeRef::Named(_) => false,
        },
        TypeRef::NonNull(old_inner) => match new {
            TypeRef::NonNull(new_inner) => is_change_safe_for_output(old_inner, new_inner),
            _ => false,
        },
    }
}

/// An input position change is safe when every old writer still works:
/// the old type must satisfy the new type, so loosening non-null is safe
/// and tightening is not.
pub(crate) fn is_change_safe_for_input(old: &TypeRef, new: &TypeRef) -> bool {
    match old {
        TypeRef::List(old_inner) => match new {
            TypeRef::List(new_inner) => is_change_safe_for_input(old_inner, new_inner),
            _ => false,
        },
        TypeRef::NonNull(old_inner) => match new {
            TypeRef::NonNull(new_inner) => is_change_safe_for_input(old_inner, new_inner),
            // Loosening to nullable still accepts every old input
            new_type => is_change_safe_for_input(old_inner, new_type),
        },
        TypeRef::Named(old_name) => match new {
            TypeRef::Named(new_name) => old_name == new_name,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeRef {
        TypeRef::named(name)
    }

    #[test]
    fn test_output_non_null_narrowing_is_safe() {
        let string = named("String");
        let non_null = TypeRef::non_null(named("String"));
        assert!(is_change_safe_for_output(&string, &non_null));
        assert!(!is_change_safe_for_output(&non_null, &string));
    }

    #[test]
    fn test_output_name_change_is_unsafe() {
        assert!(!is_change_safe_for_output(&named("String"), &named("Int")));
    }

    #[test]
    fn test_output_list_recursion() {
        let list = TypeRef::list(named("Int"));
        let non_null_list = TypeRef::non_null(TypeRef::list(TypeRef::non_null(named("Int"))));
        assert!(is_change_safe_for_output(&list, &non_null_list));
        assert!(!is_change_safe_for_output(&list, &named("Int")));
        assert!(!is_change_safe_for_output(&named("Int"), &list));
    }

    #[test]
    fn test_input_non_null_loosening_is_safe() {
        let string = named("String");
        let non_null = TypeRef::non_null(named("String"));
        assert!(is_change_safe_for_input(&non_null, &string));
        assert!(!is_change_safe_for_input(&string, &non_null));
    }

    #[test]
    fn test_input_list_must_stay_list() {
        let list = TypeRef::list(named("Int"));
        assert!(is_change_safe_for_input(&list, &list));
        assert!(!is_change_safe_for_input(&list, &named("Int")));
        assert!(!is_change_safe_for_input(&named("Int"), &list));
    }
}
