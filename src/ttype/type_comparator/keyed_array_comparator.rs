use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};

use super::{type_comparison_result::TypeComparisonResult, union_type_comparator};

pub(crate) fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let mut all_types_contain = true;

    match (container_type_part, input_type_part) {
        (
            TAtomic::TKeyedArray {
                properties: container_properties,
                is_list: container_is_list,
                fallback_params: container_fallback_params,
                ..
            },
            TAtomic::TKeyedArray {
                properties: input_properties,
                is_list: input_is_list,
                fallback_params: input_fallback_params,
                ..
            },
        ) => {
            if *container_is_list && !*input_is_list {
                atomic_comparison_result.type_coerced = Some(true);
                return false;
            }

            for (key, container_property_type) in container_properties {
                if !is_property_contained_by(
                    codebase,
                    file_path,
                    input_properties.get(key),
                    container_property_type,
                    allow_interface_equality,
                    atomic_comparison_result,
                ) {
                    all_types_contain = false;
                }
            }

            if let (
                Some((_, container_fallback_value)),
                Some((_, input_fallback_value)),
            ) = (container_fallback_params, input_fallback_params)
            {
                if !is_property_contained_by(
                    codebase,
                    file_path,
                    Some(input_fallback_value),
                    container_fallback_value,
                    allow_interface_equality,
                    atomic_comparison_result,
                ) {
                    all_types_contain = false;
                }
            }
        }
        (
            TAtomic::TObjectWithProperties {
                properties: container_properties,
                methods: container_methods,
                ..
            },
            TAtomic::TObjectWithProperties {
                properties: input_properties,
                methods: input_methods,
                ..
            },
        ) => {
            for (property_name, container_property_type) in container_properties {
                if !is_property_contained_by(
                    codebase,
                    file_path,
                    input_properties.get(property_name),
                    container_property_type,
                    allow_interface_equality,
                    atomic_comparison_result,
                ) {
                    all_types_contain = false;
                }
            }

            if container_methods
                .keys()
                .any(|method_name| !input_methods.contains_key(method_name))
            {
                all_types_contain = false;
            }
        }
        _ => return false,
    }

    all_types_contain
}

/// A named object against `object{...}`: every listed property has to be
/// declared on the class (or inherited) with a compatible type.
pub(crate) fn is_contained_by_object_with_properties(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let input_name = if let TAtomic::TNamedObject { name, .. } = input_type_part {
        name
    } else {
        return false;
    };

    let (container_properties, container_methods) = if let TAtomic::TObjectWithProperties {
        properties,
        methods,
        ..
    } = container_type_part
    {
        (properties, methods)
    } else {
        return false;
    };

    if !codebase.class_or_interface_exists(input_name) {
        return false;
    }

    let mut all_types_contain = true;

    for (property_name, container_property_type) in container_properties {
        if !codebase.property_exists(input_name, property_name) {
            if !container_property_type.possibly_undefined {
                all_types_contain = false;
            }

            continue;
        }

        let property_type = match codebase.get_property(input_name, property_name) {
            Ok(property_info) => &property_info.type_,
            Err(error) => {
                codebase.logger.log_debug(&format!("{}", error));
                all_types_contain = false;
                continue;
            }
        };

        if !is_property_contained_by(
            codebase,
            file_path,
            Some(property_type),
            container_property_type,
            allow_interface_equality,
            atomic_comparison_result,
        ) {
            all_types_contain = false;
        }
    }

    for method_name in container_methods.keys() {
        if !codebase.method_exists(input_name, method_name) {
            all_types_contain = false;
        }
    }

    all_types_contain
}

fn is_property_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_property_type: Option<&TUnion>,
    container_property_type: &TUnion,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let input_property_type = if let Some(input_property_type) = input_property_type {
        input_property_type
    } else {
        return container_property_type.possibly_undefined;
    };

    let mut property_type_comparison = TypeComparisonResult::new();

    if union_type_comparator::is_contained_by(
        codebase,
        file_path,
        input_property_type,
        container_property_type,
        false,
        false,
        allow_interface_equality,
        &mut property_type_comparison,
    ) || property_type_comparison
        .type_coerced_from_scalar
        .unwrap_or(false)
    {
        return true;
    }

    let mut inverse_property_type_comparison = TypeComparisonResult::new();

    if union_type_comparator::is_contained_by(
        codebase,
        file_path,
        container_property_type,
        input_property_type,
        false,
        false,
        allow_interface_equality,
        &mut inverse_property_type_comparison,
    ) || inverse_property_type_comparison
        .type_coerced_from_scalar
        .unwrap_or(false)
    {
        atomic_comparison_result.type_coerced = Some(true);
    }

    false
}
