use indexmap::IndexMap;
use sigil_code_info::code_location::FilePath;
use sigil_code_info::t_atomic::ArrayKey;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};

use crate::{
    get_array_from_class_string_map, get_array_from_list, get_generic_array_type,
    get_list_from_keyed_array,
};

use super::generic_type_comparator::update_result_from_nested;
use super::{keyed_array_comparator, type_comparison_result::TypeComparisonResult};
use super::union_type_comparator;

pub(crate) fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let mut all_types_contain = true;

    if let TAtomic::TKeyedArray { .. } = container_type_part {
        if let Some(input_as_shape) = get_shape_from_literal_keyed_array(input_type_part) {
            return keyed_array_comparator::is_contained_by(
                codebase,
                file_path,
                &input_as_shape,
                container_type_part,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }
    }

    let mut input_type_part = input_type_part.clone();

    if let TAtomic::TList {
        type_param: container_param,
        non_empty: container_non_empty,
        ..
    } = container_type_part
    {
        let input_list = match &input_type_part {
            TAtomic::TKeyedArray { is_list: true, .. } => {
                get_list_from_keyed_array(&input_type_part)
            }
            TAtomic::TKeyedArray { .. } | TAtomic::TClassStringMap { .. } => {
                return false;
            }
            TAtomic::TArray { value_param, .. } if value_param.is_nothing() => {
                return !*container_non_empty;
            }
            _ => None,
        };

        if let Some(input_list) = input_list {
            input_type_part = input_list;
        }

        if let TAtomic::TList {
            type_param: input_param,
            non_empty: input_non_empty,
            ..
        } = &input_type_part
        {
            return union_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_param,
                container_param,
                false,
                input_param.ignore_falsable_issues,
                allow_interface_equality,
                atomic_comparison_result,
            ) && (*input_non_empty || !*container_non_empty);
        }
    }

    let container_type_part = match container_type_part {
        TAtomic::TKeyedArray { .. } => get_generic_array_type(container_type_part),
        TAtomic::TClassStringMap { .. } => get_array_from_class_string_map(container_type_part),
        TAtomic::TList { .. } => {
            // an array<int, T> is never structurally a list
            all_types_contain = false;
            atomic_comparison_result.type_coerced = Some(true);
            get_array_from_list(container_type_part)
        }
        _ => Some(container_type_part.clone()),
    };

    let input_type_part = match input_type_part {
        TAtomic::TKeyedArray { .. } => get_generic_array_type(&input_type_part),
        TAtomic::TClassStringMap { .. } => get_array_from_class_string_map(&input_type_part),
        TAtomic::TList { .. } => get_array_from_list(&input_type_part),
        _ => Some(input_type_part),
    };

    let (
        input_key_param,
        input_value_param,
        input_non_empty,
        container_key_param,
        container_value_param,
        container_non_empty,
    ) = match (input_type_part, container_type_part) {
        (
            Some(TAtomic::TArray {
                key_param: input_key_param,
                value_param: input_value_param,
                non_empty: input_non_empty,
                ..
            }),
            Some(TAtomic::TArray {
                key_param: container_key_param,
                value_param: container_value_param,
                non_empty: container_non_empty,
                ..
            }),
        ) => (
            input_key_param,
            input_value_param,
            input_non_empty,
            container_key_param,
            container_value_param,
            container_non_empty,
        ),
        _ => return false,
    };

    let param_pairs = [
        (&input_key_param, &container_key_param),
        (&input_value_param, &container_value_param),
    ];

    for (i, (input_param, container_param)) in param_pairs.into_iter().enumerate() {
        if i == 0
            && input_param.has_mixed()
            && container_param.has_string()
            && container_param.has_int()
        {
            continue;
        }

        if input_param.is_nothing() {
            if container_non_empty {
                return false;
            }

            continue;
        }

        let mut param_comparison_result = TypeComparisonResult::new();

        if !union_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_param,
            container_param,
            false,
            input_param.ignore_falsable_issues,
            allow_interface_equality,
            &mut param_comparison_result,
        ) {
            update_result_from_nested(atomic_comparison_result, &param_comparison_result);

            if !param_comparison_result
                .type_coerced_from_as_mixed
                .unwrap_or(false)
            {
                all_types_contain = false;
            }
        }
    }

    if container_non_empty && !input_non_empty {
        if all_types_contain {
            atomic_comparison_result.type_coerced = Some(true);
        }

        return false;
    }

    if all_types_contain {
        atomic_comparison_result.to_string_cast = Some(false);

        return true;
    }

    false
}

/// `array<'a'|'b', T>` as the shape `array{a?: T, b?: T}`. A non-empty array
/// with a single literal key defines that key.
fn get_shape_from_literal_keyed_array(array: &TAtomic) -> Option<TAtomic> {
    let (key_param, value_param, non_empty) = if let TAtomic::TArray {
        key_param,
        value_param,
        non_empty,
        ..
    } = array
    {
        (key_param, value_param, non_empty)
    } else {
        return None;
    };

    if key_param.types.is_empty() {
        return None;
    }

    let possibly_undefined = !(*non_empty && key_param.types.len() == 1);

    let mut properties = IndexMap::new();

    for key_atomic in key_param.types.values() {
        let key = match key_atomic {
            TAtomic::TLiteralString { value } => ArrayKey::String(value.clone()),
            TAtomic::TLiteralInt { value } => ArrayKey::Int(*value),
            _ => return None,
        };

        let mut property_type: TUnion = value_param.clone();
        property_type.possibly_undefined = possibly_undefined;

        properties.insert(key, property_type);
    }

    Some(TAtomic::TKeyedArray {
        properties,
        is_list: false,
        is_callable: false,
        fallback_params: None,
    })
}
