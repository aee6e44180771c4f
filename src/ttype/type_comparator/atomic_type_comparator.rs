use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};
use sigil_code_info::{STR_CLOSURE, STR_STDCLASS, STR_STRINGABLE, STR_TOSTRING};

use crate::get_arrayish_params;

use super::{
    array_type_comparator, callable_type_comparator, generic_type_comparator,
    keyed_array_comparator, object_type_comparator, scalar_type_comparator,
    type_comparison_result::TypeComparisonResult, union_type_comparator,
};

pub fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    allow_float_int_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    if is_template_or_intersection(container_type_part)
        && is_template_or_intersection(input_type_part)
    {
        return object_type_comparator::is_shallowly_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            allow_interface_equality,
            atomic_comparison_result,
        );
    }

    if container_type_part.is_mixed()
        || (container_type_part.is_templated_as_mixed() && input_type_part.is_mixed())
    {
        if matches!(container_type_part, TAtomic::TEmptyMixed)
            && matches!(input_type_part, TAtomic::TMixed)
        {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_mixed = Some(true);

            return false;
        }

        return true;
    }

    if let TAtomic::TNever = input_type_part {
        return true;
    }

    if input_type_part.is_mixed() || input_type_part.is_templated_as_mixed() {
        atomic_comparison_result.type_coerced = Some(true);
        atomic_comparison_result.type_coerced_from_mixed = Some(true);

        return false;
    }

    if let TAtomic::TNull = input_type_part {
        return match container_type_part {
            TAtomic::TNull => true,
            TAtomic::TTemplateParam { as_type, .. } => {
                as_type.has_type("null") || as_type.is_mixed()
            }
            _ => false,
        };
    }

    if let TAtomic::TNull = container_type_part {
        return false;
    }

    if input_type_part.is_scalar() && container_type_part.is_scalar() {
        return scalar_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            allow_interface_equality,
            allow_float_int_equality,
            atomic_comparison_result,
        );
    }

    if let TAtomic::TKeyedArray {
        is_callable: true, ..
    } = input_type_part
    {
        if let TAtomic::TArray { .. } = container_type_part {
            return array_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }
    }

    match (container_type_part, input_type_part) {
        (TAtomic::TCallable { .. }, TAtomic::TCallable { .. })
        | (TAtomic::TClosure { .. }, TAtomic::TClosure { .. })
        | (TAtomic::TCallable { .. }, TAtomic::TClosure { .. }) => {
            return callable_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                atomic_comparison_result,
            );
        }
        (TAtomic::TClosure { .. }, TAtomic::TCallable { .. }) => {
            if callable_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                atomic_comparison_result,
            ) {
                // a callable matching the signature still isn't necessarily a Closure
                atomic_comparison_result.type_coerced = Some(true);
            }

            return false;
        }
        (TAtomic::TClosure { .. }, _) => {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_mixed = Some(true);

            return false;
        }
        _ => (),
    }

    if let TAtomic::TCallable { .. } = container_type_part {
        if let TAtomic::TNamedObject { name, .. } = input_type_part {
            if name.eq_ignore_ascii_case(STR_CLOSURE) {
                return true;
            }
        }

        if let TAtomic::TObject | TAtomic::TCallableObject = input_type_part {
            return true;
        }
    }

    if let TAtomic::TCallableObject = input_type_part {
        if let TAtomic::TObject = container_type_part {
            return true;
        }
    }

    if matches!(
        (container_type_part, input_type_part),
        (TAtomic::TKeyedArray { .. }, TAtomic::TKeyedArray { .. })
            | (
                TAtomic::TObjectWithProperties { .. },
                TAtomic::TObjectWithProperties { .. }
            )
    ) {
        return keyed_array_comparator::is_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            allow_interface_equality,
            atomic_comparison_result,
        );
    }

    if input_type_part.is_array_like() && container_type_part.is_array_like() {
        return array_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            allow_interface_equality,
            atomic_comparison_result,
        );
    }

    if is_object_like_input(input_type_part)
        && is_object_like_container(container_type_part)
        && object_type_comparator::is_shallowly_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            allow_interface_equality,
            atomic_comparison_result,
        )
    {
        if let TAtomic::TNamedObject {
            type_params: Some(_),
            ..
        }
        | TAtomic::TIterable { .. } = container_type_part
        {
            return generic_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }

        if let (
            TAtomic::TNamedObject {
                was_static: true, ..
            },
            TAtomic::TNamedObject {
                was_static: false, ..
            },
        ) = (container_type_part, input_type_part)
        {
            atomic_comparison_result.type_coerced = Some(true);
            return false;
        }

        atomic_comparison_result.to_string_cast = Some(false);

        return true;
    }

    if let TAtomic::TObject = container_type_part {
        if let TAtomic::TObject
        | TAtomic::TObjectWithProperties { .. }
        | TAtomic::TCallableObject
        | TAtomic::TClosure { .. } = input_type_part
        {
            return true;
        }
    }

    if let TAtomic::TCallableObject = container_type_part {
        match input_type_part {
            TAtomic::TClosure { .. } => return true,
            TAtomic::TNamedObject { name, .. } => {
                if name.eq_ignore_ascii_case(STR_CLOSURE) || has_invoke_method(codebase, name) {
                    return true;
                }
            }
            _ => (),
        }
    }

    if let TAtomic::TTemplateParam {
        as_type: container_as_type,
        ..
    } = container_type_part
    {
        if let TAtomic::TTemplateParam {
            as_type: input_as_type,
            ..
        } = input_type_part
        {
            return union_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_as_type,
                container_as_type,
                false,
                false,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }

        for container_as_type_part in container_as_type.types.values() {
            if is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_as_type_part,
                allow_interface_equality,
                allow_float_int_equality,
                atomic_comparison_result,
            ) && (allow_interface_equality
                || matches!(input_type_part, TAtomic::TArray { value_param, .. } if !value_param.is_nothing())
                || matches!(input_type_part, TAtomic::TKeyedArray { .. }))
            {
                return true;
            }
        }

        return false;
    }

    if let TAtomic::TConditional {
        if_type, else_type, ..
    } = container_type_part
    {
        for container_as_type_part in if_type.types.values().chain(else_type.types.values()) {
            if is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_as_type_part,
                allow_interface_equality,
                allow_float_int_equality,
                atomic_comparison_result,
            ) {
                return true;
            }
        }

        return false;
    }

    if let TAtomic::TTemplateParam {
        as_type: input_as_type,
        extra_types,
        ..
    } = input_type_part
    {
        if let Some(extra_types) = extra_types {
            for extra_type in extra_types.values() {
                if is_contained_by(
                    codebase,
                    file_path,
                    extra_type,
                    container_type_part,
                    allow_interface_equality,
                    allow_float_int_equality,
                    atomic_comparison_result,
                ) {
                    return true;
                }
            }
        }

        for input_as_type_part in input_as_type.types.values() {
            if let TAtomic::TNull = input_as_type_part {
                if let TAtomic::TNull = container_type_part {
                    continue;
                }
            }

            if is_contained_by(
                codebase,
                file_path,
                input_as_type_part,
                container_type_part,
                allow_interface_equality,
                allow_float_int_equality,
                atomic_comparison_result,
            ) {
                return true;
            }
        }

        return false;
    }

    if let TAtomic::TConditional {
        if_type, else_type, ..
    } = input_type_part
    {
        for input_as_type_part in if_type.types.values().chain(else_type.types.values()) {
            if is_contained_by(
                codebase,
                file_path,
                input_as_type_part,
                container_type_part,
                allow_interface_equality,
                allow_float_int_equality,
                atomic_comparison_result,
            ) {
                return true;
            }
        }

        return false;
    }

    if let TAtomic::TNamedObject {
        name: input_name, ..
    } = input_type_part
    {
        if let TAtomic::TNamedObject {
            name: container_name,
            ..
        } = container_type_part
        {
            if input_name == "static" && container_name.eq_ignore_ascii_case("self") {
                return true;
            }
        }
    }

    if let TAtomic::TIterable {
        type_params: container_type_params,
        ..
    } = container_type_part
    {
        if let TAtomic::TArray { .. } | TAtomic::TList { .. } | TAtomic::TKeyedArray { .. } =
            input_type_part
        {
            return is_array_contained_by_iterable(
                codebase,
                file_path,
                input_type_part,
                container_type_params,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }

        if input_type_part.has_traversable_interface(codebase) {
            return true;
        }
    }

    if let TAtomic::TString | TAtomic::TScalar = container_type_part {
        if let TAtomic::TNamedObject { name, .. } = input_type_part {
            if codebase.class_or_interface_exists(name) {
                if codebase.config.php_major_version >= 8
                    && (name.eq_ignore_ascii_case(STR_STRINGABLE)
                        || (codebase.class_exists(name)
                            && codebase.class_implements(name, STR_STRINGABLE))
                        || codebase.interface_extends(name, STR_STRINGABLE))
                {
                    atomic_comparison_result.to_string_cast = Some(true);
                    return true;
                }

                if codebase.method_exists(name, STR_TOSTRING) {
                    atomic_comparison_result.to_string_cast = Some(true);
                    return true;
                }
            }

            if name == "ReflectionType" {
                atomic_comparison_result.to_string_cast = Some(true);
                return true;
            }
        } else if let TAtomic::TObjectWithProperties { methods, .. } = input_type_part {
            if methods
                .keys()
                .any(|method_name| method_name.eq_ignore_ascii_case(STR_TOSTRING))
            {
                atomic_comparison_result.to_string_cast = Some(true);
                return true;
            }
        }
    }

    if let TAtomic::TCallable { .. } = container_type_part {
        let maybe_callable = match input_type_part {
            TAtomic::TLiteralString { .. }
            | TAtomic::TCallableString
            | TAtomic::TArray { .. }
            | TAtomic::TKeyedArray { .. }
            | TAtomic::TList { .. } => true,
            TAtomic::TNamedObject { name, .. } => has_invoke_method(codebase, name),
            _ => false,
        };

        if maybe_callable {
            return callable_type_comparator::is_not_explicitly_callable_type_callable(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                atomic_comparison_result,
            );
        }
    }

    if let TAtomic::TObject | TAtomic::TObjectWithProperties { .. } = container_type_part {
        if let TAtomic::TNamedObject {
            name: input_name, ..
        } = input_type_part
        {
            if let TAtomic::TObjectWithProperties { .. } = container_type_part {
                if input_name != STR_STDCLASS {
                    return keyed_array_comparator::is_contained_by_object_with_properties(
                        codebase,
                        file_path,
                        input_type_part,
                        container_type_part,
                        allow_interface_equality,
                        atomic_comparison_result,
                    );
                }
            }

            return true;
        }
    }

    if let TAtomic::TNamedObject {
        name: container_name,
        was_static: container_was_static,
        ..
    } = container_type_part
    {
        match input_type_part {
            TAtomic::TNamedObject {
                name: input_name,
                was_static: input_was_static,
                ..
            } => {
                if *container_was_static && !*input_was_static {
                    atomic_comparison_result.type_coerced = Some(true);
                    return false;
                }

                // the container is a descendant of the input, so the input might be one
                if codebase.class_or_interface_exists(input_name)
                    && ((codebase.class_exists(container_name)
                        && codebase.class_extends_or_implements(container_name, input_name))
                        || (codebase.interface_exists(container_name)
                            && codebase.interface_extends(container_name, input_name)))
                {
                    atomic_comparison_result.type_coerced = Some(true);
                    return false;
                }
            }
            TAtomic::TObject | TAtomic::TCallableObject | TAtomic::TObjectWithProperties { .. } => {
                atomic_comparison_result.type_coerced = Some(true);
                return false;
            }
            _ => (),
        }
    }

    input_type_part.get_key() == container_type_part.get_key()
}

pub fn can_be_identical(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    type1_part: &TAtomic,
    type2_part: &TAtomic,
    allow_interface_equality: bool,
) -> bool {
    if let (
        TAtomic::TList {
            type_param: type1_param,
            non_empty: type1_non_empty,
            ..
        },
        TAtomic::TList {
            type_param: type2_param,
            non_empty: type2_non_empty,
            ..
        },
    ) = (type1_part, type2_part)
    {
        if type1_non_empty != type2_non_empty {
            return union_type_comparator::can_expression_types_be_identical(
                codebase,
                file_path,
                type1_param,
                type2_param,
                allow_interface_equality,
            );
        }
    }

    if let (
        TAtomic::TArray {
            key_param: type1_key_param,
            value_param: type1_value_param,
            non_empty: type1_non_empty,
            ..
        },
        TAtomic::TArray {
            key_param: type2_key_param,
            value_param: type2_value_param,
            non_empty: type2_non_empty,
            ..
        },
    ) = (type1_part, type2_part)
    {
        if type1_non_empty != type2_non_empty {
            return union_type_comparator::can_expression_types_be_identical(
                codebase,
                file_path,
                type1_key_param,
                type2_key_param,
                allow_interface_equality,
            ) && union_type_comparator::can_expression_types_be_identical(
                codebase,
                file_path,
                type1_value_param,
                type2_value_param,
                allow_interface_equality,
            );
        }
    }

    let mut first_comparison_result = TypeComparisonResult::new();
    let mut second_comparison_result = TypeComparisonResult::new();

    (is_contained_by(
        codebase,
        file_path,
        type1_part,
        type2_part,
        allow_interface_equality,
        false,
        &mut first_comparison_result,
    ) && !first_comparison_result.to_string_cast.unwrap_or(false))
        || (is_contained_by(
            codebase,
            file_path,
            type2_part,
            type1_part,
            allow_interface_equality,
            false,
            &mut second_comparison_result,
        ) && !second_comparison_result.to_string_cast.unwrap_or(false))
        || (first_comparison_result.type_coerced.unwrap_or(false)
            && second_comparison_result.type_coerced.unwrap_or(false))
}

fn is_template_or_intersection(atomic: &TAtomic) -> bool {
    matches!(
        atomic,
        TAtomic::TTemplateParam { .. }
            | TAtomic::TNamedObject {
                extra_types: Some(_),
                ..
            }
    )
}

fn is_object_like_input(atomic: &TAtomic) -> bool {
    match atomic {
        TAtomic::TNamedObject { .. } | TAtomic::TIterable { .. } => true,
        TAtomic::TTemplateParam { as_type, .. } => {
            as_type.types.values().any(|as_atomic| as_atomic.is_object_type())
        }
        _ => false,
    }
}

fn is_object_like_container(atomic: &TAtomic) -> bool {
    match atomic {
        TAtomic::TNamedObject { .. } | TAtomic::TIterable { .. } => true,
        TAtomic::TTemplateParam { as_type, .. } => as_type.is_objecty(),
        _ => false,
    }
}

fn has_invoke_method(codebase: &CodebaseInfo, fq_class_name: &str) -> bool {
    codebase.class_or_interface_exists(fq_class_name)
        && codebase.method_exists(fq_class_name, sigil_code_info::STR_INVOKE)
}

/// `array<K, V>`, `list<V>` and shapes against `iterable<K, V>`, or
/// `iterable<V>` where only the value param is compared.
fn is_array_contained_by_iterable(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_params: &[TUnion],
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let (input_key_param, input_value_param) =
        if let Some(params) = get_arrayish_params(input_type_part) {
            params
        } else {
            return false;
        };

    let mut all_types_contain = true;

    for (i, input_param) in [input_key_param, input_value_param].iter().enumerate() {
        // iterable<V> lines up with the value param only
        let container_param_offset = (i + container_type_params.len()).checked_sub(2);

        let container_param = if let Some(container_param) =
            container_param_offset.and_then(|offset| container_type_params.get(offset))
        {
            container_param
        } else {
            continue;
        };

        if i == 0
            && input_param.has_mixed()
            && container_param.has_string()
            && container_param.has_int()
        {
            continue;
        }

        if input_param.is_nothing() {
            continue;
        }

        let mut array_comparison_result = TypeComparisonResult::new();

        if !union_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_param,
            container_param,
            input_param.ignore_nullable_issues,
            input_param.ignore_falsable_issues,
            allow_interface_equality,
            &mut array_comparison_result,
        ) && !array_comparison_result
            .type_coerced_from_scalar
            .unwrap_or(false)
        {
            if array_comparison_result
                .type_coerced_from_mixed
                .unwrap_or(false)
            {
                atomic_comparison_result.type_coerced_from_mixed = Some(true);
            }

            all_types_contain = false;
        }
    }

    all_types_contain
}
