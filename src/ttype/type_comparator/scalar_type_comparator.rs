use sigil_code_info::code_location::FilePath;
use sigil_code_info::t_atomic::is_numeric_literal;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic};

use crate::get_arrayish_params;

use super::{
    callable_type_comparator, class_string_comparator,
    type_comparison_result::TypeComparisonResult, union_type_comparator,
};

/// Every value `gettype()` can return.
const GETTYPE_TYPES: [&str; 10] = [
    "boolean",
    "integer",
    "double",
    "string",
    "array",
    "object",
    "resource",
    "resource (closed)",
    "NULL",
    "unknown type",
];

pub fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    allow_float_int_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    // normalise the get_class / gettype / get_debug_type types first

    let normalized_container;
    let container_type_part = if let TAtomic::TDependentGetClass { as_type } = container_type_part
    {
        normalized_container = TAtomic::TClassString {
            as_: "object".to_string(),
            as_type: get_named_object_bound(as_type.types.values().next()),
        };
        &normalized_container
    } else {
        container_type_part
    };

    let normalized_input;
    let input_type_part = match input_type_part {
        TAtomic::TDependentGetClass { as_type } => {
            normalized_input = match as_type.types.values().next() {
                Some(TAtomic::TTemplateParam {
                    param_name,
                    as_type: template_as_type,
                    defining_entity,
                    ..
                }) => {
                    let object_type = get_named_object_bound(template_as_type.types.values().next());

                    TAtomic::TTemplateParamClass {
                        param_name: param_name.clone(),
                        defining_entity: defining_entity.clone(),
                        as_: if let Some(TAtomic::TNamedObject { name, .. }) = object_type.as_deref()
                        {
                            name.clone()
                        } else {
                            "object".to_string()
                        },
                        as_type: object_type,
                    }
                }
                first_type => TAtomic::TClassString {
                    as_: "object".to_string(),
                    as_type: get_named_object_bound(first_type),
                },
            };
            &normalized_input
        }
        TAtomic::TDependentGetType => {
            if let TAtomic::TLiteralString { value } = container_type_part {
                return GETTYPE_TYPES.contains(&value.as_str());
            }

            if let TAtomic::TDependentGetType = container_type_part {
                return true;
            }

            normalized_input = TAtomic::TString;
            &normalized_input
        }
        TAtomic::TDependentGetDebugType => {
            normalized_input = TAtomic::TString;
            &normalized_input
        }
        _ => input_type_part,
    };

    match container_type_part {
        TAtomic::TDependentGetDebugType => {
            return input_type_part.is_string_family();
        }
        TAtomic::TDependentGetType => {
            return match input_type_part {
                TAtomic::TLiteralString { value } => GETTYPE_TYPES.contains(&value.as_str()),
                TAtomic::TString | TAtomic::TNonEmptyString | TAtomic::TLowercaseString => {
                    atomic_comparison_result.type_coerced = Some(true);
                    false
                }
                _ => false,
            };
        }
        _ => (),
    }

    // compare identical families

    if let TAtomic::TString = container_type_part {
        if input_type_part.is_string_family() {
            return true;
        }
    }

    if let TAtomic::TInt = container_type_part {
        if input_type_part.is_int_family() {
            return true;
        }
    }

    if let TAtomic::TFloat = container_type_part {
        if input_type_part.is_float_family() {
            return true;
        }
    }

    if let TAtomic::TBool = container_type_part {
        if input_type_part.is_bool_family() {
            return true;
        }
    }

    if let TAtomic::TScalar = container_type_part {
        return true;
    }

    if let TAtomic::TNonEmptyString = container_type_part {
        match input_type_part {
            TAtomic::TString | TAtomic::TLowercaseString | TAtomic::THtmlEscapedString => {
                atomic_comparison_result.type_coerced = Some(true);
                return false;
            }
            TAtomic::TLiteralString { value } => {
                return !value.is_empty();
            }
            TAtomic::TNonEmptyString
            | TAtomic::TNonEmptyLowercaseString
            | TAtomic::TNumericString
            | TAtomic::TCallableString
            | TAtomic::TTraitString
            | TAtomic::TSingleLetter
            | TAtomic::TClassString { .. }
            | TAtomic::TLiteralClassString { .. }
            | TAtomic::TTemplateParamClass { .. } => {
                return true;
            }
            _ => (),
        }
    }

    if let TAtomic::TLowercaseString | TAtomic::TNonEmptyLowercaseString = container_type_part {
        if input_type_part.is_string_family() {
            return match (input_type_part, container_type_part) {
                (TAtomic::TLowercaseString, TAtomic::TLowercaseString)
                | (TAtomic::TNonEmptyLowercaseString, _) => true,
                (TAtomic::TLowercaseString, TAtomic::TNonEmptyLowercaseString) => {
                    atomic_comparison_result.type_coerced = Some(true);
                    false
                }
                (TAtomic::TLiteralString { value }, _) => {
                    value.to_ascii_lowercase() == *value
                        && (!value.is_empty()
                            || matches!(container_type_part, TAtomic::TLowercaseString))
                }
                (
                    TAtomic::TClassString { .. }
                    | TAtomic::TLiteralClassString { .. }
                    | TAtomic::TTemplateParamClass { .. },
                    _,
                ) => false,
                _ => {
                    atomic_comparison_result.type_coerced = Some(true);
                    false
                }
            };
        }
    }

    if let TAtomic::TBool = input_type_part {
        if let TAtomic::TTrue | TAtomic::TFalse = container_type_part {
            atomic_comparison_result.type_coerced = Some(true);
            return false;
        }
    }

    // from https://wiki.php.net/rfc/union_types_v2:
    // int is contained by float when strict_types is not set
    if allow_float_int_equality && input_type_part.is_int_family() {
        if let TAtomic::TFloat = container_type_part {
            return true;
        }
    }

    if let TAtomic::TTemplateKeyOf {
        as_type: container_as_type,
        ..
    } = container_type_part
    {
        if let TAtomic::TTemplateKeyOf {
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

        return false;
    }

    if let TAtomic::TArraykey = container_type_part {
        if input_type_part.is_int_family()
            || input_type_part.is_string_family()
            || matches!(
                input_type_part,
                TAtomic::TArraykey | TAtomic::TNumeric | TAtomic::TTemplateKeyOf { .. }
            )
        {
            return true;
        }
    }

    if let TAtomic::TTemplateKeyOf { as_type, .. } = input_type_part {
        for atomic_type in as_type.types.values() {
            if let Some((key_param, _)) = get_arrayish_params(atomic_type) {
                for array_key_atomic in key_param.types.values() {
                    if !is_contained_by(
                        codebase,
                        file_path,
                        array_key_atomic,
                        container_type_part,
                        allow_interface_equality,
                        allow_float_int_equality,
                        atomic_comparison_result,
                    ) {
                        return false;
                    }
                }
            }
        }

        return true;
    }

    if let TAtomic::TArraykey = input_type_part {
        if container_type_part.is_int_family() || container_type_part.is_string_family() {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_mixed = Some(true);
            atomic_comparison_result.scalar_type_match_found = Some(true);
            return false;
        }
    }

    // ints

    if let TAtomic::TPositiveInt = container_type_part {
        match input_type_part {
            TAtomic::TPositiveInt => return true,
            TAtomic::TLiteralInt { value } => return *value > 0,
            TAtomic::TInt => {
                atomic_comparison_result.type_coerced = Some(true);
                atomic_comparison_result.type_coerced_from_scalar = Some(true);
                return false;
            }
            _ => (),
        }
    }

    if let TAtomic::TLiteralInt {
        value: container_value,
    } = container_type_part
    {
        match input_type_part {
            TAtomic::TLiteralInt { value } => return value == container_value,
            TAtomic::TInt | TAtomic::TPositiveInt => {
                atomic_comparison_result.type_coerced = Some(true);
                atomic_comparison_result.type_coerced_from_scalar = Some(true);
                return false;
            }
            _ => (),
        }
    }

    if let TAtomic::TLiteralFloat {
        value: container_value,
    } = container_type_part
    {
        match input_type_part {
            TAtomic::TLiteralFloat { value } => return value == container_value,
            TAtomic::TFloat => {
                atomic_comparison_result.type_coerced = Some(true);
                atomic_comparison_result.type_coerced_from_scalar = Some(true);
                return false;
            }
            _ => (),
        }
    }

    // strings

    if let TAtomic::TSingleLetter = container_type_part {
        match input_type_part {
            TAtomic::TSingleLetter
            | TAtomic::TCallableString
            | TAtomic::TClassString { .. }
            | TAtomic::TLiteralClassString { .. }
            | TAtomic::TTemplateParamClass { .. } => return true,
            TAtomic::TLiteralString { value } => return value.chars().count() == 1,
            TAtomic::TString | TAtomic::TNonEmptyString | TAtomic::TLowercaseString => {
                atomic_comparison_result.type_coerced = Some(true);
                atomic_comparison_result.type_coerced_from_scalar = Some(true);
                return false;
            }
            _ => (),
        }
    }

    if let TAtomic::TLiteralString {
        value: container_value,
    } = container_type_part
    {
        match input_type_part {
            TAtomic::TLiteralString { value } => return value == container_value,
            TAtomic::TLiteralClassString { name } => return name == container_value,
            TAtomic::TString
            | TAtomic::TSingleLetter
            | TAtomic::TNonEmptyString
            | TAtomic::THtmlEscapedString
            | TAtomic::TCallableString
            | TAtomic::TTraitString
            | TAtomic::TClassString { .. }
            | TAtomic::TTemplateParamClass { .. } => {
                atomic_comparison_result.type_coerced = Some(true);
                atomic_comparison_result.type_coerced_from_scalar = Some(true);
                return false;
            }
            TAtomic::TLowercaseString | TAtomic::TNonEmptyLowercaseString => {
                if container_value.to_ascii_lowercase() == *container_value {
                    atomic_comparison_result.type_coerced = Some(true);
                    atomic_comparison_result.type_coerced_from_scalar = Some(true);
                }
                return false;
            }
            TAtomic::TNumericString => {
                if is_numeric_literal(container_value) {
                    atomic_comparison_result.type_coerced = Some(true);
                    atomic_comparison_result.type_coerced_from_scalar = Some(true);
                }
                return false;
            }
            _ => (),
        }
    }

    if container_type_part.is_class_string_family() {
        if input_type_part.is_class_string_family() {
            return class_string_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                allow_interface_equality,
                atomic_comparison_result,
            );
        }

        if let TAtomic::TString | TAtomic::TNonEmptyString | TAtomic::TLiteralString { .. } =
            input_type_part
        {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_scalar = Some(true);
            return false;
        }
    }

    if let TAtomic::TNumericString | TAtomic::THtmlEscapedString = container_type_part {
        if input_type_part.get_key() == container_type_part.get_key() {
            return true;
        }

        if let TAtomic::TLiteralString { value } = input_type_part {
            return is_numeric_literal(value);
        }

        if input_type_part.is_string_family() {
            atomic_comparison_result.type_coerced = Some(true);
            return false;
        }
    }

    if let TAtomic::TTraitString = container_type_part {
        if let TAtomic::TString | TAtomic::TNonEmptyString = input_type_part {
            atomic_comparison_result.type_coerced = Some(true);
            return false;
        }
    }

    if let TAtomic::TCallableString = container_type_part {
        match input_type_part {
            TAtomic::TLiteralString { .. } => {
                let input_callable = callable_type_comparator::get_callable_from_atomic(
                    codebase,
                    file_path,
                    input_type_part,
                    None,
                );

                return if input_callable.is_some() {
                    true
                } else {
                    atomic_comparison_result.type_coerced = Some(true);
                    atomic_comparison_result.type_coerced_from_scalar = Some(true);
                    false
                };
            }
            TAtomic::TString
            | TAtomic::TNonEmptyString
            | TAtomic::TLowercaseString
            | TAtomic::TNonEmptyLowercaseString => {
                atomic_comparison_result.type_coerced = Some(true);
                return false;
            }
            _ => (),
        }
    }

    // fallbacks

    if input_type_part.get_key() == container_type_part.get_key() {
        return true;
    }

    if input_type_part.is_class_string_family() && container_type_part.is_string_family() {
        atomic_comparison_result.type_coerced = Some(true);
        return false;
    }

    if let TAtomic::TNumeric = container_type_part {
        if input_type_part.is_numeric_type() {
            return true;
        }
    }

    if let TAtomic::TScalar | TAtomic::TNumeric = input_type_part {
        atomic_comparison_result.type_coerced = Some(true);

        if container_type_part.is_numeric_type() || container_type_part.is_string_family() {
            atomic_comparison_result.scalar_type_match_found = Some(true);
        }

        return false;
    }

    if input_type_part.is_numeric_type() && container_type_part.is_numeric_type() {
        atomic_comparison_result.scalar_type_match_found = Some(true);
    }

    false
}

fn get_named_object_bound(atomic: Option<&TAtomic>) -> Option<Box<TAtomic>> {
    if let Some(named_object @ TAtomic::TNamedObject { .. }) = atomic {
        Some(Box::new(named_object.clone()))
    } else {
        None
    }
}
