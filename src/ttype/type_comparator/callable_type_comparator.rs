use sigil_code_info::code_location::FilePath;
use sigil_code_info::functionlike_info::FunctionLikeInfo;
use sigil_code_info::method_identifier::MethodIdentifier;
use sigil_code_info::t_atomic::ArrayKey;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};
use sigil_code_info::{STR_CLOSURE, STR_INVOKE};

use crate::type_expander::{self, StaticClassType, TypeExpansionOptions};
use crate::get_mixed;

use super::{type_comparison_result::TypeComparisonResult, union_type_comparator};

/// What a `[class, method]` array literal refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum CallableArrayTarget {
    NotCallable,
    /// Could be callable, but the target can't be pinned down statically.
    Ambiguous,
    Method(MethodIdentifier),
}

pub fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let (input_params, input_return_type, input_is_pure) = match input_type_part {
        TAtomic::TCallable {
            params,
            return_type,
            is_pure,
        }
        | TAtomic::TClosure {
            params,
            return_type,
            is_pure,
        } => (params, return_type, is_pure),
        _ => return false,
    };

    let (container_params, container_return_type, container_is_pure) = match container_type_part {
        TAtomic::TCallable {
            params,
            return_type,
            is_pure,
        }
        | TAtomic::TClosure {
            params,
            return_type,
            is_pure,
        } => (params, return_type, is_pure),
        _ => return false,
    };

    if container_is_pure.unwrap_or(false) && !input_is_pure.unwrap_or(false) {
        atomic_comparison_result.type_coerced = Some(input_is_pure.is_none());

        return false;
    }

    if container_params.is_some() && input_params.is_none() {
        atomic_comparison_result.type_coerced = Some(true);
        atomic_comparison_result.type_coerced_from_mixed = Some(true);

        return false;
    }

    if let (Some(input_params), Some(container_params)) = (input_params, container_params) {
        for (i, input_param) in input_params.iter().enumerate() {
            let container_param = if let Some(container_param) = container_params.get(i) {
                Some(container_param)
            } else {
                container_params.last().filter(|last_param| last_param.is_variadic)
            };

            let container_param = if let Some(container_param) = container_param {
                container_param
            } else {
                if input_param.is_optional {
                    break;
                }

                return false;
            };

            if let Some(container_param_type) = &container_param.signature_type {
                if container_param_type.has_mixed() {
                    continue;
                }

                let input_param_type = input_param
                    .signature_type
                    .clone()
                    .unwrap_or_else(get_mixed);

                if !union_type_comparator::is_contained_by(
                    codebase,
                    file_path,
                    container_param_type,
                    &input_param_type,
                    false,
                    false,
                    false,
                    atomic_comparison_result,
                ) {
                    return false;
                }
            }
        }
    }

    if let Some(container_return_type) = container_return_type {
        let input_return_type = if let Some(input_return_type) = input_return_type {
            input_return_type
        } else {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_mixed = Some(true);

            return false;
        };

        if input_return_type.is_void() && container_return_type.has_type("null") {
            return true;
        }

        if !container_return_type.is_void()
            && !union_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_return_type,
                container_return_type,
                false,
                false,
                false,
                atomic_comparison_result,
            )
        {
            return false;
        }
    }

    true
}

pub fn is_not_explicitly_callable_type_callable(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    match input_type_part {
        TAtomic::TList {
            type_param: value_param,
            is_callable,
            ..
        }
        | TAtomic::TArray {
            value_param,
            is_callable,
            ..
        } => {
            if value_param.is_mixed() || value_param.has_scalar() {
                atomic_comparison_result.type_coerced_from_mixed = Some(true);
                atomic_comparison_result.type_coerced = Some(true);

                return false;
            }

            if !value_param.has_string() {
                return false;
            }

            if !is_callable {
                atomic_comparison_result.type_coerced_from_mixed = Some(true);
                atomic_comparison_result.type_coerced = Some(true);

                return false;
            }
        }
        TAtomic::TKeyedArray { .. } => {
            match get_callable_method_id_from_keyed_array(codebase, file_path, input_type_part) {
                CallableArrayTarget::NotCallable => return false,
                CallableArrayTarget::Ambiguous => return true,
                CallableArrayTarget::Method(method_id) => {
                    let resolved = codebase
                        .get_declaring_method_id(&method_id)
                        .and_then(|declaring_method_id| codebase.get_method(&declaring_method_id));

                    if let Err(error) = resolved {
                        codebase.logger.log_debug(&format!(
                            "Callable array {} does not resolve: {}",
                            input_type_part.get_id(),
                            error
                        ));

                        return false;
                    }
                }
            }
        }
        _ => (),
    }

    if let Some(input_callable) =
        get_callable_from_atomic(codebase, file_path, input_type_part, Some(container_type_part))
    {
        if !is_contained_by(
            codebase,
            file_path,
            &input_callable,
            container_type_part,
            atomic_comparison_result,
        ) {
            return false;
        }
    }

    true
}

/// The callable signature an atomic stands for, when one can be resolved.
/// `container_type_part` picks between builtin function overloads.
pub fn get_callable_from_atomic(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: Option<&TAtomic>,
) -> Option<TAtomic> {
    match input_type_part {
        TAtomic::TCallable { .. } | TAtomic::TClosure { .. } => Some(input_type_part.clone()),
        TAtomic::TLiteralString { value } => {
            if value.is_empty() {
                return None;
            }

            if let Some((class_name, method_name)) = value.split_once("::") {
                let method_id = MethodIdentifier(
                    class_name.trim_start_matches('\\').to_string(),
                    method_name.to_ascii_lowercase(),
                );

                return get_callable_from_method_id(codebase, &method_id);
            }

            if let Ok(function_storage) = codebase.get_function(value) {
                return Some(get_callable_from_functionlike(function_storage, None));
            }

            if let Ok(overloads) = codebase.get_call_map_overloads(value) {
                return get_matching_call_map_overload(
                    codebase,
                    file_path,
                    overloads,
                    container_type_part,
                );
            }

            None
        }
        TAtomic::TKeyedArray { .. } => {
            if let CallableArrayTarget::Method(method_id) =
                get_callable_method_id_from_keyed_array(codebase, file_path, input_type_part)
            {
                get_callable_from_method_id(codebase, &method_id)
            } else {
                None
            }
        }
        TAtomic::TNamedObject { name, .. } => {
            if name.eq_ignore_ascii_case(STR_CLOSURE) {
                return Some(TAtomic::TCallable {
                    params: None,
                    return_type: None,
                    is_pure: None,
                });
            }

            if codebase.class_exists(name) && codebase.method_exists(name, STR_INVOKE) {
                return get_callable_from_method_id(
                    codebase,
                    &MethodIdentifier(name.clone(), STR_INVOKE.to_string()),
                );
            }

            None
        }
        _ => None,
    }
}

/// Works out which method a `[class, 'method']` array refers to. Method
/// names that can't be resolved statically are recorded against the file
/// as mixed member accesses.
pub fn get_callable_method_id_from_keyed_array(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
) -> CallableArrayTarget {
    let properties = if let TAtomic::TKeyedArray { properties, .. } = input_type_part {
        properties
    } else {
        return CallableArrayTarget::NotCallable;
    };

    let (lhs, rhs) = match (
        properties.get(&ArrayKey::Int(0)),
        properties.get(&ArrayKey::Int(1)),
    ) {
        (Some(lhs), Some(rhs)) if properties.len() == 2 => (lhs, rhs),
        _ => return CallableArrayTarget::NotCallable,
    };

    let rhs_low_info = rhs.has_mixed() || rhs.has_scalar();

    let method_name = if let (false, Some(method_name)) = (rhs_low_info, rhs.get_single_string_literal())
    {
        method_name
    } else {
        if !rhs_low_info && !rhs.has_string() {
            return CallableArrayTarget::NotCallable;
        }

        for lhs_atomic_type in lhs.types.values() {
            if let TAtomic::TNamedObject { name, .. } = lhs_atomic_type {
                codebase.add_mixed_member_name(
                    format!("{}::", name.to_ascii_lowercase()),
                    file_path,
                );
            }
        }

        return CallableArrayTarget::Ambiguous;
    };

    let class_name = get_callable_array_class_name(lhs);

    if let Some(class_name) = &class_name {
        if matches!(class_name.as_str(), "self" | "static" | "parent") {
            return CallableArrayTarget::Ambiguous;
        }
    }

    if let Some(class_name) = class_name {
        CallableArrayTarget::Method(MethodIdentifier(
            class_name,
            method_name.to_ascii_lowercase(),
        ))
    } else {
        codebase.add_mixed_member_name(method_name.to_ascii_lowercase(), file_path);

        CallableArrayTarget::Ambiguous
    }
}

fn get_callable_array_class_name(lhs: &TUnion) -> Option<String> {
    match lhs.get_single()? {
        TAtomic::TLiteralString { value } => Some(value.trim_start_matches('\\').to_string()),
        TAtomic::TLiteralClassString { name } => Some(name.trim_start_matches('\\').to_string()),
        TAtomic::TNamedObject { name, .. } => Some(name.clone()),
        TAtomic::TClassString {
            as_type: Some(as_type),
            ..
        } => {
            if let TAtomic::TNamedObject { name, .. } = &**as_type {
                Some(name.clone())
            } else {
                None
            }
        }
        TAtomic::TClassString { as_, .. } if as_ != "object" => Some(as_.clone()),
        _ => None,
    }
}

fn get_callable_from_method_id(
    codebase: &CodebaseInfo,
    method_id: &MethodIdentifier,
) -> Option<TAtomic> {
    let resolved = codebase
        .get_declaring_method_id(method_id)
        .and_then(|declaring_method_id| codebase.get_method(&declaring_method_id));

    let method_storage = match resolved {
        Ok(method_storage) => method_storage,
        Err(error) => {
            codebase.logger.log_debug(&format!(
                "Could not build a callable for {}: {}",
                method_id, error
            ));

            return None;
        }
    };

    let calling_class = codebase.get_classlike_info(&method_id.0);

    let self_class = calling_class.map(|classlike_storage| classlike_storage.name.as_str());

    let parent_class = calling_class
        .and_then(|classlike_storage| classlike_storage.direct_parent_class.as_ref())
        .and_then(|parent_class| codebase.get_classlike_info(parent_class))
        .map(|parent_storage| parent_storage.name.as_str());

    let expansion_options = TypeExpansionOptions {
        self_class,
        static_class_type: if let Some(self_class) = self_class {
            StaticClassType::Name(self_class)
        } else {
            StaticClassType::None
        },
        parent_class,
        function_is_final: calling_class
            .map(|classlike_storage| classlike_storage.is_final)
            .unwrap_or(false),
    };

    Some(get_callable_from_functionlike(
        method_storage,
        Some((codebase, &expansion_options)),
    ))
}

fn get_callable_from_functionlike(
    functionlike_storage: &FunctionLikeInfo,
    expansion: Option<(&CodebaseInfo, &TypeExpansionOptions)>,
) -> TAtomic {
    let mut return_type = functionlike_storage.return_type.clone();

    if let (Some(return_type), Some((codebase, expansion_options))) = (&mut return_type, expansion)
    {
        type_expander::expand_union(codebase, return_type, expansion_options);
    }

    TAtomic::TCallable {
        params: Some(functionlike_storage.params.clone()),
        return_type,
        is_pure: Some(functionlike_storage.is_pure),
    }
}

/// The first builtin overload whose params accept the container's declared
/// param types, falling back to the first overload.
fn get_matching_call_map_overload(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    overloads: &[TAtomic],
    container_type_part: Option<&TAtomic>,
) -> Option<TAtomic> {
    let container_params = match container_type_part {
        Some(TAtomic::TCallable {
            params: Some(params),
            ..
        })
        | Some(TAtomic::TClosure {
            params: Some(params),
            ..
        }) => params,
        _ => return overloads.first().cloned(),
    };

    'outer: for overload in overloads {
        let overload_params = if let TAtomic::TCallable {
            params: Some(params),
            ..
        } = overload
        {
            params
        } else {
            continue;
        };

        for (i, container_param) in container_params.iter().enumerate() {
            let overload_param = if let Some(overload_param) = overload_params.get(i) {
                overload_param
            } else if let Some(last_param) =
                overload_params.last().filter(|last_param| last_param.is_variadic)
            {
                last_param
            } else {
                continue 'outer;
            };

            if let (Some(argument_type), Some(overload_param_type)) =
                (&container_param.signature_type, &overload_param.signature_type)
            {
                let mut argument_comparison_result = TypeComparisonResult::new();

                if !union_type_comparator::is_contained_by(
                    codebase,
                    file_path,
                    argument_type,
                    overload_param_type,
                    false,
                    false,
                    false,
                    &mut argument_comparison_result,
                ) {
                    continue 'outer;
                }
            }
        }

        return Some(overload.clone());
    }

    overloads.first().cloned()
}
