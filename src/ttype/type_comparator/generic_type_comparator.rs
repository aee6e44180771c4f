use sigil_code_info::classlike_info::Variance;
use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};
use sigil_code_info::{STR_GENERATOR, STR_TRAVERSABLE};

use crate::{get_mixed, template};

use super::{type_comparison_result::TypeComparisonResult, union_type_comparator};

pub(crate) fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let (container_name, container_type_params, container_remapped_params) =
        match container_type_part {
            TAtomic::TNamedObject {
                name,
                type_params: Some(type_params),
                remapped_params,
                ..
            } => (name.as_str(), type_params, *remapped_params),
            TAtomic::TIterable { type_params, .. } => (STR_TRAVERSABLE, type_params, false),
            _ => return false,
        };

    let container_is_iterable = matches!(container_type_part, TAtomic::TIterable { .. });

    let (input_type_part, already_mapped) = match get_generic_input(
        codebase,
        input_type_part,
        container_name,
        container_type_params.len(),
    ) {
        Some(generic_input) => generic_input,
        None => {
            atomic_comparison_result.type_coerced = Some(true);
            atomic_comparison_result.type_coerced_from_mixed = Some(true);
            return false;
        }
    };

    let (input_name, input_type_params, input_remapped_params) = match &input_type_part {
        TAtomic::TNamedObject {
            name,
            type_params: Some(type_params),
            remapped_params,
            ..
        } => (name.as_str(), type_params, *remapped_params),
        TAtomic::TIterable { type_params, .. } => (STR_TRAVERSABLE, type_params, false),
        _ => return false,
    };

    let input_type_params = if already_mapped {
        input_type_params.clone()
    } else {
        template::get_mapped_generic_type_params(
            codebase,
            input_name,
            input_type_params,
            container_name,
            container_remapped_params,
            input_remapped_params,
        )
    };

    let container_variance = codebase
        .get_classlike_info(container_name)
        .map(|storage| &storage.generic_variance);

    let mut all_types_contain = true;

    for (i, input_param) in input_type_params.iter().enumerate() {
        let container_param = if let Some(container_param) = container_type_params.get(i) {
            container_param
        } else {
            break;
        };

        if input_param.is_nothing() {
            suggest_param_replacement(
                atomic_comparison_result,
                &input_type_part,
                i,
                container_param,
            );
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
            // the send type of a generator is only ever known loosely
            if i == 2
                && input_name.eq_ignore_ascii_case(STR_GENERATOR)
                && param_comparison_result
                    .type_coerced_from_mixed
                    .unwrap_or(false)
            {
                continue;
            }

            update_result_from_nested(atomic_comparison_result, &param_comparison_result);

            if !param_comparison_result
                .type_coerced_from_as_mixed
                .unwrap_or(false)
            {
                all_types_contain = false;
            }

            continue;
        }

        if container_is_iterable || container_param.has_template() || input_param.has_template() {
            continue;
        }

        if input_param.has_empty_array() || input_param.has_literal_value() {
            suggest_param_replacement(
                atomic_comparison_result,
                &input_type_part,
                i,
                container_param,
            );
            continue;
        }

        let is_covariant = matches!(
            container_variance.and_then(|variance| variance.get(&i)),
            Some(Variance::Covariant)
        );

        if is_covariant || container_param.had_template {
            continue;
        }

        let mut reverse_comparison_result = TypeComparisonResult::new();

        let is_invariant_match = union_type_comparator::is_contained_by(
            codebase,
            file_path,
            container_param,
            input_param,
            false,
            container_param.ignore_falsable_issues,
            allow_interface_equality,
            &mut reverse_comparison_result,
        ) && !reverse_comparison_result.type_coerced.unwrap_or(false);

        if !is_invariant_match
            && !(container_param.has_former_static_object() && input_param.is_former_static_object())
        {
            atomic_comparison_result.type_coerced = Some(true);

            if container_param.has_mixed() || container_param.is_arraykey() {
                atomic_comparison_result.type_coerced_from_mixed = Some(true);
            } else {
                all_types_contain = false;
            }
        }
    }

    all_types_contain
}

/// Gives a plain object the type params it implies for the container class:
/// the ones it declares through `@extends`/`@implements`, or all `mixed`.
/// The flag is set when the params already line up with the container's.
fn get_generic_input(
    codebase: &CodebaseInfo,
    input_type_part: &TAtomic,
    container_name: &str,
    container_param_count: usize,
) -> Option<(TAtomic, bool)> {
    match input_type_part {
        TAtomic::TNamedObject {
            type_params: Some(_),
            ..
        }
        | TAtomic::TIterable { .. } => Some((input_type_part.clone(), false)),
        TAtomic::TNamedObject {
            name,
            was_static,
            extra_types,
            ..
        } => {
            let extended_params = codebase.get_classlike_info(name).and_then(|storage| {
                storage
                    .template_extended_params
                    .get(&container_name.to_ascii_lowercase())
            });

            let type_params = match extended_params {
                Some(extended_params) if !extended_params.is_empty() => {
                    extended_params.values().cloned().collect()
                }
                _ => vec![get_mixed(); container_param_count],
            };

            Some((
                TAtomic::TNamedObject {
                    name: name.clone(),
                    type_params: Some(type_params),
                    was_static: *was_static,
                    extra_types: extra_types.clone(),
                    remapped_params: false,
                },
                true,
            ))
        }
        _ => None,
    }
}

fn suggest_param_replacement(
    atomic_comparison_result: &mut TypeComparisonResult,
    input_type_part: &TAtomic,
    param_offset: usize,
    container_param: &TUnion,
) {
    let replacement = atomic_comparison_result
        .replacement_atomic_type
        .get_or_insert_with(|| input_type_part.clone());

    if let TAtomic::TNamedObject {
        type_params: Some(type_params),
        ..
    }
    | TAtomic::TIterable { type_params, .. } = replacement
    {
        if let Some(existing_param) = type_params.get_mut(param_offset) {
            *existing_param = container_param.clone();
        }
    }
}

/// Folds the flags of a failed nested comparison into the outer result. A
/// flag already explicitly cleared on the outer result stays cleared.
pub(crate) fn update_result_from_nested(
    atomic_comparison_result: &mut TypeComparisonResult,
    param_comparison_result: &TypeComparisonResult,
) {
    fn fold(existing: Option<bool>, nested: Option<bool>) -> Option<bool> {
        Some(nested.unwrap_or(false) && existing != Some(false))
    }

    atomic_comparison_result.type_coerced = fold(
        atomic_comparison_result.type_coerced,
        param_comparison_result.type_coerced,
    );
    atomic_comparison_result.type_coerced_from_mixed = fold(
        atomic_comparison_result.type_coerced_from_mixed,
        param_comparison_result.type_coerced_from_mixed,
    );
    atomic_comparison_result.type_coerced_from_as_mixed = fold(
        atomic_comparison_result.type_coerced_from_as_mixed,
        param_comparison_result.type_coerced_from_as_mixed,
    );
    atomic_comparison_result.type_coerced_from_scalar = fold(
        atomic_comparison_result.type_coerced_from_scalar,
        param_comparison_result.type_coerced_from_scalar,
    );
    atomic_comparison_result.to_string_cast = fold(
        atomic_comparison_result.to_string_cast,
        param_comparison_result.to_string_cast,
    );
    atomic_comparison_result.scalar_type_match_found = fold(
        atomic_comparison_result.scalar_type_match_found,
        param_comparison_result.scalar_type_match_found,
    );
}
