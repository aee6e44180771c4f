use std::cell::Cell;

use rustc_hash::FxHashSet;
use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};

use super::{atomic_type_comparator, type_comparison_result::TypeComparisonResult};

thread_local! {
    static COMPARISON_DEPTH: Cell<usize> = Cell::new(0);
}

/// Counts nested union comparisons on this thread for as long as it lives.
struct DepthGuard;

impl DepthGuard {
    fn enter(max_depth: usize) -> Option<DepthGuard> {
        COMPARISON_DEPTH.with(|depth| {
            if depth.get() >= max_depth {
                None
            } else {
                depth.set(depth.get() + 1);
                Some(DepthGuard)
            }
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        COMPARISON_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Configuration for type comparison operations
#[derive(Debug, Clone, Copy)]
struct ComparisonConfig {
    ignore_null: bool,
    ignore_false: bool,
    allow_interface_equality: bool,
}

/// Tracks coercion state while one input atomic is checked against every
/// container atomic
#[derive(Debug, Default)]
struct CoercionTracker {
    type_match_found: bool,
    scalar_type_match_found: bool,
    all_to_string_cast: bool,
    all_type_coerced: Option<bool>,
    all_type_coerced_from_mixed: Option<bool>,
    all_type_coerced_from_as_mixed: Option<bool>,
    some_type_coerced: bool,
    some_type_coerced_from_mixed: bool,
}

pub fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type: &TUnion,
    container_type: &TUnion,
    ignore_null: bool,
    ignore_false: bool,
    allow_interface_equality: bool,
    union_comparison_result: &mut TypeComparisonResult,
) -> bool {
    union_comparison_result.scalar_type_match_found = Some(true);

    if input_type.possibly_undefined
        && !input_type.possibly_undefined_from_try
        && !container_type.possibly_undefined
    {
        return false;
    }

    if container_type.has_mixed() && !container_type.is_empty_mixed() {
        return true;
    }

    let _depth_guard = if let Some(guard) = DepthGuard::enter(codebase.config.max_comparison_depth)
    {
        guard
    } else {
        codebase.logger.log_debug(&format!(
            "Comparison depth limit reached comparing {} with {}",
            input_type.get_id(),
            container_type.get_id()
        ));
        return true;
    };

    let comparison_config = ComparisonConfig {
        ignore_null,
        ignore_false,
        allow_interface_equality,
    };

    let container_has_template = container_type.has_template_or_static();

    let mut input_atomic_types = input_type.types.values().collect::<Vec<_>>();

    input_atomic_types.reverse();

    while let Some(input_type_part) = input_atomic_types.pop() {
        match input_type_part {
            TAtomic::TNull => {
                if comparison_config.ignore_null {
                    continue;
                }
            }
            TAtomic::TFalse => {
                if comparison_config.ignore_false {
                    continue;
                }
            }
            TAtomic::TTemplateParam {
                extra_types: None,
                as_type,
                ..
            } => {
                if !container_has_template {
                    input_atomic_types.extend(as_type.types.values().rev());
                    continue;
                }
            }
            TAtomic::TArraykey => {
                if container_type.has_int() && container_type.has_string() {
                    continue;
                }
            }
            _ => (),
        }

        let coercion_tracker = check_atomic_contained_by_union(
            codebase,
            file_path,
            input_type,
            input_type_part,
            container_type,
            comparison_config,
            union_comparison_result,
        );

        if !coercion_tracker.type_match_found {
            if coercion_tracker.some_type_coerced {
                union_comparison_result.type_coerced = Some(true);
            }

            if coercion_tracker.some_type_coerced_from_mixed {
                union_comparison_result.type_coerced_from_mixed = Some(true);

                if input_type.from_template_default
                    || coercion_tracker
                        .all_type_coerced_from_as_mixed
                        .unwrap_or(false)
                {
                    union_comparison_result.type_coerced_from_as_mixed = Some(true);
                }
            }

            if !coercion_tracker.scalar_type_match_found {
                union_comparison_result.scalar_type_match_found = Some(false);
            }

            return false;
        }
    }

    true
}

fn check_atomic_contained_by_union(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type: &TUnion,
    input_type_part: &TAtomic,
    container_type: &TUnion,
    comparison_config: ComparisonConfig,
    union_comparison_result: &mut TypeComparisonResult,
) -> CoercionTracker {
    let mut coercion_tracker = CoercionTracker {
        all_to_string_cast: true,
        ..CoercionTracker::default()
    };

    for container_type_part in container_type.types.values() {
        if comparison_config.ignore_null
            && matches!(container_type_part, TAtomic::TNull)
            && !matches!(input_type_part, TAtomic::TNull)
        {
            continue;
        }

        if comparison_config.ignore_false
            && matches!(container_type_part, TAtomic::TFalse)
            && !matches!(input_type_part, TAtomic::TFalse)
        {
            continue;
        }

        let mut atomic_comparison_result = TypeComparisonResult::new();

        let mut is_atomic_contained_by = atomic_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_type_part,
            container_type_part,
            comparison_config.allow_interface_equality,
            true,
            &mut atomic_comparison_result,
        );

        if (input_type_part.is_mixed() || matches!(input_type_part, TAtomic::TString))
            && input_type.from_docblock
            && atomic_comparison_result
                .type_coerced_from_mixed
                .unwrap_or(false)
        {
            atomic_comparison_result.type_coerced_from_as_mixed = Some(true);
        }

        if let Some(scalar_type_match_found) = atomic_comparison_result.scalar_type_match_found {
            coercion_tracker.scalar_type_match_found = scalar_type_match_found;
        }

        if atomic_comparison_result.type_coerced_from_scalar.is_some() {
            union_comparison_result.type_coerced_from_scalar =
                atomic_comparison_result.type_coerced_from_scalar;
        }

        if is_atomic_contained_by {
            if let Some(replacement_atomic_type) = atomic_comparison_result.replacement_atomic_type.take() {
                let replacement_union_type = union_comparison_result
                    .replacement_union_type
                    .get_or_insert_with(|| input_type.clone());

                replacement_union_type.remove_type(&input_type_part.get_key());
                replacement_union_type.add_type(replacement_atomic_type);
            }
        }

        if matches!(input_type_part, TAtomic::TNumeric)
            && container_type.has_string()
            && container_type.has_int()
            && container_type.has_float()
        {
            coercion_tracker.scalar_type_match_found = false;
            is_atomic_contained_by = true;
        }

        if atomic_comparison_result.type_coerced.unwrap_or(false) {
            coercion_tracker.some_type_coerced = true;
        }

        if atomic_comparison_result
            .type_coerced_from_mixed
            .unwrap_or(false)
        {
            coercion_tracker.some_type_coerced_from_mixed = true;
        }

        if !atomic_comparison_result.type_coerced.unwrap_or(false)
            || !coercion_tracker.all_type_coerced.unwrap_or(true)
        {
            coercion_tracker.all_type_coerced = Some(false);
        } else {
            coercion_tracker.all_type_coerced = Some(true);
        }

        if !atomic_comparison_result
            .type_coerced_from_mixed
            .unwrap_or(false)
            || !coercion_tracker.all_type_coerced_from_mixed.unwrap_or(true)
        {
            coercion_tracker.all_type_coerced_from_mixed = Some(false);
        } else {
            coercion_tracker.all_type_coerced_from_mixed = Some(true);
        }

        if !atomic_comparison_result
            .type_coerced_from_as_mixed
            .unwrap_or(false)
            || !coercion_tracker
                .all_type_coerced_from_as_mixed
                .unwrap_or(true)
        {
            coercion_tracker.all_type_coerced_from_as_mixed = Some(false);
        } else {
            coercion_tracker.all_type_coerced_from_as_mixed = Some(true);
        }

        if is_atomic_contained_by {
            coercion_tracker.type_match_found = true;

            if !atomic_comparison_result.to_string_cast.unwrap_or(false) {
                coercion_tracker.all_to_string_cast = false;
            }

            coercion_tracker.all_type_coerced_from_mixed = Some(false);
            coercion_tracker.all_type_coerced_from_as_mixed = Some(false);
            coercion_tracker.all_type_coerced = Some(false);
        }
    }

    // only set this flag if the __toString cast is the sole reason a match was found
    if coercion_tracker.all_to_string_cast && coercion_tracker.type_match_found {
        union_comparison_result.to_string_cast = Some(true);
    }

    if coercion_tracker.all_type_coerced.unwrap_or(false) {
        union_comparison_result.type_coerced = Some(true);
    }

    if coercion_tracker.all_type_coerced_from_mixed.unwrap_or(false) {
        union_comparison_result.type_coerced_from_mixed = Some(true);

        if input_type.from_template_default
            || coercion_tracker
                .all_type_coerced_from_as_mixed
                .unwrap_or(false)
        {
            union_comparison_result.type_coerced_from_as_mixed = Some(true);
        }
    }

    coercion_tracker
}

pub fn is_contained_by_in_php(input_type: Option<&TUnion>, container_type: &TUnion) -> bool {
    if container_type.is_mixed() {
        return true;
    }

    let input_type = if let Some(input_type) = input_type {
        input_type
    } else {
        return false;
    };

    if input_type.get_id() == container_type.get_id() {
        return true;
    }

    if input_type.has_type("null") && !container_type.has_type("null") {
        return false;
    }

    let mut input_type_not_null = input_type.clone();
    input_type_not_null.remove_type("null");

    let mut container_type_not_null = container_type.clone();
    container_type_not_null.remove_type("null");

    if input_type_not_null.get_id() == container_type_not_null.get_id() {
        return true;
    }

    input_type_not_null.has_array() && container_type_not_null.has_type("iterable")
}

/// Key-level check used before full type information is available: every
/// input atomic must appear verbatim in the container.
pub fn is_simply_contained_by(input_type: &TUnion, container_type: &TUnion) -> bool {
    if input_type.get_id() == container_type.get_id() {
        return true;
    }

    if input_type.has_type("null") && !container_type.has_type("null") {
        return false;
    }

    input_type
        .types
        .keys()
        .all(|input_key| container_type.types.contains_key(input_key))
}

/// Whether some input atomic could be used where some container atomic is
/// expected. The keys of the input atomics that could are collected into
/// `matching_input_keys`.
pub fn can_be_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type: &TUnion,
    container_type: &TUnion,
    ignore_null: bool,
    ignore_false: bool,
    matching_input_keys: &mut FxHashSet<String>,
) -> bool {
    if container_type.has_mixed() {
        return true;
    }

    if input_type.possibly_undefined
        && !input_type.possibly_undefined_from_try
        && !container_type.possibly_undefined
    {
        return false;
    }

    let mut any_type_matches = false;

    for container_type_part in container_type.types.values() {
        if matches!(container_type_part, TAtomic::TNull) && ignore_null {
            continue;
        }

        if matches!(container_type_part, TAtomic::TFalse) && ignore_false {
            continue;
        }

        for input_type_part in input_type.types.values() {
            let mut atomic_comparison_result = TypeComparisonResult::new();

            let is_atomic_contained_by = atomic_type_comparator::is_contained_by(
                codebase,
                file_path,
                input_type_part,
                container_type_part,
                false,
                false,
                &mut atomic_comparison_result,
            );

            if (is_atomic_contained_by
                && !atomic_comparison_result.to_string_cast.unwrap_or(false))
                || atomic_comparison_result
                    .type_coerced_from_mixed
                    .unwrap_or(false)
            {
                matching_input_keys.insert(input_type_part.get_key());
                any_type_matches = true;
            }
        }
    }

    any_type_matches
}

pub fn can_expression_types_be_identical(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    type1: &TUnion,
    type2: &TUnion,
    allow_interface_equality: bool,
) -> bool {
    if type1.has_mixed() || type2.has_mixed() {
        return true;
    }

    if type1.has_type("null") && type2.has_type("null") {
        return true;
    }

    for type1_part in type1.types.values() {
        for type2_part in type2.types.values() {
            if atomic_type_comparator::can_be_identical(
                codebase,
                file_path,
                type1_part,
                type2_part,
                allow_interface_equality,
            ) {
                return true;
            }
        }
    }

    false
}
