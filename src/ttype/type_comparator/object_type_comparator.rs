use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic};
use sigil_code_info::{STR_GENERATOR, STR_ITERATOR, STR_TRAVERSABLE};

use crate::wrap_atomic;

use super::{type_comparison_result::TypeComparisonResult, union_type_comparator};

pub(crate) fn is_shallowly_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    let intersection_input_types = get_intersection_types_with_bounds(input_type_part);
    let intersection_container_types = get_intersection_types_with_bounds(container_type_part);

    'outer: for intersection_container_type in &intersection_container_types {
        for intersection_input_type in &intersection_input_types {
            if is_intersection_shallowly_contained_by(
                codebase,
                file_path,
                intersection_input_type,
                intersection_container_type,
                allow_interface_equality,
                atomic_comparison_result,
            ) {
                continue 'outer;
            }
        }

        return false;
    }

    true
}

/// The atomic and its intersection members, plus the intersection members
/// carried by a template's object bounds.
fn get_intersection_types_with_bounds(atomic: &TAtomic) -> Vec<TAtomic> {
    let mut intersection_types = atomic.get_intersection_types();

    if let TAtomic::TTemplateParam { as_type, .. } = atomic {
        for as_atomic in as_type.types.values() {
            if let TAtomic::TNamedObject {
                extra_types: Some(extra_types),
                ..
            } = as_atomic
            {
                intersection_types.extend(extra_types.values().cloned());
            }
        }
    }

    intersection_types
}

fn is_intersection_shallowly_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    intersection_input_type: &TAtomic,
    intersection_container_type: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    if let TAtomic::TTemplateParam {
        defining_entity: container_defining_entity,
        param_name: container_param_name,
        as_type: container_extends,
        ..
    } = intersection_container_type
    {
        if let TAtomic::TTemplateParam {
            defining_entity: input_defining_entity,
            param_name: input_param_name,
            ..
        } = intersection_input_type
        {
            if input_param_name == container_param_name
                && (input_defining_entity.eq_ignore_ascii_case(container_defining_entity)
                    || input_defining_entity.starts_with("fn-")
                    || container_defining_entity.starts_with("fn-"))
            {
                return true;
            }

            if let Some(input_class_storage) = codebase.get_classlike_info(input_defining_entity)
            {
                if let Some(defining_entity_params) = input_class_storage
                    .template_extended_params
                    .get(&container_defining_entity.to_ascii_lowercase())
                {
                    if defining_entity_params.contains_key(container_param_name) {
                        return true;
                    }
                }
            }

            return false;
        }

        if !allow_interface_equality {
            return false;
        }

        let mut container_bound_name = None;

        for as_atomic in container_extends.types.values() {
            match as_atomic {
                TAtomic::TNull => continue,
                TAtomic::TNamedObject { name, .. } => container_bound_name = Some(name.as_str()),
                _ => return false,
            }
        }

        return if let Some(container_bound_name) = container_bound_name {
            is_named_object_contained_by(
                codebase,
                &get_object_name(intersection_input_type),
                &codebase
                    .get_unaliased_name(container_bound_name)
                    .to_ascii_lowercase(),
                allow_interface_equality,
            )
        } else {
            false
        };
    }

    if let TAtomic::TTemplateParam {
        as_type: input_extends,
        ..
    } = intersection_input_type
    {
        let mut intersection_container_type = intersection_container_type.clone();

        if let TAtomic::TNamedObject {
            ref mut was_static, ..
        } = intersection_container_type
        {
            *was_static = false;
        }

        return union_type_comparator::is_contained_by(
            codebase,
            file_path,
            input_extends,
            &wrap_atomic(intersection_container_type),
            false,
            input_extends.ignore_falsable_issues,
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
    ) = (intersection_container_type, intersection_input_type)
    {
        atomic_comparison_result.type_coerced = Some(true);
        return false;
    }

    let container_name = match intersection_container_type {
        TAtomic::TObjectWithProperties { .. } => "object".to_string(),
        _ => get_object_name(intersection_container_type),
    };

    is_named_object_contained_by(
        codebase,
        &get_object_name(intersection_input_type),
        &container_name,
        allow_interface_equality,
    )
}

fn get_object_name(atomic: &TAtomic) -> String {
    match atomic {
        TAtomic::TNamedObject { name, .. } => codebase_name(name),
        TAtomic::TIterable { .. } => "iterable".to_string(),
        TAtomic::TClosure { .. } => "closure".to_string(),
        _ => "object".to_string(),
    }
}

#[inline]
fn codebase_name(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

fn is_named_object_contained_by(
    codebase: &CodebaseInfo,
    input_name: &str,
    container_name: &str,
    allow_interface_equality: bool,
) -> bool {
    let input_name = codebase.get_unaliased_name(input_name).to_ascii_lowercase();
    let container_name = codebase.get_unaliased_name(container_name).to_ascii_lowercase();

    let lc_generator = STR_GENERATOR.to_ascii_lowercase();
    let lc_iterator = STR_ITERATOR.to_ascii_lowercase();
    let lc_traversable = STR_TRAVERSABLE.to_ascii_lowercase();

    if input_name == container_name
        || (input_name == lc_generator
            && (container_name == lc_iterator
                || container_name == lc_traversable
                || container_name == "iterable"))
    {
        return true;
    }

    if container_name == "iterable"
        && (input_name == lc_traversable
            || (codebase.class_exists(&input_name)
                && codebase.class_implements(&input_name, STR_TRAVERSABLE))
            || (codebase.interface_exists(&input_name)
                && codebase.interface_extends(&input_name, STR_TRAVERSABLE)))
    {
        return true;
    }

    let input_is_interface = codebase.interface_exists(&input_name);

    if allow_interface_equality
        && codebase.interface_exists(&container_name)
        && (input_is_interface || !codebase.class_exists(&input_name))
    {
        return true;
    }

    if codebase.class_exists(&input_name)
        && codebase.class_or_interface_exists(&container_name)
        && codebase.class_extends_or_implements(&input_name, &container_name)
    {
        return true;
    }

    if input_is_interface && codebase.interface_extends(&input_name, &container_name) {
        return true;
    }

    codebase.is_mock_class(&input_name)
}
