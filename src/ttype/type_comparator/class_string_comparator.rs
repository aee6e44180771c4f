use sigil_code_info::code_location::FilePath;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic};

use crate::get_named_object_atomic;

use super::{atomic_type_comparator, type_comparison_result::TypeComparisonResult};

pub fn is_contained_by(
    codebase: &CodebaseInfo,
    file_path: &FilePath,
    input_type_part: &TAtomic,
    container_type_part: &TAtomic,
    allow_interface_equality: bool,
    atomic_comparison_result: &mut TypeComparisonResult,
) -> bool {
    if let TAtomic::TLiteralClassString {
        name: container_name,
    } = container_type_part
    {
        if let TAtomic::TLiteralClassString { name: input_name } = input_type_part {
            return codebase
                .get_unaliased_name(input_name)
                .eq_ignore_ascii_case(&codebase.get_unaliased_name(container_name));
        }
    }

    if let TAtomic::TTemplateParamClass { .. } = container_type_part {
        if let TAtomic::TClassString { .. } = input_type_part {
            atomic_comparison_result.type_coerced = Some(true);
            return false;
        }
    }

    if is_unconstrained(container_type_part) {
        return true;
    }

    if is_unconstrained(input_type_part) {
        atomic_comparison_result.type_coerced = Some(true);
        atomic_comparison_result.type_coerced_from_scalar = Some(true);
        return false;
    }

    let fake_container_object = get_referenced_object(container_type_part);
    let fake_input_object = get_referenced_object(input_type_part);

    atomic_type_comparator::is_contained_by(
        codebase,
        file_path,
        &fake_input_object,
        &fake_container_object,
        allow_interface_equality,
        false,
        atomic_comparison_result,
    )
}

fn is_unconstrained(class_string: &TAtomic) -> bool {
    matches!(class_string, TAtomic::TClassString { as_, as_type: None } if as_ == "object")
}

/// The object type whose class a class-string names.
fn get_referenced_object(class_string: &TAtomic) -> TAtomic {
    match class_string {
        TAtomic::TClassString {
            as_type: Some(as_type),
            ..
        }
        | TAtomic::TTemplateParamClass {
            as_type: Some(as_type),
            ..
        } => (**as_type).clone(),
        TAtomic::TClassString { as_, .. } | TAtomic::TTemplateParamClass { as_, .. } => {
            if as_ == "object" {
                TAtomic::TObject
            } else {
                get_named_object_atomic(as_)
            }
        }
        TAtomic::TLiteralClassString { name } => get_named_object_atomic(name),
        _ => TAtomic::TObject,
    }
}
