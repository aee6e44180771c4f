use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};

use crate::{combine_union_types, get_mixed, wrap_atomic};

pub mod inferred_type_replacer;

/**
 * Lower bounds keyed by template name and then by defining entity: what a
 * template was inferred to be, e.g. mapping the params of `Collection<int>`
 * onto `Collection`'s own `T` gives `T => int`.
 */
#[derive(Clone, Debug, Default)]
pub struct TemplateResult {
    pub lower_bounds: IndexMap<String, FxHashMap<String, TUnion>>,
}

impl TemplateResult {
    pub fn new(lower_bounds: IndexMap<String, FxHashMap<String, TUnion>>) -> TemplateResult {
        TemplateResult { lower_bounds }
    }
}

/// Maps the type params of a generic input object onto the param slots of
/// the container class it extends or implements.
pub(crate) fn get_mapped_generic_type_params(
    codebase: &CodebaseInfo,
    input_name: &str,
    input_type_params: &[TUnion],
    container_name: &str,
    container_remapped_params: bool,
    input_remapped_params: bool,
) -> Vec<TUnion> {
    let input_class_storage = if let Some(storage) = codebase.get_classlike_info(input_name) {
        storage
    } else {
        return input_type_params.to_vec();
    };

    if input_name.eq_ignore_ascii_case(container_name) {
        return input_type_params.to_vec();
    }

    let mut replacement_templates: IndexMap<String, FxHashMap<String, TUnion>> = IndexMap::new();

    if !input_remapped_params && !container_remapped_params {
        for (i, template_name) in input_class_storage.template_types.keys().enumerate() {
            if let Some(input_type) = input_type_params.get(i) {
                replacement_templates
                    .entry(template_name.clone())
                    .or_insert_with(FxHashMap::default)
                    .insert(input_class_storage.name.clone(), input_type.clone());
            } else {
                break;
            }
        }
    }

    let template_extends = &input_class_storage.template_extended_params;

    if let Some(params) = template_extends.get(&container_name.to_ascii_lowercase()) {
        let template_result = TemplateResult::new(replacement_templates);

        let mut new_input_params = Vec::new();

        for extended_input_param in params.values() {
            let mut new_input_param: Option<TUnion> = None;

            for et in extended_input_param.types.values() {
                let mut candidate_param_type = None;

                if let TAtomic::TTemplateParam {
                    param_name,
                    defining_entity,
                    ..
                } = et
                {
                    if let Some(offset) = input_class_storage
                        .template_types
                        .get_index_of(param_name)
                    {
                        if defining_entity.eq_ignore_ascii_case(&input_class_storage.name) {
                            candidate_param_type = Some(
                                input_type_params
                                    .get(offset)
                                    .cloned()
                                    .unwrap_or_else(get_mixed),
                            );
                        }
                    }
                }

                let mut candidate_param_type =
                    candidate_param_type.unwrap_or_else(|| wrap_atomic(et.clone()));

                candidate_param_type.from_template_default = true;

                new_input_param = Some(if let Some(new_input_param) = new_input_param {
                    combine_union_types(&new_input_param, &candidate_param_type)
                } else {
                    candidate_param_type
                });
            }

            if let Some(new_input_param) = new_input_param {
                new_input_params.push(inferred_type_replacer::replace(
                    &new_input_param,
                    &template_result,
                ));
            }
        }

        return new_input_params;
    }

    input_type_params.to_vec()
}
