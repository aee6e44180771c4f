use sigil_code_info::{t_atomic::TAtomic, t_union::TUnion};

use super::TemplateResult;

/// Substitutes every template param that has a lower bound in the template
/// result, recursing into nested params.
pub fn replace(union: &TUnion, template_result: &TemplateResult) -> TUnion {
    let mut new_union = union.clone();
    new_union.types.clear();

    for atomic_type in union.types.values() {
        let atomic_type = replace_atomic(atomic_type.clone(), template_result);

        match &atomic_type {
            TAtomic::TTemplateParam {
                param_name,
                defining_entity,
                ..
            } => {
                if let Some(template_type) = get_lower_bound(template_result, param_name, defining_entity) {
                    for template_type_part in template_type.types.values() {
                        new_union.add_type(template_type_part.clone());
                    }
                    new_union.had_template = true;
                } else {
                    new_union.add_type(atomic_type);
                }
            }
            TAtomic::TTemplateParamClass {
                param_name,
                defining_entity,
                ..
            } => {
                let mut class_template_type = None;

                if let Some(template_type) = get_lower_bound(template_result, param_name, defining_entity) {
                    let single = template_type.get_single();

                    if let Some(TAtomic::TNamedObject { name, .. }) = single {
                        class_template_type = Some(TAtomic::TClassString {
                            as_: name.clone(),
                            as_type: single.map(|atomic| Box::new(atomic.clone())),
                        });
                    } else if template_type.is_mixed() || matches!(single, Some(TAtomic::TObject)) {
                        class_template_type = Some(TAtomic::TClassString {
                            as_: "object".to_string(),
                            as_type: None,
                        });
                    }
                }

                new_union.add_type(class_template_type.unwrap_or(atomic_type));
            }
            _ => {
                new_union.add_type(atomic_type);
            }
        }
    }

    new_union
}

fn get_lower_bound<'a>(
    template_result: &'a TemplateResult,
    param_name: &str,
    defining_entity: &str,
) -> Option<&'a TUnion> {
    template_result
        .lower_bounds
        .get(param_name)?
        .iter()
        .find(|(entity, _)| entity.eq_ignore_ascii_case(defining_entity))
        .map(|(_, bound)| bound)
}

fn replace_atomic(mut atomic: TAtomic, template_result: &TemplateResult) -> TAtomic {
    match atomic {
        TAtomic::TArray {
            ref mut key_param,
            ref mut value_param,
            ..
        } => {
            *key_param = replace(key_param, template_result);
            *value_param = replace(value_param, template_result);
        }
        TAtomic::TList {
            ref mut type_param, ..
        } => {
            *type_param = replace(type_param, template_result);
        }
        TAtomic::TKeyedArray {
            ref mut properties,
            ref mut fallback_params,
            ..
        } => {
            for (_, property_type) in properties.iter_mut() {
                *property_type = replace(property_type, template_result);
            }

            if let Some((key_param, value_param)) = fallback_params {
                *key_param = replace(key_param, template_result);
                *value_param = replace(value_param, template_result);
            }
        }
        TAtomic::TClassStringMap {
            ref mut value_param,
            ..
        } => {
            *value_param = replace(value_param, template_result);
        }
        TAtomic::TNamedObject {
            type_params: Some(ref mut type_params),
            ..
        }
        | TAtomic::TIterable {
            ref mut type_params,
            ..
        } => {
            for type_param in type_params.iter_mut() {
                *type_param = replace(type_param, template_result);
            }
        }
        TAtomic::TCallable {
            ref mut params,
            ref mut return_type,
            ..
        }
        | TAtomic::TClosure {
            ref mut params,
            ref mut return_type,
            ..
        } => {
            if let Some(params) = params {
                for param in params.iter_mut() {
                    if let Some(ref mut signature_type) = param.signature_type {
                        *signature_type = replace(signature_type, template_result);
                    }
                }
            }

            if let Some(return_type) = return_type {
                *return_type = replace(return_type, template_result);
            }
        }
        _ => {}
    }

    atomic
}
