use sigil_code_info::{codebase_info::CodebaseInfo, t_atomic::TAtomic, t_union::TUnion};

#[derive(Debug)]
pub enum StaticClassType<'a> {
    None,
    Name(&'a str),
    Object(&'a TAtomic),
}

#[derive(Debug)]
pub struct TypeExpansionOptions<'a> {
    pub self_class: Option<&'a str>,
    pub static_class_type: StaticClassType<'a>,
    pub parent_class: Option<&'a str>,
    pub function_is_final: bool,
}

impl Default for TypeExpansionOptions<'_> {
    fn default() -> Self {
        Self {
            self_class: None,
            static_class_type: StaticClassType::None,
            parent_class: None,
            function_is_final: false,
        }
    }
}

/// Resolves `self`, `static` and `parent` against the options and class
/// aliases against the codebase, everywhere inside the union.
pub fn expand_union(codebase: &CodebaseInfo, return_type: &mut TUnion, options: &TypeExpansionOptions) {
    let atomics = std::mem::take(&mut return_type.types);

    for (_, mut atomic) in atomics {
        expand_atomic(&mut atomic, codebase, options);
        return_type.add_type(atomic);
    }
}

fn expand_atomic(return_type_part: &mut TAtomic, codebase: &CodebaseInfo, options: &TypeExpansionOptions) {
    match return_type_part {
        TAtomic::TNamedObject {
            ref mut name,
            ref mut type_params,
            ref mut was_static,
            ref mut extra_types,
            ..
        } => {
            if name.eq_ignore_ascii_case("static") {
                match options.static_class_type {
                    StaticClassType::Name(static_class) => {
                        *name = static_class.to_string();
                        *was_static = !options.function_is_final;
                    }
                    StaticClassType::Object(TAtomic::TNamedObject {
                        name: static_name, ..
                    }) => {
                        *name = static_name.clone();
                        *was_static = !options.function_is_final;
                    }
                    _ => {}
                }
            } else if name.eq_ignore_ascii_case("self") {
                if let Some(self_class) = options.self_class {
                    *name = self_class.to_string();
                }
            } else if name.eq_ignore_ascii_case("parent") {
                if let Some(parent_class) = options.parent_class {
                    *name = parent_class.to_string();
                }
            } else {
                *name = codebase.get_unaliased_name(name);
            }

            if let Some(type_params) = type_params {
                for type_param in type_params {
                    expand_union(codebase, type_param, options);
                }
            }

            if let Some(extra_types) = extra_types {
                let expanded = std::mem::take(extra_types);

                for (_, mut extra_type) in expanded {
                    expand_atomic(&mut extra_type, codebase, options);
                    extra_types.insert(extra_type.get_key(), extra_type);
                }
            }
        }
        TAtomic::TClassString {
            ref mut as_,
            ref mut as_type,
        } => {
            if let Some(as_type) = as_type {
                expand_atomic(as_type, codebase, options);

                if let TAtomic::TNamedObject { name, .. } = &**as_type {
                    *as_ = name.clone();
                }
            }
        }
        TAtomic::TLiteralClassString { ref mut name } => {
            if name.eq_ignore_ascii_case("self") {
                if let Some(self_class) = options.self_class {
                    *name = self_class.to_string();
                }
            } else if name.eq_ignore_ascii_case("parent") {
                if let Some(parent_class) = options.parent_class {
                    *name = parent_class.to_string();
                }
            }
        }
        TAtomic::TArray {
            ref mut key_param,
            ref mut value_param,
            ..
        } => {
            expand_union(codebase, key_param, options);
            expand_union(codebase, value_param, options);
        }
        TAtomic::TList {
            ref mut type_param, ..
        } => {
            expand_union(codebase, type_param, options);
        }
        TAtomic::TKeyedArray {
            ref mut properties,
            ref mut fallback_params,
            ..
        } => {
            for (_, property_type) in properties.iter_mut() {
                expand_union(codebase, property_type, options);
            }

            if let Some((key_param, value_param)) = fallback_params {
                expand_union(codebase, key_param, options);
                expand_union(codebase, value_param, options);
            }
        }
        TAtomic::TClassStringMap {
            ref mut value_param,
            ..
        } => {
            expand_union(codebase, value_param, options);
        }
        TAtomic::TIterable {
            ref mut type_params,
            ..
        } => {
            for type_param in type_params {
                expand_union(codebase, type_param, options);
            }
        }
        TAtomic::TObjectWithProperties {
            ref mut properties,
            ..
        } => {
            for (_, property_type) in properties.iter_mut() {
                expand_union(codebase, property_type, options);
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
                for param in params {
                    if let Some(ref mut signature_type) = param.signature_type {
                        expand_union(codebase, signature_type, options);
                    }
                }
            }

            if let Some(return_type) = return_type {
                expand_union(codebase, return_type, options);
            }
        }
        TAtomic::TTemplateParam {
            ref mut as_type, ..
        } => {
            expand_union(codebase, as_type, options);
        }
        TAtomic::TConditional {
            ref mut if_type,
            ref mut else_type,
            ..
        } => {
            expand_union(codebase, if_type, options);
            expand_union(codebase, else_type, options);
        }
        _ => {}
    }
}
