use indexmap::IndexMap;
use sigil_code_info::{
    t_atomic::{ArrayKey, TAtomic},
    t_union::TUnion,
};
use type_combiner::combine;

pub mod template;
mod type_combination;
pub mod type_combiner;
pub mod type_comparator;
pub mod type_expander;

#[cfg(test)]
mod tests;

#[inline]
pub fn wrap_atomic(tinner: TAtomic) -> TUnion {
    TUnion::new(vec![tinner])
}

#[inline]
pub fn get_int() -> TUnion {
    wrap_atomic(TAtomic::TInt)
}

#[inline]
pub fn get_literal_int(value: i64) -> TUnion {
    wrap_atomic(TAtomic::TLiteralInt { value })
}

#[inline]
pub fn get_positive_int() -> TUnion {
    wrap_atomic(TAtomic::TPositiveInt)
}

#[inline]
pub fn get_string() -> TUnion {
    wrap_atomic(TAtomic::TString)
}

#[inline]
pub fn get_literal_string(value: String) -> TUnion {
    wrap_atomic(TAtomic::TLiteralString { value })
}

#[inline]
pub fn get_non_empty_string() -> TUnion {
    wrap_atomic(TAtomic::TNonEmptyString)
}

#[inline]
pub fn get_float() -> TUnion {
    wrap_atomic(TAtomic::TFloat)
}

#[inline]
pub fn get_mixed() -> TUnion {
    wrap_atomic(TAtomic::TMixed)
}

#[inline]
pub fn get_empty_mixed() -> TUnion {
    wrap_atomic(TAtomic::TEmptyMixed)
}

#[inline]
pub fn get_nothing() -> TUnion {
    wrap_atomic(TAtomic::TNever)
}

#[inline]
pub fn get_void() -> TUnion {
    wrap_atomic(TAtomic::TVoid)
}

#[inline]
pub fn get_null() -> TUnion {
    wrap_atomic(TAtomic::TNull)
}

#[inline]
pub fn get_numeric() -> TUnion {
    wrap_atomic(TAtomic::TNumeric)
}

#[inline]
pub fn get_arraykey() -> TUnion {
    wrap_atomic(TAtomic::TArraykey)
}

#[inline]
pub fn get_bool() -> TUnion {
    wrap_atomic(TAtomic::TBool)
}

#[inline]
pub fn get_false() -> TUnion {
    wrap_atomic(TAtomic::TFalse)
}

#[inline]
pub fn get_true() -> TUnion {
    wrap_atomic(TAtomic::TTrue)
}

#[inline]
pub fn get_object() -> TUnion {
    wrap_atomic(TAtomic::TObject)
}

#[inline]
pub fn get_scalar() -> TUnion {
    wrap_atomic(TAtomic::TScalar)
}

pub fn get_named_object_atomic(name: &str) -> TAtomic {
    TAtomic::TNamedObject {
        name: name.to_string(),
        type_params: None,
        was_static: false,
        extra_types: None,
        remapped_params: false,
    }
}

#[inline]
pub fn get_named_object(name: &str) -> TUnion {
    wrap_atomic(get_named_object_atomic(name))
}

pub fn get_generic_object(name: &str, type_params: Vec<TUnion>) -> TUnion {
    wrap_atomic(TAtomic::TNamedObject {
        name: name.to_string(),
        type_params: Some(type_params),
        was_static: false,
        extra_types: None,
        remapped_params: false,
    })
}

pub fn get_array(key_param: TUnion, value_param: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TArray {
        key_param,
        value_param,
        non_empty: false,
        is_callable: false,
    })
}

pub fn get_non_empty_array(key_param: TUnion, value_param: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TArray {
        key_param,
        value_param,
        non_empty: true,
        is_callable: false,
    })
}

/// The type of `[]`.
pub fn get_empty_array() -> TUnion {
    get_array(get_nothing(), get_nothing())
}

pub fn get_mixed_array() -> TUnion {
    get_array(get_arraykey(), get_mixed())
}

pub fn get_list(type_param: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TList {
        type_param,
        non_empty: false,
        is_callable: false,
    })
}

pub fn get_non_empty_list(type_param: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TList {
        type_param,
        non_empty: true,
        is_callable: false,
    })
}

pub fn get_keyed_array(properties: Vec<(ArrayKey, TUnion)>) -> TUnion {
    let is_list = properties
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, ArrayKey::Int(k) if *k == i as i64));

    wrap_atomic(TAtomic::TKeyedArray {
        properties: properties.into_iter().collect::<IndexMap<_, _>>(),
        is_list,
        is_callable: false,
        fallback_params: None,
    })
}

pub fn get_iterable(key_param: TUnion, value_param: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TIterable {
        type_params: vec![key_param, value_param],
        extra_types: None,
    })
}

pub fn get_class_string_of_type(as_type: TAtomic) -> TUnion {
    wrap_atomic(TAtomic::TClassString {
        as_: "object".to_string(),
        as_type: Some(Box::new(as_type)),
    })
}

pub fn get_literal_class_string(name: &str) -> TUnion {
    wrap_atomic(TAtomic::TLiteralClassString {
        name: name.to_string(),
    })
}

pub fn get_template_param(param_name: &str, defining_entity: &str, as_type: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TTemplateParam {
        param_name: param_name.to_string(),
        as_type,
        defining_entity: defining_entity.to_string(),
        extra_types: None,
    })
}

pub fn combine_optional_union_types(type_1: Option<&TUnion>, type_2: Option<&TUnion>) -> TUnion {
    match (type_1, type_2) {
        (Some(type_1), Some(type_2)) => combine_union_types(type_1, type_2),
        (Some(type_1), None) => type_1.clone(),
        (None, Some(type_2)) => type_2.clone(),
        (None, None) => get_mixed(),
    }
}

pub fn combine_union_types(type_1: &TUnion, type_2: &TUnion) -> TUnion {
    if type_1 == type_2 {
        return type_1.clone();
    }

    let mut all_atomic_types = type_1.types.values().cloned().collect::<Vec<_>>();
    all_atomic_types.extend(type_2.types.values().cloned());

    let mut combined_type = TUnion::new(combine(all_atomic_types));

    if type_1.had_template && type_2.had_template {
        combined_type.had_template = true;
    }

    if type_1.possibly_undefined || type_2.possibly_undefined {
        combined_type.possibly_undefined = true;
    }

    if type_1.possibly_undefined_from_try || type_2.possibly_undefined_from_try {
        combined_type.possibly_undefined_from_try = true;
    }

    if type_1.ignore_falsable_issues || type_2.ignore_falsable_issues {
        combined_type.ignore_falsable_issues = true;
    }

    if type_1.from_template_default && type_2.from_template_default {
        combined_type.from_template_default = true;
    }

    combined_type
}

/// `array{a: int, b?: string}` becomes `non-empty-array<'a'|'b', int|string>`.
/// Returns `None` for anything that isn't a keyed array.
pub fn get_generic_array_type(keyed_array: &TAtomic) -> Option<TAtomic> {
    if let TAtomic::TKeyedArray {
        properties,
        fallback_params,
        ..
    } = keyed_array
    {
        let mut key_types = properties
            .keys()
            .map(|key| key.to_atomic())
            .collect::<Vec<_>>();
        let mut value_types = vec![];

        let mut has_defined_keys = false;

        for property_type in properties.values() {
            if !property_type.possibly_undefined {
                has_defined_keys = true;
            }

            value_types.extend(property_type.types.values().cloned());
        }

        if let Some((fallback_key, fallback_value)) = fallback_params {
            key_types.extend(fallback_key.types.values().cloned());
            value_types.extend(fallback_value.types.values().cloned());
        }

        if key_types.is_empty() {
            key_types.push(TAtomic::TNever);
        }

        if value_types.is_empty() {
            value_types.push(TAtomic::TNever);
        }

        Some(TAtomic::TArray {
            key_param: TUnion::new(combine(key_types)),
            value_param: TUnion::new(combine(value_types)),
            non_empty: has_defined_keys,
            is_callable: false,
        })
    } else {
        None
    }
}

/// A list-shaped keyed array as its `list<T>` equivalent.
pub fn get_list_from_keyed_array(keyed_array: &TAtomic) -> Option<TAtomic> {
    if let TAtomic::TKeyedArray {
        properties,
        is_list: true,
        fallback_params,
        ..
    } = keyed_array
    {
        let mut value_types = vec![];
        let mut has_defined_keys = false;

        for property_type in properties.values() {
            if !property_type.possibly_undefined {
                has_defined_keys = true;
            }

            value_types.extend(property_type.types.values().cloned());
        }

        if let Some((_, fallback_value)) = fallback_params {
            value_types.extend(fallback_value.types.values().cloned());
        }

        if value_types.is_empty() {
            value_types.push(TAtomic::TNever);
        }

        Some(TAtomic::TList {
            type_param: TUnion::new(combine(value_types)),
            non_empty: has_defined_keys,
            is_callable: false,
        })
    } else {
        None
    }
}

/// `list<T>` as `array<int, T>`, preserving non-emptiness.
pub fn get_array_from_list(list: &TAtomic) -> Option<TAtomic> {
    if let TAtomic::TList {
        type_param,
        non_empty,
        is_callable,
    } = list
    {
        Some(TAtomic::TArray {
            key_param: get_int(),
            value_param: type_param.clone(),
            non_empty: *non_empty,
            is_callable: *is_callable,
        })
    } else {
        None
    }
}

/// `class-string-map<T as Foo, V>` as `array<class-string<Foo>, V>`.
pub fn get_array_from_class_string_map(class_string_map: &TAtomic) -> Option<TAtomic> {
    if let TAtomic::TClassStringMap {
        as_type,
        value_param,
        ..
    } = class_string_map
    {
        Some(TAtomic::TArray {
            key_param: wrap_atomic(TAtomic::TClassString {
                as_: "object".to_string(),
                as_type: as_type.clone(),
            }),
            value_param: value_param.clone(),
            non_empty: false,
            is_callable: false,
        })
    } else {
        None
    }
}

/// Key and value params of any array-like atomic.
pub fn get_arrayish_params(atomic: &TAtomic) -> Option<(TUnion, TUnion)> {
    let array = match atomic {
        TAtomic::TArray { .. } => atomic.clone(),
        TAtomic::TList { .. } => get_array_from_list(atomic)?,
        TAtomic::TKeyedArray { .. } => get_generic_array_type(atomic)?,
        TAtomic::TClassStringMap { .. } => get_array_from_class_string_map(atomic)?,
        _ => return None,
    };

    if let TAtomic::TArray {
        key_param,
        value_param,
        ..
    } = array
    {
        Some((key_param, value_param))
    } else {
        None
    }
}
