use sigil_code_info::{t_atomic::TAtomic, t_union::TUnion};

use crate::{
    combine_union_types,
    type_combination::{self, TypeCombination},
};

/// Merges a list of atomics into the smallest equivalent list. Same-key
/// arrays and lists merge their params, literals fold into their general
/// type when that is present, and `never` disappears next to anything else.
pub fn combine(types: Vec<TAtomic>) -> Vec<TAtomic> {
    if types.len() == 1 {
        return types;
    }

    let mut combination = type_combination::TypeCombination::new();

    for atomic in types {
        scrape_type_properties(atomic, &mut combination);
    }

    if combination.vanilla_mixed {
        return vec![TAtomic::TMixed];
    }

    if combination.empty_mixed {
        return vec![TAtomic::TEmptyMixed];
    }

    if combination.is_empty() {
        return if combination.has_never {
            vec![TAtomic::TNever]
        } else {
            vec![]
        };
    }

    if combination.value_types.contains_key("false") && combination.value_types.contains_key("true")
    {
        combination.value_types.remove("false");
        combination.value_types.remove("true");
        combination
            .value_types
            .insert("bool".to_string(), TAtomic::TBool);
    }

    if combination.value_types.contains_key("bool") {
        combination.value_types.remove("false");
        combination.value_types.remove("true");
    }

    if combination.value_types.contains_key("void") && combination.value_types.len() > 1 {
        combination.value_types.remove("void");
        combination
            .value_types
            .insert("null".to_string(), TAtomic::TNull);
    }

    let mut new_types = Vec::new();

    if let Some((key_param, value_param)) = combination.array_type_params {
        new_types.push(TAtomic::TArray {
            key_param,
            value_param,
            non_empty: combination.array_always_filled,
            is_callable: false,
        });
    }

    if let Some(type_param) = combination.list_type_param {
        new_types.push(TAtomic::TList {
            type_param,
            non_empty: combination.list_always_filled,
            is_callable: false,
        });
    }

    if !combination.value_types.contains_key("string") {
        new_types.extend(combination.literal_strings.into_values());
    }

    if !combination.value_types.contains_key("int") {
        new_types.extend(combination.literal_ints.into_values());
    }

    if !combination.value_types.contains_key("float") {
        new_types.extend(combination.literal_floats.into_values());
    }

    new_types.extend(combination.value_types.into_values());

    new_types
}

fn scrape_type_properties(atomic: TAtomic, combination: &mut TypeCombination) {
    match atomic {
        TAtomic::TMixed => {
            combination.vanilla_mixed = true;
        }
        TAtomic::TEmptyMixed => {
            combination.empty_mixed = true;
        }
        TAtomic::TNever => {
            combination.has_never = true;
        }
        TAtomic::TArray {
            key_param,
            value_param,
            non_empty,
            is_callable: false,
        } => {
            combination.array_type_params =
                Some(match combination.array_type_params.take() {
                    Some((existing_key, existing_value)) => (
                        combine_union_types(&existing_key, &key_param),
                        combine_union_types(&existing_value, &value_param),
                    ),
                    None => (key_param, value_param),
                });

            if !non_empty {
                combination.array_always_filled = false;
            }
        }
        TAtomic::TList {
            type_param,
            non_empty,
            is_callable: false,
        } => {
            combination.list_type_param = Some(match combination.list_type_param.take() {
                Some(existing) => combine_union_types(&existing, &type_param),
                None => type_param,
            });

            if !non_empty {
                combination.list_always_filled = false;
            }
        }
        TAtomic::TLiteralString { .. } => {
            combination
                .literal_strings
                .insert(atomic.get_key(), atomic);
        }
        TAtomic::TLiteralInt { .. } => {
            combination.literal_ints.insert(atomic.get_key(), atomic);
        }
        TAtomic::TLiteralFloat { .. } => {
            combination.literal_floats.insert(atomic.get_key(), atomic);
        }
        TAtomic::TPositiveInt => {
            if !combination.value_types.contains_key("int") {
                combination
                    .value_types
                    .insert(atomic.get_key(), atomic);
            }
        }
        TAtomic::TInt => {
            combination.value_types.remove("positive-int");
            combination
                .value_types
                .insert(atomic.get_key(), atomic);
        }
        _ => {
            combination
                .value_types
                .insert(atomic.get_key(), atomic);
        }
    }
}

pub fn combine_into_union(types: Vec<TAtomic>) -> TUnion {
    TUnion::new(combine(types))
}
