use crate::t_atomic::TAtomic;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TUnion {
    pub types: BTreeMap<String, TAtomic>,

    pub possibly_undefined: bool,

    // special case because try is a weird situation
    pub possibly_undefined_from_try: bool,

    pub from_docblock: bool,

    // Whether or not this union comes from a template "as" default
    pub from_template_default: bool,

    pub ignore_nullable_issues: bool,

    pub ignore_falsable_issues: bool,

    pub had_template: bool,
}

impl TUnion {
    pub fn new(types: Vec<TAtomic>) -> TUnion {
        let mut keyed_types = BTreeMap::new();

        for ttype in types.into_iter() {
            let key = ttype.get_key();
            keyed_types.insert(key, ttype);
        }

        TUnion {
            types: keyed_types,
            possibly_undefined: false,
            possibly_undefined_from_try: false,
            from_docblock: false,
            from_template_default: false,
            ignore_nullable_issues: false,
            ignore_falsable_issues: false,
            had_template: false,
        }
    }

    pub fn add_type(&mut self, new_type: TAtomic) {
        self.types.insert(new_type.get_key(), new_type);
    }

    pub fn remove_type(&mut self, key: &str) -> Option<TAtomic> {
        self.types.remove(key)
    }

    #[inline]
    pub fn has_type(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    pub fn is_int(&self) -> bool {
        !self.types.is_empty() && self.types.values().all(|atomic| atomic.is_int_family())
    }

    pub fn has_int(&self) -> bool {
        self.types.values().any(|atomic| {
            atomic.is_int_family() || matches!(atomic, TAtomic::TArraykey | TAtomic::TNumeric)
        })
    }

    pub fn has_float(&self) -> bool {
        self.types
            .values()
            .any(|atomic| atomic.is_float_family() || matches!(atomic, TAtomic::TNumeric))
    }

    pub fn has_string(&self) -> bool {
        self.types
            .values()
            .any(|atomic| atomic.is_string_family() || matches!(atomic, TAtomic::TArraykey))
    }

    pub fn has_scalar(&self) -> bool {
        self.types
            .values()
            .any(|atomic| matches!(atomic, TAtomic::TScalar))
    }

    pub fn has_array(&self) -> bool {
        self.types.values().any(|atomic| atomic.is_array_like())
    }

    pub fn is_arraykey(&self) -> bool {
        self.types.len() == 1 && self.types.contains_key("array-key")
    }

    pub fn is_nothing(&self) -> bool {
        self.types.is_empty() || (self.types.len() == 1 && self.types.contains_key("never"))
    }

    /// A union consisting solely of `mixed` (or `empty-mixed`).
    pub fn is_mixed(&self) -> bool {
        self.types.len() == 1 && self.types.values().all(|atomic| atomic.is_mixed())
    }

    pub fn has_mixed(&self) -> bool {
        self.types.contains_key("mixed")
    }

    pub fn is_empty_mixed(&self) -> bool {
        self.types.len() == 1 && self.types.contains_key("empty-mixed")
    }

    pub fn is_null(&self) -> bool {
        self.types.len() == 1 && self.types.contains_key("null")
    }

    pub fn is_nullable(&self) -> bool {
        self.types.contains_key("null") && self.types.len() >= 2
    }

    pub fn is_void(&self) -> bool {
        self.types.len() == 1 && self.types.contains_key("void")
    }

    pub fn is_false(&self) -> bool {
        self.types.len() == 1 && self.types.contains_key("false")
    }

    pub fn is_objecty(&self) -> bool {
        for (_, atomic) in &self.types {
            if let TAtomic::TObject
            | TAtomic::TNamedObject { .. }
            | TAtomic::TClosure { .. }
            | TAtomic::TCallableObject
            | TAtomic::TObjectWithProperties { .. } = atomic
            {
                continue;
            }

            if atomic.is_templated_as_object() {
                continue;
            }

            return false;
        }

        true
    }

    pub fn has_template_or_static(&self) -> bool {
        for (_, atomic) in &self.types {
            if let TAtomic::TTemplateParam { .. } = atomic {
                return true;
            }

            if let TAtomic::TNamedObject {
                extra_types,
                was_static,
                ..
            } = atomic
            {
                if *was_static {
                    return true;
                }

                if let Some(extra_types) = extra_types {
                    for (_, extra_type) in extra_types {
                        if let TAtomic::TTemplateParam { .. } = extra_type {
                            return true;
                        }
                    }
                }
            }
        }

        false
    }

    pub fn has_template(&self) -> bool {
        for (_, atomic) in &self.types {
            if let TAtomic::TTemplateParam { .. } = atomic {
                return true;
            }

            if let TAtomic::TNamedObject {
                extra_types: Some(extra_types),
                ..
            } = atomic
            {
                for (_, extra_type) in extra_types {
                    if let TAtomic::TTemplateParam { .. } = extra_type {
                        return true;
                    }
                }
            }
        }

        false
    }

    pub fn has_literal_value(&self) -> bool {
        self.types.values().any(|atomic| atomic.is_literal())
    }

    pub fn has_empty_array(&self) -> bool {
        self.types.values().any(|atomic| atomic.is_empty_array())
    }

    /// A `static` object that has since been resolved to a concrete class.
    pub fn has_former_static_object(&self) -> bool {
        self.types
            .values()
            .any(|atomic| matches!(atomic, TAtomic::TNamedObject { was_static: true, .. }))
    }

    pub fn is_former_static_object(&self) -> bool {
        !self.types.is_empty()
            && self
                .types
                .values()
                .all(|atomic| matches!(atomic, TAtomic::TNamedObject { was_static: true, .. }))
    }

    pub fn is_single(&self) -> bool {
        self.types.len() == 1
    }

    pub fn get_single(&self) -> Option<&TAtomic> {
        if self.types.len() == 1 {
            self.types.values().next()
        } else {
            None
        }
    }

    pub fn is_single_string_literal(&self) -> bool {
        matches!(self.get_single(), Some(TAtomic::TLiteralString { .. }))
    }

    pub fn get_single_string_literal(&self) -> Option<&str> {
        if let Some(TAtomic::TLiteralString { value }) = self.get_single() {
            Some(value.as_str())
        } else {
            None
        }
    }

    pub fn get_key(&self) -> String {
        self.types.keys().join("|")
    }

    pub fn get_id(&self) -> String {
        self.types.values().map(|atomic| atomic.get_id()).join("|")
    }
}
