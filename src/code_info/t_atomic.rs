use crate::{
    codebase_info::CodebaseInfo, functionlike_parameter::FunctionLikeParameter, t_union::TUnion,
};
use indexmap::IndexMap;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

impl ArrayKey {
    pub fn to_string(&self) -> String {
        match self {
            ArrayKey::Int(i) => i.to_string(),
            ArrayKey::String(k) => format!("'{}'", k),
        }
    }

    pub fn to_atomic(&self) -> TAtomic {
        match self {
            ArrayKey::Int(value) => TAtomic::TLiteralInt { value: *value },
            ArrayKey::String(value) => TAtomic::TLiteralString {
                value: value.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TAtomic {
    TArray {
        key_param: TUnion,
        value_param: TUnion,
        non_empty: bool,
        is_callable: bool,
    },
    TArraykey,
    TBool,
    TCallable {
        params: Option<Vec<FunctionLikeParameter>>,
        return_type: Option<TUnion>,
        is_pure: Option<bool>,
    },
    TCallableObject,
    TCallableString,
    TClassString {
        as_: String,
        as_type: Option<Box<TAtomic>>,
    },
    TClassStringMap {
        param_name: String,
        as_type: Option<Box<TAtomic>>,
        value_param: TUnion,
    },
    TClosure {
        params: Option<Vec<FunctionLikeParameter>>,
        return_type: Option<TUnion>,
        is_pure: Option<bool>,
    },
    TConditional {
        param_name: String,
        defining_entity: String,
        as_type: TUnion,
        conditional_type: TUnion,
        if_type: TUnion,
        else_type: TUnion,
    },
    TDependentGetClass {
        as_type: TUnion,
    },
    TDependentGetDebugType,
    TDependentGetType,
    TEmptyMixed,
    TFalse,
    TFloat,
    THtmlEscapedString,
    TInt,
    TIterable {
        type_params: Vec<TUnion>,
        extra_types: Option<FxHashMap<String, TAtomic>>,
    },
    TKeyedArray {
        properties: IndexMap<ArrayKey, TUnion>,
        is_list: bool,
        is_callable: bool,
        fallback_params: Option<(TUnion, TUnion)>,
    },
    TList {
        type_param: TUnion,
        non_empty: bool,
        is_callable: bool,
    },
    TLiteralClassString {
        name: String,
    },
    TLiteralFloat {
        value: f64,
    },
    TLiteralInt {
        value: i64,
    },
    TLiteralString {
        value: String,
    },
    TLowercaseString,
    TMixed,
    TNamedObject {
        name: String,
        type_params: Option<Vec<TUnion>>,
        was_static: bool,
        extra_types: Option<FxHashMap<String, TAtomic>>,
        remapped_params: bool,
    },
    TNever,
    TNonEmptyLowercaseString,
    TNonEmptyString,
    TNull,
    TNumeric,
    TNumericString,
    TObject,
    TObjectWithProperties {
        properties: IndexMap<String, TUnion>,
        methods: IndexMap<String, String>,
        extra_types: Option<FxHashMap<String, TAtomic>>,
    },
    TPositiveInt,
    TScalar,
    TSingleLetter,
    TString,
    TTemplateKeyOf {
        param_name: String,
        defining_entity: String,
        as_type: TUnion,
    },
    TTemplateParam {
        param_name: String,
        as_type: TUnion,
        defining_entity: String,
        extra_types: Option<FxHashMap<String, TAtomic>>,
    },
    TTemplateParamClass {
        param_name: String,
        defining_entity: String,
        as_: String,
        as_type: Option<Box<TAtomic>>,
    },
    TTraitString,
    TTrue,
    TVoid,
}

impl TAtomic {
    pub fn get_id(&self) -> String {
        match self {
            TAtomic::TArray {
                key_param,
                value_param,
                non_empty,
                is_callable,
            } => {
                let mut str = String::new();
                if *is_callable {
                    str += "callable-";
                }
                if *non_empty {
                    str += "non-empty-";
                }
                str += "array<";
                str += key_param.get_id().as_str();
                str += ", ";
                str += value_param.get_id().as_str();
                str += ">";
                str
            }
            TAtomic::TList {
                type_param,
                non_empty,
                is_callable,
            } => {
                let mut str = String::new();
                if *is_callable {
                    str += "callable-";
                }
                if *non_empty {
                    str += "non-empty-";
                }
                str += "list<";
                str += type_param.get_id().as_str();
                str += ">";
                str
            }
            TAtomic::TKeyedArray {
                properties,
                is_list,
                is_callable,
                fallback_params,
            } => {
                let mut str = String::new();
                if *is_callable {
                    str += "callable-";
                }
                str += if *is_list { "list{" } else { "array{" };
                str += properties
                    .iter()
                    .map(|(key, property_type)| {
                        format!(
                            "{}{}: {}",
                            key.to_string(),
                            if property_type.possibly_undefined {
                                "?"
                            } else {
                                ""
                            },
                            property_type.get_id()
                        )
                    })
                    .join(", ")
                    .as_str();

                if let Some((key_param, value_param)) = fallback_params {
                    str += ", ...<";
                    str += key_param.get_id().as_str();
                    str += ", ";
                    str += value_param.get_id().as_str();
                    str += ">";
                }

                str += "}";
                str
            }
            TAtomic::TClassStringMap {
                param_name,
                as_type,
                value_param,
            } => {
                format!(
                    "class-string-map<{} as {}, {}>",
                    param_name,
                    if let Some(as_type) = as_type {
                        as_type.get_id()
                    } else {
                        "object".to_string()
                    },
                    value_param.get_id()
                )
            }
            TAtomic::TArraykey => "array-key".to_string(),
            TAtomic::TBool => "bool".to_string(),
            TAtomic::TCallable {
                params,
                return_type,
                is_pure,
            } => get_callable_id(
                if let Some(true) = is_pure {
                    "pure-callable"
                } else {
                    "callable"
                },
                params,
                return_type,
            ),
            TAtomic::TClosure {
                params,
                return_type,
                is_pure,
            } => get_callable_id(
                if let Some(true) = is_pure {
                    "pure-Closure"
                } else {
                    "Closure"
                },
                params,
                return_type,
            ),
            TAtomic::TCallableObject => "callable-object".to_string(),
            TAtomic::TCallableString => "callable-string".to_string(),
            TAtomic::TClassString { as_, as_type } => {
                if let Some(as_type) = as_type {
                    format!("class-string<{}>", as_type.get_id())
                } else if as_ == "object" {
                    "class-string".to_string()
                } else {
                    format!("class-string<{}>", as_)
                }
            }
            TAtomic::TLiteralClassString { name } => format!("{}::class", name),
            TAtomic::TTemplateParamClass {
                param_name,
                defining_entity,
                as_,
                ..
            } => format!(
                "class-string<{}:{} as {}>",
                param_name, defining_entity, as_
            ),
            TAtomic::TConditional {
                param_name,
                conditional_type,
                if_type,
                else_type,
                ..
            } => format!(
                "({} is {} ? {} : {})",
                param_name,
                conditional_type.get_id(),
                if_type.get_id(),
                else_type.get_id()
            ),
            TAtomic::TDependentGetClass { as_type } => {
                format!("get-class-of<{}>", as_type.get_id())
            }
            TAtomic::TDependentGetDebugType => "get-debug-type".to_string(),
            TAtomic::TDependentGetType => "get-type".to_string(),
            TAtomic::TEmptyMixed => "empty-mixed".to_string(),
            TAtomic::TFalse => "false".to_string(),
            TAtomic::TFloat => "float".to_string(),
            TAtomic::THtmlEscapedString => "html-escaped-string".to_string(),
            TAtomic::TInt => "int".to_string(),
            TAtomic::TIterable {
                type_params,
                extra_types,
            } => {
                let mut str = String::new();
                str += "iterable<";
                str += type_params.iter().map(|tunion| tunion.get_id()).join(", ").as_str();
                str += ">";
                str += get_extra_types_id(extra_types).as_str();
                str
            }
            TAtomic::TLiteralFloat { value } => format!("float({})", value),
            TAtomic::TLiteralInt { value } => format!("int({})", value),
            TAtomic::TLiteralString { value } => format!("string({})", value),
            TAtomic::TLowercaseString => "lowercase-string".to_string(),
            TAtomic::TMixed => "mixed".to_string(),
            TAtomic::TNamedObject {
                name,
                type_params,
                was_static,
                extra_types,
                ..
            } => {
                let mut str = String::new();
                str += name.as_str();
                if let Some(type_params) = type_params {
                    str += "<";
                    str += type_params.iter().map(|tunion| tunion.get_id()).join(", ").as_str();
                    str += ">";
                }
                if *was_static {
                    str += "&static";
                }
                str += get_extra_types_id(extra_types).as_str();
                str
            }
            TAtomic::TNever => "never".to_string(),
            TAtomic::TNonEmptyLowercaseString => "non-empty-lowercase-string".to_string(),
            TAtomic::TNonEmptyString => "non-empty-string".to_string(),
            TAtomic::TNull => "null".to_string(),
            TAtomic::TNumeric => "numeric".to_string(),
            TAtomic::TNumericString => "numeric-string".to_string(),
            TAtomic::TObject => "object".to_string(),
            TAtomic::TObjectWithProperties {
                properties,
                methods,
                extra_types,
            } => {
                let mut str = String::new();
                str += "object{";
                str += properties
                    .iter()
                    .map(|(name, property_type)| {
                        format!(
                            "'{}'{}: {}",
                            name,
                            if property_type.possibly_undefined {
                                "?"
                            } else {
                                ""
                            },
                            property_type.get_id()
                        )
                    })
                    .chain(methods.keys().map(|method| format!("{}()", method)))
                    .join(", ")
                    .as_str();
                str += "}";
                str += get_extra_types_id(extra_types).as_str();
                str
            }
            TAtomic::TPositiveInt => "positive-int".to_string(),
            TAtomic::TScalar => "scalar".to_string(),
            TAtomic::TSingleLetter => "single-letter".to_string(),
            TAtomic::TString => "string".to_string(),
            TAtomic::TTemplateKeyOf { param_name, .. } => format!("key-of<{}>", param_name),
            TAtomic::TTemplateParam {
                param_name,
                as_type,
                defining_entity,
                extra_types,
            } => {
                let mut str = String::new();
                str += param_name.as_str();
                str += ":";
                str += defining_entity.as_str();
                str += " as ";
                str += as_type.get_id().as_str();
                str += get_extra_types_id(extra_types).as_str();
                str
            }
            TAtomic::TTraitString => "trait-string".to_string(),
            TAtomic::TTrue => "true".to_string(),
            TAtomic::TVoid => "void".to_string(),
        }
    }

    pub fn get_key(&self) -> String {
        match self {
            TAtomic::TArray {
                non_empty,
                is_callable,
                ..
            } => {
                if *is_callable {
                    "callable-array".to_string()
                } else if *non_empty {
                    "non-empty-array".to_string()
                } else {
                    "array".to_string()
                }
            }
            TAtomic::TList {
                non_empty,
                is_callable,
                ..
            } => {
                if *is_callable {
                    "callable-list".to_string()
                } else if *non_empty {
                    "non-empty-list".to_string()
                } else {
                    "list".to_string()
                }
            }
            TAtomic::TCallable { .. } => "callable".to_string(),
            TAtomic::TClosure { .. } => "Closure".to_string(),
            TAtomic::TIterable { extra_types, .. } => {
                format!("iterable{}", get_extra_types_key(extra_types))
            }
            TAtomic::TNamedObject {
                name,
                type_params,
                extra_types,
                ..
            } => {
                let mut str = String::new();
                str += name.as_str();
                if let Some(type_params) = type_params {
                    str += "<";
                    str += type_params.iter().map(|tunion| tunion.get_key()).join(", ").as_str();
                    str += ">";
                }
                str += get_extra_types_key(extra_types).as_str();
                str
            }
            TAtomic::TTemplateParam {
                param_name,
                defining_entity,
                extra_types,
                ..
            } => format!(
                "{}:{}{}",
                param_name,
                defining_entity,
                get_extra_types_key(extra_types)
            ),
            TAtomic::TTemplateParamClass {
                param_name,
                defining_entity,
                ..
            } => format!("class-string<{}:{}>", param_name, defining_entity),
            TAtomic::TTemplateKeyOf {
                param_name,
                defining_entity,
                ..
            } => format!("key-of<{}:{}>", param_name, defining_entity),
            _ => self.get_id(),
        }
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        matches!(self, TAtomic::TMixed | TAtomic::TEmptyMixed)
    }

    pub fn is_templated_as_mixed(&self) -> bool {
        match self {
            TAtomic::TTemplateParam {
                as_type,
                extra_types: None,
                ..
            } => as_type.is_mixed(),
            _ => false,
        }
    }

    /// Every atomic that is a string at runtime.
    pub fn is_string_family(&self) -> bool {
        matches!(
            self,
            TAtomic::TString
                | TAtomic::TLiteralString { .. }
                | TAtomic::TNonEmptyString
                | TAtomic::TLowercaseString
                | TAtomic::TNonEmptyLowercaseString
                | TAtomic::TNumericString
                | TAtomic::THtmlEscapedString
                | TAtomic::TClassString { .. }
                | TAtomic::TLiteralClassString { .. }
                | TAtomic::TTemplateParamClass { .. }
                | TAtomic::TCallableString
                | TAtomic::TTraitString
                | TAtomic::TSingleLetter
                | TAtomic::TDependentGetClass { .. }
                | TAtomic::TDependentGetDebugType
                | TAtomic::TDependentGetType
        )
    }

    #[inline]
    pub fn is_non_empty_string_family(&self) -> bool {
        matches!(
            self,
            TAtomic::TNonEmptyString | TAtomic::TNonEmptyLowercaseString
        )
    }

    #[inline]
    pub fn is_class_string_family(&self) -> bool {
        matches!(
            self,
            TAtomic::TClassString { .. }
                | TAtomic::TLiteralClassString { .. }
                | TAtomic::TTemplateParamClass { .. }
        )
    }

    #[inline]
    pub fn is_int_family(&self) -> bool {
        matches!(
            self,
            TAtomic::TInt | TAtomic::TLiteralInt { .. } | TAtomic::TPositiveInt
        )
    }

    #[inline]
    pub fn is_float_family(&self) -> bool {
        matches!(self, TAtomic::TFloat | TAtomic::TLiteralFloat { .. })
    }

    #[inline]
    pub fn is_bool_family(&self) -> bool {
        matches!(self, TAtomic::TBool | TAtomic::TTrue | TAtomic::TFalse)
    }

    pub fn is_scalar(&self) -> bool {
        self.is_string_family()
            || self.is_int_family()
            || self.is_float_family()
            || self.is_bool_family()
            || matches!(
                self,
                TAtomic::TNumeric
                    | TAtomic::TArraykey
                    | TAtomic::TTemplateKeyOf { .. }
                    | TAtomic::TScalar
            )
    }

    pub fn is_numeric_type(&self) -> bool {
        match self {
            TAtomic::TLiteralString { value } => is_numeric_literal(value),
            TAtomic::TNumericString | TAtomic::TNumeric => true,
            _ => self.is_int_family() || self.is_float_family(),
        }
    }

    pub fn is_object_type(&self) -> bool {
        match self {
            TAtomic::TObject
            | TAtomic::TNamedObject { .. }
            | TAtomic::TClosure { .. }
            | TAtomic::TCallableObject
            | TAtomic::TObjectWithProperties { .. } => true,
            _ => self.is_templated_as_object(),
        }
    }

    pub fn is_templated_as_object(&self) -> bool {
        match self {
            TAtomic::TTemplateParam {
                as_type,
                extra_types: None,
                ..
            } => as_type.is_objecty(),
            _ => false,
        }
    }

    #[inline]
    pub fn is_array_like(&self) -> bool {
        matches!(
            self,
            TAtomic::TArray { .. }
                | TAtomic::TList { .. }
                | TAtomic::TKeyedArray { .. }
                | TAtomic::TClassStringMap { .. }
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TAtomic::TLiteralInt { .. }
                | TAtomic::TLiteralFloat { .. }
                | TAtomic::TLiteralString { .. }
                | TAtomic::TLiteralClassString { .. }
                | TAtomic::TTrue
                | TAtomic::TFalse
        )
    }

    /// `array<never, never>`, the type of `[]`
    pub fn is_empty_array(&self) -> bool {
        match self {
            TAtomic::TArray {
                key_param,
                value_param,
                non_empty: false,
                is_callable: false,
            } => key_param.is_nothing() && value_param.is_nothing(),
            _ => false,
        }
    }

    pub fn get_extra_types(&self) -> Option<&FxHashMap<String, TAtomic>> {
        match self {
            TAtomic::TNamedObject { extra_types, .. }
            | TAtomic::TTemplateParam { extra_types, .. }
            | TAtomic::TIterable { extra_types, .. }
            | TAtomic::TObjectWithProperties { extra_types, .. } => extra_types.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn has_extra_types(&self) -> bool {
        self.get_extra_types().is_some()
    }

    pub fn has_traversable_interface(&self, codebase: &CodebaseInfo) -> bool {
        if let TAtomic::TNamedObject {
            name, extra_types, ..
        } = self
        {
            if name.eq_ignore_ascii_case("Traversable")
                || (codebase.class_or_interface_exists(name)
                    && (codebase.class_extends_or_implements(name, "Traversable")
                        || codebase.interface_extends(name, "Traversable")))
            {
                return true;
            }

            if let Some(extra_types) = extra_types {
                for (_, extra_type) in extra_types {
                    if extra_type.has_traversable_interface(codebase) {
                        return true;
                    }
                }
            }
        }

        false
    }

    pub fn add_intersection_type(&mut self, atomic: TAtomic) {
        if let TAtomic::TNamedObject {
            ref mut extra_types,
            ..
        }
        | TAtomic::TTemplateParam {
            ref mut extra_types,
            ..
        }
        | TAtomic::TIterable {
            ref mut extra_types,
            ..
        }
        | TAtomic::TObjectWithProperties {
            ref mut extra_types,
            ..
        } = self
        {
            if let Some(extra_types) = extra_types {
                extra_types.insert(atomic.get_key(), atomic);
            } else {
                let mut map = FxHashMap::default();
                map.insert(atomic.get_key(), atomic);
                *extra_types = Some(map);
            }
        }
    }

    pub fn clone_without_intersection_types(&self) -> TAtomic {
        let mut clone = self.clone();

        if let TAtomic::TNamedObject {
            ref mut extra_types,
            ..
        }
        | TAtomic::TTemplateParam {
            ref mut extra_types,
            ..
        }
        | TAtomic::TIterable {
            ref mut extra_types,
            ..
        }
        | TAtomic::TObjectWithProperties {
            ref mut extra_types,
            ..
        } = clone
        {
            *extra_types = None
        }

        clone
    }

    /// The atomic itself plus its intersection members. Templates bounded by
    /// another template are split so `T1 as T2 as object` becomes
    /// `(T1 as object) & (T2 as object)`.
    pub fn get_intersection_types(&self) -> Vec<TAtomic> {
        if let TAtomic::TTemplateParam { as_type, .. } = self {
            for (_, as_atomic) in &as_type.types {
                if let TAtomic::TTemplateParam {
                    as_type: extends_as_type,
                    ..
                } = as_atomic
                {
                    let mut intersection_types = as_atomic.get_intersection_types();
                    let mut type_part = self.clone();

                    if let TAtomic::TTemplateParam {
                        ref mut as_type, ..
                    } = type_part
                    {
                        *as_type = extends_as_type.clone();
                    }

                    intersection_types.push(type_part);
                    return intersection_types;
                }
            }
        }

        let mut intersection_types = vec![self.clone_without_intersection_types()];

        if let Some(extra_types) = self.get_extra_types() {
            intersection_types.extend(extra_types.values().cloned());
        }

        intersection_types
    }
}

fn get_callable_id(
    prefix: &str,
    params: &Option<Vec<FunctionLikeParameter>>,
    return_type: &Option<TUnion>,
) -> String {
    let mut str = String::new();
    str += prefix;

    if let Some(params) = params {
        str += "(";
        str += params.iter().map(|param| param.get_id()).join(", ").as_str();
        str += ")";
    }

    if let Some(return_type) = return_type {
        str += ":";
        str += return_type.get_id().as_str();
    }

    str
}

fn get_extra_types_id(extra_types: &Option<FxHashMap<String, TAtomic>>) -> String {
    if let Some(extra_types) = extra_types {
        extra_types
            .values()
            .map(|atomic| format!("&{}", atomic.get_id()))
            .sorted()
            .join("")
    } else {
        String::new()
    }
}

fn get_extra_types_key(extra_types: &Option<FxHashMap<String, TAtomic>>) -> String {
    if let Some(extra_types) = extra_types {
        extra_types.keys().map(|key| format!("&{}", key)).sorted().join("")
    } else {
        String::new()
    }
}

/// Mirrors PHP's `is_numeric` for strings: optional surrounding whitespace,
/// an optional sign, digits with an optional fraction, and an optional exponent.
pub fn is_numeric_literal(value: &str) -> bool {
    let trimmed = value.trim_matches(|c: char| c == ' ' || ('\t'..='\r').contains(&c));
    let bytes = trimmed.as_bytes();

    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mut digits = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;

        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;

        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }

        let mut exponent_digits = 0;

        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            exponent_digits += 1;
        }

        if exponent_digits == 0 {
            return false;
        }
    }

    i == bytes.len()
}
