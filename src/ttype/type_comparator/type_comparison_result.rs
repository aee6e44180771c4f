use sigil_code_info::{t_atomic::TAtomic, t_union::TUnion};

#[derive(Debug, Clone)]
pub struct TypeComparisonResult {
    /**
     * The input only fits the container after a widening the caller should
     * flag, e.g. `int` into `int(5)`
     */
    pub type_coerced: Option<bool>,

    /* type is coerced from mixed e.g. mixed into string, or array<mixed> into array<string> */
    pub type_coerced_from_mixed: Option<bool>,

    /* type is coerced from a generic `as mixed` param e.g. array<T> into array<string> */
    pub type_coerced_from_as_mixed: Option<bool>,

    /* type is coerced from a general scalar into one of its literals */
    pub type_coerced_from_scalar: Option<bool>,

    /* the input only matched because it has a usable __toString */
    pub to_string_cast: Option<bool>,

    /**
     * A weaker scalar match exists even though containment failed, e.g.
     * float into int
     */
    pub scalar_type_match_found: Option<bool>,

    pub replacement_union_type: Option<TUnion>,
    pub replacement_atomic_type: Option<TAtomic>,
}

impl Default for TypeComparisonResult {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeComparisonResult {
    pub fn new() -> Self {
        Self {
            type_coerced: None,
            type_coerced_from_mixed: None,
            type_coerced_from_as_mixed: None,
            type_coerced_from_scalar: None,
            to_string_cast: None,
            scalar_type_match_found: None,
            replacement_union_type: None,
            replacement_atomic_type: None,
        }
    }
}
