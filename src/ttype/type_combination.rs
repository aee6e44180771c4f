use rustc_hash::FxHashMap;
use sigil_code_info::{t_atomic::TAtomic, t_union::TUnion};

#[derive(Debug)]
pub(crate) struct TypeCombination {
    pub value_types: FxHashMap<String, TAtomic>,

    pub literal_strings: FxHashMap<String, TAtomic>,
    pub literal_ints: FxHashMap<String, TAtomic>,
    pub literal_floats: FxHashMap<String, TAtomic>,

    pub array_type_params: Option<(TUnion, TUnion)>,
    pub array_always_filled: bool,

    pub list_type_param: Option<TUnion>,
    pub list_always_filled: bool,

    pub vanilla_mixed: bool,
    pub empty_mixed: bool,
    pub has_never: bool,
}

impl TypeCombination {
    pub(crate) fn new() -> Self {
        Self {
            value_types: FxHashMap::default(),
            literal_strings: FxHashMap::default(),
            literal_ints: FxHashMap::default(),
            literal_floats: FxHashMap::default(),
            array_type_params: None,
            array_always_filled: true,
            list_type_param: None,
            list_always_filled: true,
            vanilla_mixed: false,
            empty_mixed: false,
            has_never: false,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value_types.is_empty()
            && self.literal_strings.is_empty()
            && self.literal_ints.is_empty()
            && self.literal_floats.is_empty()
            && self.array_type_params.is_none()
            && self.list_type_param.is_none()
    }
}
