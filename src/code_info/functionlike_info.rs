use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{functionlike_parameter::FunctionLikeParameter, t_union::TUnion};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionLikeInfo {
    pub name: String,

    pub params: Vec<FunctionLikeParameter>,

    pub return_type: Option<TUnion>,

    /**
     * Function-level template "as" types, keyed by template name and then by
     * defining entity (`fn-` + lowercase function id).
     */
    pub template_types: IndexMap<String, FxHashMap<String, TUnion>>,

    pub is_pure: bool,

    pub is_static: bool,

    pub is_abstract: bool,

    pub user_defined: bool,
}

impl FunctionLikeInfo {
    pub fn new(name: String) -> Self {
        Self {
            name,
            params: Vec::new(),
            return_type: None,
            template_types: IndexMap::new(),
            is_pure: false,
            is_static: false,
            is_abstract: false,
            user_defined: true,
        }
    }
}
