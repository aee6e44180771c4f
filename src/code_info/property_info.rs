use serde::{Deserialize, Serialize};

use crate::{member_visibility::MemberVisibility, t_union::TUnion};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub is_static: bool,

    pub visibility: MemberVisibility,

    pub type_: TUnion,

    pub has_default: bool,

    pub is_promoted: bool,
}

impl PropertyInfo {
    pub fn new(type_: TUnion) -> Self {
        Self {
            is_static: false,
            visibility: MemberVisibility::Public,
            type_,
            has_default: false,
            is_promoted: false,
        }
    }
}
