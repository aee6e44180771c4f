use serde::{Deserialize, Serialize};

use crate::t_union::TUnion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLikeParameter {
    pub name: String,

    pub signature_type: Option<TUnion>,

    pub is_optional: bool,

    pub is_nullable: bool,

    pub is_variadic: bool,

    pub by_ref: bool,
}

impl FunctionLikeParameter {
    pub fn new(name: String) -> Self {
        Self {
            name,
            signature_type: None,
            is_optional: false,
            is_nullable: false,
            is_variadic: false,
            by_ref: false,
        }
    }

    pub fn with_type(name: &str, signature_type: TUnion) -> Self {
        let mut param = Self::new(name.to_string());
        param.is_nullable = signature_type.is_nullable();
        param.signature_type = Some(signature_type);
        param
    }

    pub fn get_id(&self) -> String {
        let mut str = String::new();

        if let Some(t) = &self.signature_type {
            str += t.get_id().as_str();
        } else {
            str += "mixed";
        }

        str += if self.is_variadic { "..." } else { "" };
        str += if self.is_optional { "=" } else { "" };
        str
    }
}
