pub mod classlike_info;
pub mod code_location;
pub mod codebase_info;
pub mod config;
pub mod functionlike_info;
pub mod functionlike_parameter;
pub mod lookup_error;
pub mod member_visibility;
pub mod method_identifier;
pub mod property_info;
pub mod t_atomic;
pub mod t_union;

pub const STR_CLOSURE: &str = "Closure";
pub const STR_GENERATOR: &str = "Generator";
pub const STR_ITERATOR: &str = "Iterator";
pub const STR_TRAVERSABLE: &str = "Traversable";
pub const STR_STRINGABLE: &str = "Stringable";
pub const STR_STDCLASS: &str = "stdClass";
pub const STR_INVOKE: &str = "__invoke";
pub const STR_TOSTRING: &str = "__tostring";

#[cfg(test)]
mod tests;
