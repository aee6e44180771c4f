use std::{error::Error, fmt};

use crate::method_identifier::MethodIdentifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    ClassNotFound(String),
    MethodNotFound(MethodIdentifier),
    PropertyNotFound(String, String),
    FunctionNotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::ClassNotFound(name) => write!(f, "Class {} does not exist", name),
            LookupError::MethodNotFound(method_id) => {
                write!(f, "Method {} does not exist", method_id)
            }
            LookupError::PropertyNotFound(class_name, property_name) => {
                write!(f, "Property {}::${} does not exist", class_name, property_name)
            }
            LookupError::FunctionNotFound(name) => write!(f, "Function {} does not exist", name),
        }
    }
}

impl Error for LookupError {}
