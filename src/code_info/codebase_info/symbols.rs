use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::code_location::FilePath;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Enum,
    Trait,
    Interface,
}

/// Every known classlike, keyed by lowercase name.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Symbols {
    pub all: FxHashMap<String, SymbolKind>,
    pub classlike_files: FxHashMap<String, FilePath>,
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbols {
    pub fn new() -> Symbols {
        Symbols {
            all: FxHashMap::default(),
            classlike_files: FxHashMap::default(),
        }
    }

    pub fn add_classlike_name(
        &mut self,
        fq_class_name: &str,
        kind: SymbolKind,
        file_path: Option<FilePath>,
    ) {
        let lc_name = fq_class_name.to_ascii_lowercase();

        if let Some(file_path) = file_path {
            self.classlike_files.insert(lc_name.clone(), file_path);
        }

        self.all.insert(lc_name, kind);
    }

    pub fn get_kind(&self, fq_class_name: &str) -> Option<SymbolKind> {
        self.all.get(&fq_class_name.to_ascii_lowercase()).copied()
    }
}
