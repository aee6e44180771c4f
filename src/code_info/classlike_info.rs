use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{
    codebase_info::symbols::SymbolKind, functionlike_info::FunctionLikeInfo,
    property_info::PropertyInfo, t_union::TUnion,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
}

/// Class, interface and trait storage. Hierarchy sets and member maps are
/// keyed by lowercase names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassLikeInfo {
    pub name: String,

    pub kind: SymbolKind,

    pub is_abstract: bool,

    pub is_final: bool,

    /**
     * There can only be one parent class
     */
    pub direct_parent_class: Option<String>,

    /**
     * Parent classes
     */
    pub all_parent_classes: FxHashSet<String>,

    /**
     * Interfaces this class implements directly
     */
    pub direct_class_interfaces: FxHashSet<String>,

    /**
     * Interfaces this class implements explicitly and implicitly
     */
    pub all_class_interfaces: FxHashSet<String>,

    /**
     * All parent interfaces (for interfaces)
     */
    pub all_parent_interfaces: FxHashSet<String>,

    pub methods: FxHashMap<String, FunctionLikeInfo>,

    /**
     * Map from lowercase method name to the lowercase name of the class
     * that declares it, including inherited methods
     */
    pub declaring_method_ids: FxHashMap<String, String>,

    pub properties: FxHashMap<String, PropertyInfo>,

    pub declaring_property_ids: FxHashMap<String, String>,

    /**
     * The class template "as" types, keyed by template name and then by
     * defining class. It's the de-facto list of all templates on a given class.
     */
    pub template_types: IndexMap<String, FxHashMap<String, TUnion>>,

    pub generic_variance: FxHashMap<usize, Variance>,

    /**
     * A map of which generic classlikes are extended or implemented by this class or interface.
     *
     * The annotation "@extends Traversable<SomeClass, SomeOtherClass>" would generate an entry of
     *
     * [
     *     "traversable" => [
     *         "TKey" => SomeClass,
     *         "TValue" => SomeOtherClass
     *     ]
     * ]
     */
    pub template_extended_params: FxHashMap<String, IndexMap<String, TUnion>>,

    pub user_defined: bool,
}

impl ClassLikeInfo {
    pub fn new(name: String, kind: SymbolKind) -> ClassLikeInfo {
        ClassLikeInfo {
            name,
            kind,
            is_abstract: false,
            is_final: false,
            direct_parent_class: None,
            all_parent_classes: FxHashSet::default(),
            direct_class_interfaces: FxHashSet::default(),
            all_class_interfaces: FxHashSet::default(),
            all_parent_interfaces: FxHashSet::default(),
            methods: FxHashMap::default(),
            declaring_method_ids: FxHashMap::default(),
            properties: FxHashMap::default(),
            declaring_property_ids: FxHashMap::default(),
            template_types: IndexMap::new(),
            generic_variance: FxHashMap::default(),
            template_extended_params: FxHashMap::default(),
            user_defined: true,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, SymbolKind::Interface)
    }

    /// Template names in declaration order.
    pub fn get_template_names(&self) -> Vec<&String> {
        self.template_types.keys().collect()
    }
}
