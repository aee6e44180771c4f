pub mod symbols;

use std::{collections::hash_map::Entry, fmt, sync::Mutex};

use self::symbols::SymbolKind;
pub use self::symbols::Symbols;
use crate::classlike_info::ClassLikeInfo;
use crate::code_location::FilePath;
use crate::config::Config;
use crate::functionlike_info::FunctionLikeInfo;
use crate::lookup_error::LookupError;
use crate::method_identifier::MethodIdentifier;
use crate::property_info::PropertyInfo;
use crate::t_atomic::TAtomic;
use crate::t_union::TUnion;
use rustc_hash::{FxHashMap, FxHashSet};
use sigil_logger::Logger;

/// Member names (`class::method`, or a bare method name when the class is
/// unknown) accessed through values too vague to resolve, keyed by the file
/// they were seen from.
#[derive(Default)]
pub struct MixedMemberNames(Mutex<FxHashMap<FilePath, FxHashSet<String>>>);

impl MixedMemberNames {
    pub fn add(&self, member_name: String, calling_context: &FilePath) {
        if let Ok(mut names) = self.0.lock() {
            names
                .entry(calling_context.clone())
                .or_default()
                .insert(member_name);
        }
    }

    pub fn get(&self, calling_context: &FilePath) -> FxHashSet<String> {
        if let Ok(names) = self.0.lock() {
            names.get(calling_context).cloned().unwrap_or_default()
        } else {
            FxHashSet::default()
        }
    }
}

impl Clone for MixedMemberNames {
    fn clone(&self) -> Self {
        if let Ok(names) = self.0.lock() {
            MixedMemberNames(Mutex::new(names.clone()))
        } else {
            MixedMemberNames::default()
        }
    }
}

impl fmt::Debug for MixedMemberNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(names) = self.0.lock() {
            f.debug_tuple("MixedMemberNames").field(&*names).finish()
        } else {
            f.write_str("MixedMemberNames(<poisoned>)")
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodebaseInfo {
    pub classlike_infos: FxHashMap<String, ClassLikeInfo>,
    pub functionlike_infos: FxHashMap<String, FunctionLikeInfo>,
    pub symbols: Symbols,
    pub class_aliases: FxHashMap<String, String>,
    /// Builtin function name to its overloads, each a `TCallable`.
    pub call_map: FxHashMap<String, Vec<TAtomic>>,
    pub config: Config,
    pub logger: Logger,
    pub mixed_member_names: MixedMemberNames,
}

impl Default for CodebaseInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn get_lc_name(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

impl CodebaseInfo {
    pub fn new() -> Self {
        Self {
            classlike_infos: FxHashMap::default(),
            functionlike_infos: FxHashMap::default(),
            symbols: Symbols::new(),
            class_aliases: FxHashMap::default(),
            call_map: FxHashMap::default(),
            config: Config::new(),
            logger: Logger::DevNull,
            mixed_member_names: MixedMemberNames::default(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        let logger = Logger::from_verbosity(config.verbosity);

        Self {
            config,
            logger,
            ..Self::new()
        }
    }

    pub fn class_or_interface_exists(&self, fq_class_name: &str) -> bool {
        matches!(
            self.symbols.get_kind(fq_class_name),
            Some(SymbolKind::Class | SymbolKind::Enum | SymbolKind::Interface)
        )
    }

    pub fn class_exists(&self, fq_class_name: &str) -> bool {
        matches!(
            self.symbols.get_kind(fq_class_name),
            Some(SymbolKind::Class | SymbolKind::Enum)
        )
    }

    pub fn interface_exists(&self, fq_class_name: &str) -> bool {
        matches!(
            self.symbols.get_kind(fq_class_name),
            Some(SymbolKind::Interface)
        )
    }

    pub fn get_classlike_info(&self, fq_class_name: &str) -> Option<&ClassLikeInfo> {
        self.classlike_infos.get(&get_lc_name(fq_class_name))
    }

    pub fn class_extends(&self, child_class: &str, parent_class: &str) -> bool {
        if let Some(classlike_storage) = self.get_classlike_info(child_class) {
            return classlike_storage
                .all_parent_classes
                .contains(&get_lc_name(parent_class));
        }
        false
    }

    pub fn class_extends_or_implements(&self, child_class: &str, parent_class: &str) -> bool {
        self.class_extends(child_class, parent_class)
            || self.class_implements(child_class, parent_class)
    }

    pub fn interface_extends(&self, child_class: &str, parent_class: &str) -> bool {
        if let Some(classlike_storage) = self.get_classlike_info(child_class) {
            return classlike_storage
                .all_parent_interfaces
                .contains(&get_lc_name(parent_class));
        }
        false
    }

    pub fn class_implements(&self, child_class: &str, parent_class: &str) -> bool {
        if let Some(classlike_storage) = self.get_classlike_info(child_class) {
            return classlike_storage
                .all_class_interfaces
                .contains(&get_lc_name(parent_class));
        }
        false
    }

    /// Resolves a class alias to the class it stands for.
    pub fn get_unaliased_name(&self, fq_class_name: &str) -> String {
        if let Some(aliased) = self.class_aliases.get(&get_lc_name(fq_class_name)) {
            aliased.clone()
        } else {
            fq_class_name.to_string()
        }
    }

    pub fn is_mock_class(&self, fq_class_name: &str) -> bool {
        self.config.is_mock_class(fq_class_name)
    }

    pub fn property_exists(&self, classlike_name: &str, property_name: &str) -> bool {
        if let Some(classlike_info) = self.get_classlike_info(classlike_name) {
            classlike_info
                .declaring_property_ids
                .contains_key(property_name)
        } else {
            false
        }
    }

    pub fn method_exists(&self, classlike_name: &str, method_name: &str) -> bool {
        if let Some(classlike_info) = self.get_classlike_info(classlike_name) {
            classlike_info
                .declaring_method_ids
                .contains_key(&method_name.to_ascii_lowercase())
        } else {
            false
        }
    }

    pub fn get_declaring_class_for_property(
        &self,
        fq_class_name: &str,
        property_name: &str,
    ) -> Option<&String> {
        if let Some(classlike_storage) = self.get_classlike_info(fq_class_name) {
            return classlike_storage.declaring_property_ids.get(property_name);
        }

        None
    }

    pub fn get_property(
        &self,
        fq_class_name: &str,
        property_name: &str,
    ) -> Result<&PropertyInfo, LookupError> {
        let declaring_class = self
            .get_declaring_class_for_property(fq_class_name, property_name)
            .ok_or_else(|| {
                LookupError::PropertyNotFound(fq_class_name.to_string(), property_name.to_string())
            })?;

        let declaring_classlike_storage = self
            .get_classlike_info(declaring_class)
            .ok_or_else(|| LookupError::ClassNotFound(declaring_class.clone()))?;

        declaring_classlike_storage
            .properties
            .get(property_name)
            .ok_or_else(|| {
                LookupError::PropertyNotFound(declaring_class.clone(), property_name.to_string())
            })
    }

    pub fn get_declaring_method_id(
        &self,
        method_id: &MethodIdentifier,
    ) -> Result<MethodIdentifier, LookupError> {
        let classlike_storage = self
            .get_classlike_info(&method_id.0)
            .ok_or_else(|| LookupError::ClassNotFound(method_id.0.clone()))?;

        let method_name = method_id.1.to_ascii_lowercase();

        if let Some(declaring_class) = classlike_storage.declaring_method_ids.get(&method_name) {
            Ok(MethodIdentifier(declaring_class.clone(), method_name))
        } else {
            Err(LookupError::MethodNotFound(method_id.clone()))
        }
    }

    pub fn get_method(
        &self,
        method_id: &MethodIdentifier,
    ) -> Result<&FunctionLikeInfo, LookupError> {
        let classlike_storage = self
            .get_classlike_info(&method_id.0)
            .ok_or_else(|| LookupError::ClassNotFound(method_id.0.clone()))?;

        classlike_storage
            .methods
            .get(&method_id.1.to_ascii_lowercase())
            .ok_or_else(|| LookupError::MethodNotFound(method_id.clone()))
    }

    pub fn get_function(&self, function_name: &str) -> Result<&FunctionLikeInfo, LookupError> {
        self.functionlike_infos
            .get(&get_lc_name(function_name))
            .ok_or_else(|| LookupError::FunctionNotFound(function_name.to_string()))
    }

    pub fn get_call_map_overloads(&self, function_name: &str) -> Result<&Vec<TAtomic>, LookupError> {
        self.call_map
            .get(&get_lc_name(function_name))
            .ok_or_else(|| LookupError::FunctionNotFound(function_name.to_string()))
    }

    pub fn add_mixed_member_name(&self, member_name: String, calling_context: &FilePath) {
        self.mixed_member_names.add(member_name, calling_context);
    }

    pub fn add_class(
        &mut self,
        name: &str,
        parent_class: Option<&str>,
        interfaces: &[&str],
    ) -> &mut ClassLikeInfo {
        let mut storage = ClassLikeInfo::new(name.to_string(), SymbolKind::Class);

        if let Some(parent_class) = parent_class {
            let lc_parent = get_lc_name(parent_class);
            storage.direct_parent_class = Some(lc_parent.clone());
            storage.all_parent_classes.insert(lc_parent.clone());

            if let Some(parent_storage) = self.classlike_infos.get(&lc_parent) {
                storage
                    .all_parent_classes
                    .extend(parent_storage.all_parent_classes.iter().cloned());
                storage
                    .all_class_interfaces
                    .extend(parent_storage.all_class_interfaces.iter().cloned());
                inherit_members(&mut storage, parent_storage, true);
            }
        }

        for interface in interfaces {
            let lc_interface = get_lc_name(interface);
            storage.direct_class_interfaces.insert(lc_interface.clone());
            storage.all_class_interfaces.insert(lc_interface.clone());

            if let Some(interface_storage) = self.classlike_infos.get(&lc_interface) {
                storage
                    .all_class_interfaces
                    .extend(interface_storage.all_parent_interfaces.iter().cloned());
                inherit_members(&mut storage, interface_storage, false);
            }
        }

        self.insert_classlike(storage)
    }

    pub fn add_interface(&mut self, name: &str, parent_interfaces: &[&str]) -> &mut ClassLikeInfo {
        let mut storage = ClassLikeInfo::new(name.to_string(), SymbolKind::Interface);
        storage.is_abstract = true;

        for parent_interface in parent_interfaces {
            let lc_parent = get_lc_name(parent_interface);
            storage.all_parent_interfaces.insert(lc_parent.clone());

            if let Some(parent_storage) = self.classlike_infos.get(&lc_parent) {
                storage
                    .all_parent_interfaces
                    .extend(parent_storage.all_parent_interfaces.iter().cloned());
                inherit_members(&mut storage, parent_storage, false);
            }
        }

        self.insert_classlike(storage)
    }

    fn insert_classlike(&mut self, storage: ClassLikeInfo) -> &mut ClassLikeInfo {
        let lc_name = get_lc_name(&storage.name);

        self.symbols
            .add_classlike_name(&storage.name, storage.kind, None);

        match self.classlike_infos.entry(lc_name) {
            Entry::Occupied(mut entry) => {
                entry.insert(storage);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(storage),
        }
    }

    pub fn add_class_alias(&mut self, alias: &str, fq_class_name: &str) {
        self.class_aliases
            .insert(get_lc_name(alias), fq_class_name.to_string());
    }

    /// Registers a method on an already-added classlike. Classlikes added
    /// afterwards inherit it.
    pub fn add_method(&mut self, fq_class_name: &str, method: FunctionLikeInfo) {
        let lc_class = get_lc_name(fq_class_name);

        if let Some(classlike_storage) = self.classlike_infos.get_mut(&lc_class) {
            let lc_method = method.name.to_ascii_lowercase();
            classlike_storage
                .declaring_method_ids
                .insert(lc_method.clone(), lc_class);
            classlike_storage.methods.insert(lc_method, method);
        }
    }

    pub fn add_property(&mut self, fq_class_name: &str, property_name: &str, property: PropertyInfo) {
        let lc_class = get_lc_name(fq_class_name);

        if let Some(classlike_storage) = self.classlike_infos.get_mut(&lc_class) {
            classlike_storage
                .declaring_property_ids
                .insert(property_name.to_string(), lc_class);
            classlike_storage
                .properties
                .insert(property_name.to_string(), property);
        }
    }

    pub fn add_function(&mut self, function: FunctionLikeInfo) {
        self.functionlike_infos
            .insert(get_lc_name(&function.name), function);
    }

    pub fn add_call_map_entry(&mut self, function_name: &str, overloads: Vec<TAtomic>) {
        self.call_map.insert(get_lc_name(function_name), overloads);
    }

    /// The "as" type of a class template, if the class declares one with that name.
    pub fn get_template_as_type(&self, fq_class_name: &str, param_name: &str) -> Option<&TUnion> {
        self.get_classlike_info(fq_class_name)?
            .template_types
            .get(param_name)?
            .values()
            .next()
    }
}

fn inherit_members(storage: &mut ClassLikeInfo, ancestor: &ClassLikeInfo, override_existing: bool) {
    for (method_name, declaring_class) in &ancestor.declaring_method_ids {
        if override_existing || !storage.declaring_method_ids.contains_key(method_name) {
            storage
                .declaring_method_ids
                .insert(method_name.clone(), declaring_class.clone());
        }
    }

    for (property_name, declaring_class) in &ancestor.declaring_property_ids {
        storage
            .declaring_property_ids
            .entry(property_name.clone())
            .or_insert_with(|| declaring_class.clone());
    }

    for (ancestor_name, params) in &ancestor.template_extended_params {
        storage
            .template_extended_params
            .entry(ancestor_name.clone())
            .or_insert_with(|| params.clone());
    }
}
