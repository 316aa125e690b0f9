//! Host type registry
//!
//! The concrete reflection facility shipped with the bridge. Types are
//! registered once and never removed; lookups take a shared lock so any
//! number of threads can query the registry concurrently.
//!
//! Two types are always present:
//!
//! | ID | Name            | Kind     |
//! |----|-----------------|----------|
//! | 0  | `System.Object` | class    |
//! | 1  | `System.Type`   | metatype |
//!
//! Every class, struct and enum without an explicit base derives from
//! `System.Object`. Reified type objects have `System.Type` as their
//! runtime type.

use hostlink_sdk::{
    HostObject, HostReflection, HostType, NamespaceRef, ScriptValue, TypeHandle, TypeId, TypeKind,
};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::trace;

/// Full name of the root class
pub const OBJECT_TYPE_NAME: &str = "System.Object";
/// Full name of the metatype
pub const METATYPE_NAME: &str = "System.Type";

/// Errors raised while registering or instantiating host types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Name is empty or has a malformed segment
    #[error("Invalid type name: '{0}'")]
    InvalidName(String),

    /// A type with this full name already exists
    #[error("Type already registered: {0}")]
    DuplicateType(String),

    /// Referenced type does not belong to this registry
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Base type not allowed for the declared kind
    #[error("Invalid base type for {ty}: {reason}")]
    InvalidBase {
        /// Type being registered
        ty: String,
        /// What went wrong
        reason: String,
    },

    /// Implemented type is not an interface
    #[error("{ty} lists {iface}, which is not an interface")]
    NotAnInterface {
        /// Type being registered
        ty: String,
        /// Offending entry
        iface: String,
    },

    /// Objects cannot have this type as their runtime type
    #[error("Cannot instantiate {kind} type {ty}")]
    NotInstantiable {
        /// Kind of the type
        kind: &'static str,
        /// Type name
        ty: String,
    },
}

/// Declaration of a host type to register.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    kind: TypeKind,
    base: Option<HostType>,
    interfaces: Vec<HostType>,
}

impl TypeDef {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            interfaces: Vec::new(),
        }
    }

    /// Declare a class
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Declare an interface
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Declare a value type
    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Struct)
    }

    /// Declare an enumeration
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    /// Set the base class
    pub fn extends(mut self, base: &HostType) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Add an implemented interface (or an extended one, for interfaces)
    pub fn implements(mut self, iface: &HostType) -> Self {
        self.interfaces.push(iface.clone());
        self
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || !name.split('.').all(is_valid_segment) {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(())
}

struct RegistryInner {
    /// Types indexed by ID
    types: Vec<HostType>,
    /// Full name to ID mapping
    name_to_id: FxHashMap<String, TypeId>,
    /// Every namespace prefix that contains at least one type
    namespaces: FxHashSet<String>,
    /// Reified type objects, one per type
    reified: FxHashMap<TypeId, HostObject>,
}

impl RegistryInner {
    fn insert(&mut self, ty: HostType) {
        let mut prefix = ty.namespace();
        while !prefix.is_empty() {
            if !self.namespaces.insert(prefix.to_string()) {
                break;
            }
            prefix = prefix.rfind('.').map_or("", |dot| &prefix[..dot]);
        }
        self.name_to_id.insert(ty.full_name().to_string(), ty.id());
        self.types.push(ty);
    }

    fn check_known(&self, ty: &HostType) -> Result<(), RegistryError> {
        match self.types.get(ty.id().0 as usize) {
            Some(known) if known == ty => Ok(()),
            _ => Err(RegistryError::UnknownType(ty.full_name().to_string())),
        }
    }
}

/// Registry of host types; implements [`HostReflection`].
pub struct TypeRegistry {
    inner: RwLock<RegistryInner>,
    object_type: HostType,
    metatype: HostType,
}

impl TypeRegistry {
    /// Create a registry holding only the built-in types
    pub fn new() -> Self {
        let object_type = HostType::new(TypeId(0), OBJECT_TYPE_NAME, TypeKind::Class, None, vec![]);
        let metatype = HostType::new(
            TypeId(1),
            METATYPE_NAME,
            TypeKind::Metatype,
            Some(object_type.clone()),
            vec![],
        );

        let mut inner = RegistryInner {
            types: Vec::new(),
            name_to_id: FxHashMap::default(),
            namespaces: FxHashSet::default(),
            reified: FxHashMap::default(),
        };
        inner.insert(object_type.clone());
        inner.insert(metatype.clone());

        Self {
            inner: RwLock::new(inner),
            object_type,
            metatype,
        }
    }

    /// Register a new type
    pub fn register(&self, def: TypeDef) -> Result<HostType, RegistryError> {
        validate_name(&def.name)?;
        let mut inner = self.inner.write();

        if inner.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateType(def.name));
        }

        if let Some(base) = &def.base {
            inner.check_known(base)?;
            let reason = match def.kind {
                TypeKind::Interface => Some("interfaces cannot have a base type"),
                TypeKind::Struct | TypeKind::Enum => Some("value types cannot declare a base type"),
                _ if base.kind() != TypeKind::Class => Some("base must be a class"),
                _ => None,
            };
            if let Some(reason) = reason {
                return Err(RegistryError::InvalidBase {
                    ty: def.name,
                    reason: reason.to_string(),
                });
            }
        }

        for iface in &def.interfaces {
            inner.check_known(iface)?;
            if !iface.is_interface() {
                return Err(RegistryError::NotAnInterface {
                    ty: def.name,
                    iface: iface.full_name().to_string(),
                });
            }
        }

        let base = match def.kind {
            TypeKind::Interface => None,
            _ => Some(def.base.unwrap_or_else(|| self.object_type.clone())),
        };
        let id = TypeId(inner.types.len() as u32);
        let ty = HostType::new(id, def.name, def.kind, base, def.interfaces);
        inner.insert(ty.clone());

        trace!(
            id = id.0,
            name = ty.full_name(),
            kind = ty.kind().as_str(),
            "registered host type"
        );
        Ok(ty)
    }

    /// Get type by ID
    pub fn get(&self, id: TypeId) -> Option<HostType> {
        self.inner.read().types.get(id.0 as usize).cloned()
    }

    /// Get type by full name
    pub fn get_by_name(&self, name: &str) -> Option<HostType> {
        let inner = self.inner.read();
        inner
            .name_to_id
            .get(name)
            .and_then(|id| inner.types.get(id.0 as usize))
            .cloned()
    }

    /// All registered types in ID order
    pub fn types(&self) -> Vec<HostType> {
        self.inner.read().types.clone()
    }

    /// Number of registered types, built-ins included
    pub fn len(&self) -> usize {
        self.inner.read().types.len()
    }

    /// Always false; the built-in types are present from construction
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The root class
    pub fn object_type(&self) -> &HostType {
        &self.object_type
    }

    /// Runtime type of reified type objects
    pub fn metatype(&self) -> &HostType {
        &self.metatype
    }

    /// Create an ordinary instance of `ty`
    pub fn instantiate(
        &self,
        ty: &HostType,
        display: Option<String>,
    ) -> Result<HostObject, RegistryError> {
        self.inner.read().check_known(ty)?;
        if !ty.kind().is_instantiable() {
            return Err(RegistryError::NotInstantiable {
                kind: ty.kind().as_str(),
                ty: ty.full_name().to_string(),
            });
        }
        Ok(HostObject::instance(ty.clone(), display))
    }

    /// Type object for `ty`; the same type always reifies to the same object
    pub fn reify(&self, ty: &HostType) -> Result<HostObject, RegistryError> {
        {
            let inner = self.inner.read();
            inner.check_known(ty)?;
            if let Some(obj) = inner.reified.get(&ty.id()) {
                return Ok(obj.clone());
            }
        }
        let mut inner = self.inner.write();
        Ok(inner
            .reified
            .entry(ty.id())
            .or_insert_with(|| HostObject::reified_type(self.metatype.clone(), ty.clone()))
            .clone())
    }

    /// Whether any registered type lives in or below `path`
    pub fn has_namespace(&self, path: &str) -> bool {
        self.inner.read().namespaces.contains(path)
    }

    /// Resolve a dotted path to a type reference or namespace reference.
    ///
    /// Returns `Undefined` when the path names neither.
    pub fn resolve_path(&self, path: &str) -> ScriptValue {
        if let Some(ty) = self.get_by_name(path) {
            return ScriptValue::Type(TypeHandle::new(ty));
        }
        if self.has_namespace(path) {
            return ScriptValue::Namespace(NamespaceRef::new(path));
        }
        ScriptValue::Undefined
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HostReflection for TypeRegistry {
    fn reify_type(&self, ty: &HostType) -> Option<HostObject> {
        self.reify(ty).ok()
    }
}
