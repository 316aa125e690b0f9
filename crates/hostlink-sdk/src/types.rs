//! Host type descriptors
//!
//! A [`HostType`] is a cheap, reference-counted handle to the metadata of a
//! single host runtime type. Descriptors are built by the host's reflection
//! facility and never change once published. Equality and hashing go by
//! descriptor identity: two handles are equal only when they share the
//! same published descriptor, so a look-alike built elsewhere with the
//! same [`TypeId`] and name never compares equal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable identifier of a host type within one reflection facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of host type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Reference type with single inheritance
    Class,
    /// Interface; never the runtime type of an object
    Interface,
    /// Value type
    Struct,
    /// Enumeration
    Enum,
    /// The type of reified type objects
    Metatype,
}

impl TypeKind {
    /// Whether objects can have this kind as their runtime type
    pub fn is_instantiable(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Struct | TypeKind::Enum)
    }

    /// Lower-case name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Metatype => "metatype",
        }
    }
}

struct TypeDescriptor {
    id: TypeId,
    full_name: String,
    /// Byte offset of the simple name inside `full_name`
    name_start: usize,
    kind: TypeKind,
    base: Option<HostType>,
    interfaces: Vec<HostType>,
}

/// Shared handle to a host type descriptor.
#[derive(Clone)]
pub struct HostType(Arc<TypeDescriptor>);

impl HostType {
    /// Create a descriptor.
    ///
    /// `full_name` is the dotted `Namespace.Name` form. `base` and
    /// `interfaces` must already be published descriptors, which rules out
    /// cycles in the hierarchy.
    pub fn new(
        id: TypeId,
        full_name: impl Into<String>,
        kind: TypeKind,
        base: Option<HostType>,
        interfaces: Vec<HostType>,
    ) -> Self {
        let full_name = full_name.into();
        let name_start = full_name.rfind('.').map(|dot| dot + 1).unwrap_or(0);
        HostType(Arc::new(TypeDescriptor {
            id,
            full_name,
            name_start,
            kind,
            base,
            interfaces,
        }))
    }

    /// Type ID
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    /// Dotted name including the namespace
    pub fn full_name(&self) -> &str {
        &self.0.full_name
    }

    /// Simple name without the namespace
    pub fn name(&self) -> &str {
        &self.0.full_name[self.0.name_start..]
    }

    /// Namespace part of the name (empty for the global namespace)
    pub fn namespace(&self) -> &str {
        if self.0.name_start == 0 {
            ""
        } else {
            &self.0.full_name[..self.0.name_start - 1]
        }
    }

    /// Type kind
    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    /// Direct base type
    pub fn base(&self) -> Option<&HostType> {
        self.0.base.as_ref()
    }

    /// Directly implemented (or extended) interfaces
    pub fn interfaces(&self) -> &[HostType] {
        &self.0.interfaces
    }

    /// Whether this is an interface type
    pub fn is_interface(&self) -> bool {
        self.0.kind == TypeKind::Interface
    }

    /// Whether a value of type `other` can be viewed as this type.
    ///
    /// Walks the base chain and the interface lists of `other`, transitively.
    pub fn is_assignable_from(&self, other: &HostType) -> bool {
        if self == other {
            return true;
        }
        if let Some(base) = other.base() {
            if self.is_assignable_from(base) {
                return true;
            }
        }
        other
            .interfaces()
            .iter()
            .any(|iface| self.is_assignable_from(iface))
    }

    /// Inheritance chain from this type up to the root, this type first
    pub fn hierarchy(&self) -> Vec<HostType> {
        let mut chain = vec![self.clone()];
        let mut current = self.base();
        while let Some(ty) = current {
            chain.push(ty.clone());
            current = ty.base();
        }
        chain
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostType({}{})", self.0.full_name, self.0.id)
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> HostType {
        HostType::new(TypeId(0), "System.Object", TypeKind::Class, None, vec![])
    }

    #[test]
    fn test_name_parts() {
        let ty = HostType::new(TypeId(7), "App.Model.Dog", TypeKind::Class, None, vec![]);
        assert_eq!(ty.full_name(), "App.Model.Dog");
        assert_eq!(ty.name(), "Dog");
        assert_eq!(ty.namespace(), "App.Model");

        let global = HostType::new(TypeId(8), "Widget", TypeKind::Struct, None, vec![]);
        assert_eq!(global.name(), "Widget");
        assert_eq!(global.namespace(), "");
    }

    #[test]
    fn test_assignability_through_base_and_interfaces() {
        let object = object();
        let named = HostType::new(TypeId(1), "App.INamed", TypeKind::Interface, None, vec![]);
        let pet = HostType::new(
            TypeId(2),
            "App.IPet",
            TypeKind::Interface,
            None,
            vec![named.clone()],
        );
        let animal = HostType::new(
            TypeId(3),
            "App.Animal",
            TypeKind::Class,
            Some(object.clone()),
            vec![],
        );
        let dog = HostType::new(
            TypeId(4),
            "App.Dog",
            TypeKind::Class,
            Some(animal.clone()),
            vec![pet.clone()],
        );

        assert!(dog.is_assignable_from(&dog));
        assert!(animal.is_assignable_from(&dog));
        assert!(object.is_assignable_from(&dog));
        assert!(pet.is_assignable_from(&dog));
        assert!(named.is_assignable_from(&dog));
        assert!(!dog.is_assignable_from(&animal));
        assert!(!pet.is_assignable_from(&animal));
    }

    #[test]
    fn test_equality_is_by_descriptor() {
        let a = HostType::new(TypeId(3), "App.A", TypeKind::Class, None, vec![]);
        let lookalike = HostType::new(TypeId(3), "App.A", TypeKind::Class, None, vec![]);
        assert_eq!(a, a.clone());
        assert_ne!(a, lookalike);

        let mut set = std::collections::HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&a));
        assert!(!set.contains(&lookalike));
    }

    #[test]
    fn test_same_id_from_another_hierarchy_is_not_assignable() {
        let runner = HostType::new(TypeId(2), "App.IRunner", TypeKind::Interface, None, vec![]);
        let dog = HostType::new(TypeId(3), "App.Dog", TypeKind::Class, None, vec![runner]);
        let foreign = HostType::new(TypeId(2), "Lib.ICat", TypeKind::Interface, None, vec![]);
        assert!(!foreign.is_assignable_from(&dog));
    }

    #[test]
    fn test_hierarchy() {
        let object = object();
        let animal = HostType::new(
            TypeId(1),
            "App.Animal",
            TypeKind::Class,
            Some(object.clone()),
            vec![],
        );
        let dog = HostType::new(TypeId(2), "App.Dog", TypeKind::Class, Some(animal.clone()), vec![]);
        assert_eq!(dog.hierarchy(), vec![dog.clone(), animal, object]);
    }

    #[test]
    fn test_kind_instantiable() {
        assert!(TypeKind::Class.is_instantiable());
        assert!(TypeKind::Struct.is_instantiable());
        assert!(!TypeKind::Interface.is_instantiable());
        assert!(!TypeKind::Metatype.is_instantiable());
    }
}
