//! Opaque host object references
//!
//! A [`HostObject`] stands for one object living on the host side. Clones
//! share identity; two objects compare equal only when they are the same
//! allocation. A host object is either an ordinary instance or a reified
//! type (a host type surfaced as an object, whose runtime type is the
//! metatype).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::HostType;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

enum ObjectRepr {
    Instance { display: Option<String> },
    Type(HostType),
}

struct ObjectCell {
    id: u64,
    runtime_type: HostType,
    repr: ObjectRepr,
}

/// Reference-counted handle to a host object.
#[derive(Clone)]
pub struct HostObject(Arc<ObjectCell>);

impl HostObject {
    /// Create an ordinary instance.
    ///
    /// `display` is the host's own string conversion for the object; when
    /// absent the object renders as its runtime type name.
    pub fn instance(runtime_type: HostType, display: Option<String>) -> Self {
        Self::alloc(runtime_type, ObjectRepr::Instance { display })
    }

    /// Create a reified type object whose target is `ty`
    pub fn reified_type(metatype: HostType, ty: HostType) -> Self {
        Self::alloc(metatype, ObjectRepr::Type(ty))
    }

    fn alloc(runtime_type: HostType, repr: ObjectRepr) -> Self {
        HostObject(Arc::new(ObjectCell {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            runtime_type,
            repr,
        }))
    }

    /// Process-unique object ID
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Actual runtime type of the object
    pub fn runtime_type(&self) -> &HostType {
        &self.0.runtime_type
    }

    /// The host type this object reifies, if it is a type object
    pub fn as_type(&self) -> Option<&HostType> {
        match &self.0.repr {
            ObjectRepr::Type(ty) => Some(ty),
            ObjectRepr::Instance { .. } => None,
        }
    }

    /// Check if this object is a reified type
    pub fn is_type(&self) -> bool {
        self.as_type().is_some()
    }

    /// Reference identity comparison
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for HostObject {}

impl fmt::Display for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.repr {
            ObjectRepr::Instance { display: Some(text) } => f.write_str(text),
            ObjectRepr::Instance { display: None } => f.write_str(self.0.runtime_type.full_name()),
            ObjectRepr::Type(ty) => f.write_str(ty.full_name()),
        }
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.repr {
            ObjectRepr::Instance { .. } => f
                .debug_struct("HostObject")
                .field("id", &self.0.id)
                .field("type", &self.0.runtime_type.full_name())
                .finish(),
            ObjectRepr::Type(ty) => f
                .debug_struct("HostObject")
                .field("id", &self.0.id)
                .field("reifies", &ty.full_name())
                .finish(),
        }
    }
}
