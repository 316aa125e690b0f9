//! Object and type handles as seen by script code
//!
//! An [`ObjectHandle`] pairs a host object with the type it is currently
//! viewed through. The pair is immutable: changing the view always yields a
//! new handle, and every constructor upholds the invariant that the target's
//! runtime type is an instance of the declared type.

use std::fmt;

use crate::context::HostReflection;
use crate::error::{InteropError, InteropResult};
use crate::object::HostObject;
use crate::types::HostType;

/// Host object viewed through a declared type.
#[derive(Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    target: HostObject,
    declared_type: HostType,
}

impl ObjectHandle {
    /// Handle exposing the target's full runtime type
    pub fn new(target: HostObject) -> Self {
        let declared_type = target.runtime_type().clone();
        Self {
            target,
            declared_type,
        }
    }

    /// Handle exposing `declared` as the view type.
    ///
    /// Fails with [`InteropError::TypeMismatch`] unless the target's runtime
    /// type is an instance of `declared`.
    pub fn with_declared(
        reflection: &dyn HostReflection,
        target: HostObject,
        declared: HostType,
    ) -> InteropResult<Self> {
        if !reflection.is_instance_of(&target, &declared) {
            return Err(InteropError::type_mismatch(
                declared.full_name(),
                target.runtime_type().full_name(),
            ));
        }
        Ok(Self {
            target,
            declared_type: declared,
        })
    }

    /// Underlying host object
    pub fn target(&self) -> &HostObject {
        &self.target
    }

    /// Type the handle currently exposes to script
    pub fn declared_type(&self) -> &HostType {
        &self.declared_type
    }

    /// Actual runtime type of the target
    pub fn runtime_type(&self) -> &HostType {
        self.target.runtime_type()
    }

    /// Whether the declared view differs from the runtime type
    pub fn is_narrowed(&self) -> bool {
        self.declared_type != *self.target.runtime_type()
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("target", &self.target)
            .field("declared", &self.declared_type.full_name())
            .finish()
    }
}

/// Script-visible reference to a host type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    underlying: HostType,
}

impl TypeHandle {
    /// Wrap a host type
    pub fn new(underlying: HostType) -> Self {
        Self { underlying }
    }

    /// The host type this handle denotes
    pub fn underlying_type(&self) -> &HostType {
        &self.underlying
    }

    /// Consume the handle, returning the host type
    pub fn into_type(self) -> HostType {
        self.underlying
    }
}

impl From<HostType> for TypeHandle {
    fn from(ty: HostType) -> Self {
        Self::new(ty)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[host type: {}]", self.underlying.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeId, TypeKind};

    struct Structural {
        meta: HostType,
    }

    impl HostReflection for Structural {
        fn reify_type(&self, ty: &HostType) -> Option<HostObject> {
            Some(HostObject::reified_type(self.meta.clone(), ty.clone()))
        }
    }

    fn fixture() -> (Structural, HostType, HostType, HostType) {
        let meta = HostType::new(TypeId(0), "System.Type", TypeKind::Metatype, None, vec![]);
        let runner = HostType::new(TypeId(1), "App.IRunner", TypeKind::Interface, None, vec![]);
        let dog = HostType::new(
            TypeId(2),
            "App.Dog",
            TypeKind::Class,
            None,
            vec![runner.clone()],
        );
        let cat = HostType::new(TypeId(3), "App.Cat", TypeKind::Class, None, vec![]);
        (Structural { meta }, runner, dog, cat)
    }

    #[test]
    fn test_new_declares_runtime_type() {
        let (_, _, dog, _) = fixture();
        let handle = ObjectHandle::new(HostObject::instance(dog.clone(), None));
        assert_eq!(handle.declared_type(), &dog);
        assert!(!handle.is_narrowed());
    }

    #[test]
    fn test_with_declared_checks_instance_of() {
        let (reflection, runner, dog, cat) = fixture();
        let rex = HostObject::instance(dog, None);

        let viewed = ObjectHandle::with_declared(&reflection, rex.clone(), runner.clone()).unwrap();
        assert_eq!(viewed.declared_type(), &runner);
        assert!(viewed.is_narrowed());
        assert!(viewed.target().ptr_eq(&rex));

        let err = ObjectHandle::with_declared(&reflection, rex, cat).unwrap_err();
        assert_eq!(err, InteropError::type_mismatch("App.Cat", "App.Dog"));
    }

    #[test]
    fn test_type_handle_display_and_equality() {
        let (_, _, dog, _) = fixture();
        let a = TypeHandle::new(dog.clone());
        let b = TypeHandle::from(dog);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[host type: App.Dog]");
    }
}
