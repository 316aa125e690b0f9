//! InteropBridge - casts between object views and type references
//!
//! | Script name    | Method                    | Needs `allow_get_type` |
//! |----------------|---------------------------|------------------------|
//! | `toString`     | `stringify`               | no                     |
//! | `unwrap`       | `widen`                   | no                     |
//! | `wrap`         | `narrow`                  | no                     |
//! | `typeOf`       | `type_of`                 | yes                    |
//! | `typeToObject` | `type_to_instance_view`   | yes                    |
//! | `objectToType` | `instance_view_to_type`   | yes                    |
//!
//! Every method is a read-then-decide-then-return over immutable inputs;
//! a failing call leaves nothing behind.

use std::sync::Arc;

use hostlink_sdk::{
    HostReflection, InteropError, InteropResult, ObjectHandle, ScriptValue, TypeHandle,
};
use tracing::{debug, warn};

use crate::options::{InteropOptions, ALLOW_GET_TYPE_OPTION};

/// Bridge between script values and host object views.
pub struct InteropBridge {
    options: InteropOptions,
    reflection: Arc<dyn HostReflection>,
}

impl InteropBridge {
    /// Create a bridge; the capability flag is fixed from here on
    pub fn new(options: InteropOptions, reflection: Arc<dyn HostReflection>) -> Self {
        Self {
            options,
            reflection,
        }
    }

    /// Whether type introspection is enabled
    pub fn allows_get_type(&self) -> bool {
        self.options.allow_get_type
    }

    /// Options the bridge was built with
    pub fn options(&self) -> &InteropOptions {
        &self.options
    }

    /// The reflection facility
    pub fn reflection(&self) -> &dyn HostReflection {
        self.reflection.as_ref()
    }

    /// Script string conversion of any value
    pub fn stringify(&self, value: &ScriptValue) -> String {
        value.to_string()
    }

    /// View the target through its full runtime type
    pub fn widen(&self, handle: &ObjectHandle) -> ObjectHandle {
        debug!(
            object = handle.target().id(),
            from = handle.declared_type().full_name(),
            to = handle.runtime_type().full_name(),
            "unwrap"
        );
        ObjectHandle::new(handle.target().clone())
    }

    /// View the target through `ty`.
    ///
    /// The check runs against the target's runtime type, not its current
    /// declared view, so a narrowed handle can be re-wrapped as any other
    /// type the object implements.
    pub fn narrow(&self, handle: &ObjectHandle, ty: &TypeHandle) -> InteropResult<ObjectHandle> {
        let target = handle.target();
        let declared = ty.underlying_type();
        match ObjectHandle::with_declared(self.reflection(), target.clone(), declared.clone()) {
            Ok(narrowed) => {
                debug!(
                    object = target.id(),
                    to = declared.full_name(),
                    "wrap"
                );
                Ok(narrowed)
            }
            Err(err) => {
                warn!(
                    object = target.id(),
                    runtime = target.runtime_type().full_name(),
                    requested = declared.full_name(),
                    "wrap rejected: object is not an instance of the requested type"
                );
                Err(err)
            }
        }
    }

    /// Runtime type of the target, ignoring the declared view
    pub fn type_of(&self, handle: &ObjectHandle) -> InteropResult<TypeHandle> {
        self.require_get_type("typeOf")?;
        let runtime = handle.runtime_type();
        debug!(object = handle.target().id(), ty = runtime.full_name(), "typeOf");
        Ok(TypeHandle::new(runtime.clone()))
    }

    /// Object view of a type, for reaching its static members.
    ///
    /// Returns `Undefined` when the wrap-object policy declines.
    pub fn type_to_instance_view(&self, ty: &TypeHandle) -> InteropResult<ScriptValue> {
        self.require_get_type("typeToObject")?;
        let underlying = ty.underlying_type();
        let value = (self.options.wrap_object_handler)(self.reflection(), underlying, None);
        debug!(
            ty = underlying.full_name(),
            wrapped = value.is_some(),
            "typeToObject"
        );
        Ok(value.unwrap_or_default())
    }

    /// Type reified by an object view; the inverse of `type_to_instance_view`
    pub fn instance_view_to_type(&self, handle: &ObjectHandle) -> InteropResult<TypeHandle> {
        self.require_get_type("objectToType")?;
        match handle.target().as_type() {
            Some(ty) => {
                debug!(object = handle.target().id(), ty = ty.full_name(), "objectToType");
                Ok(TypeHandle::new(ty.clone()))
            }
            None => Err(InteropError::wrong_shape(
                "obj",
                format!(
                    "expected an object wrapper of a type, got an instance of {}",
                    handle.runtime_type().full_name()
                ),
            )),
        }
    }

    pub(crate) fn require_get_type(&self, operation: &'static str) -> InteropResult<()> {
        if !self.options.allow_get_type {
            warn!(operation, "type introspection is disabled");
            return Err(InteropError::CapabilityDisabled {
                operation,
                option: ALLOW_GET_TYPE_OPTION,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for InteropBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteropBridge")
            .field("allow_get_type", &self.options.allow_get_type)
            .finish_non_exhaustive()
    }
}
