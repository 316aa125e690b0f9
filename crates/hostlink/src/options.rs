//! Interop options
//!
//! Runtime settings the bridge is constructed with. The capability flag is
//! read once at construction and never changes for the bridge's lifetime.

use std::fmt;
use std::sync::Arc;

use hostlink_sdk::{HostObject, HostReflection, HostType, ObjectHandle, ScriptValue, WrapObjectHandler};

/// Name of the capability option, as reported in errors and config files
pub const ALLOW_GET_TYPE_OPTION: &str = "allow_get_type";

/// The stock wrap-object policy.
///
/// Without an instance, produces a handle to the reified type so its
/// static members can be reached through the usual object path, or
/// declines when the reflection facility does not know the type. With an
/// instance, produces a handle viewed as the requested type, or declines
/// when the instance is not an instance of it.
pub fn default_wrap_object_handler() -> WrapObjectHandler {
    Arc::new(
        |reflection: &dyn HostReflection, ty: &HostType, instance: Option<&HostObject>| {
            match instance {
                None => reflection
                    .reify_type(ty)
                    .map(|obj| ScriptValue::Object(ObjectHandle::new(obj))),
                Some(obj) => ObjectHandle::with_declared(reflection, obj.clone(), ty.clone())
                    .ok()
                    .map(ScriptValue::Object),
            }
        },
    )
}

/// Options controlling the interop bridge.
#[derive(Clone)]
pub struct InteropOptions {
    /// Allow script code to discover runtime types (`typeOf`,
    /// `typeToObject`, `objectToType`). Off by default.
    pub allow_get_type: bool,
    /// Policy used to represent a host type as a script object
    pub wrap_object_handler: WrapObjectHandler,
}

impl InteropOptions {
    /// Options with all defaults
    pub fn new() -> Self {
        Self {
            allow_get_type: false,
            wrap_object_handler: default_wrap_object_handler(),
        }
    }

    /// Set the type introspection capability
    pub fn with_allow_get_type(mut self, allow: bool) -> Self {
        self.allow_get_type = allow;
        self
    }

    /// Replace the wrap-object policy
    pub fn with_wrap_object_handler(mut self, handler: WrapObjectHandler) -> Self {
        self.wrap_object_handler = handler;
        self
    }
}

impl Default for InteropOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InteropOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteropOptions")
            .field("allow_get_type", &self.allow_get_type)
            .finish_non_exhaustive()
    }
}
