//! HostReflection trait - the host's type-check facility
//!
//! The engine supplies the concrete implementation (a type registry). The
//! bridge and the handle constructors only ever see this trait.

use std::sync::Arc;

use crate::object::HostObject;
use crate::types::HostType;
use crate::value::ScriptValue;

/// Abstract reflection facility.
///
/// Implementations must be safe for concurrent read access; the bridge
/// calls into them from any thread without additional locking.
pub trait HostReflection: Send + Sync {
    /// Whether a value whose runtime type is `from` can be viewed as `to`
    fn is_assignable(&self, from: &HostType, to: &HostType) -> bool {
        to.is_assignable_from(from)
    }

    /// Whether `target`'s runtime type is an instance of `ty`
    fn is_instance_of(&self, target: &HostObject, ty: &HostType) -> bool {
        self.is_assignable(target.runtime_type(), ty)
    }

    /// Surface `ty` as an object (a reified type) whose runtime type is the
    /// host metatype.
    ///
    /// Returns `None` when `ty` was not published by this facility.
    fn reify_type(&self, ty: &HostType) -> Option<HostObject>;
}

/// Wrap-object policy.
///
/// Converts a host type, optionally together with a backing instance, into
/// a script value. Returning `None` signals the type cannot be represented.
pub type WrapObjectHandler = Arc<
    dyn Fn(&dyn HostReflection, &HostType, Option<&HostObject>) -> Option<ScriptValue>
        + Send
        + Sync,
>;
