//! Script-facing helper functions
//!
//! Exposes the bridge to script code as a table of named functions taking
//! loosely-typed arguments. Each handler validates argument shapes before
//! calling into the bridge; a missing argument is treated as `undefined`
//! and extra arguments are ignored. The introspection functions check the
//! capability ahead of their argument shapes.

use std::sync::Arc;

use hostlink_sdk::{InteropError, InteropResult, ObjectHandle, ScriptValue, TypeHandle};
use rustc_hash::FxHashMap;

use crate::bridge::InteropBridge;
use crate::config::{InteropConfig, DEFAULT_HELPER_NAME};

/// A helper function handler
pub type HelperFn =
    Arc<dyn Fn(&InteropBridge, &[ScriptValue]) -> InteropResult<ScriptValue> + Send + Sync>;

fn arg(args: &[ScriptValue], index: usize) -> &ScriptValue {
    const UNDEFINED: &ScriptValue = &ScriptValue::Undefined;
    args.get(index).unwrap_or(UNDEFINED)
}

fn object_arg<'a>(
    args: &'a [ScriptValue],
    index: usize,
    param: &str,
) -> InteropResult<&'a ObjectHandle> {
    let value = arg(args, index);
    value.as_object().ok_or_else(|| {
        InteropError::wrong_shape(
            param,
            format!("expected an object wrapper, got {}", value.type_name()),
        )
    })
}

fn type_arg<'a>(args: &'a [ScriptValue], index: usize, param: &str) -> InteropResult<&'a TypeHandle> {
    let value = arg(args, index);
    value.as_type().ok_or_else(|| {
        InteropError::wrong_shape(
            param,
            format!("expected a type reference, got {}", value.type_name()),
        )
    })
}

/// Named helper functions bound to one bridge.
pub struct HelperFunctions {
    name: String,
    bridge: Arc<InteropBridge>,
    handlers: FxHashMap<String, HelperFn>,
}

impl HelperFunctions {
    /// Helper table with the six standard functions
    pub fn new(bridge: Arc<InteropBridge>) -> Self {
        let mut helpers = Self {
            name: DEFAULT_HELPER_NAME.to_string(),
            bridge,
            handlers: FxHashMap::default(),
        };

        helpers.register("toString", |bridge, args| {
            Ok(ScriptValue::from(bridge.stringify(arg(args, 0))))
        });
        helpers.register("unwrap", |bridge, args| {
            let obj = object_arg(args, 0, "obj")?;
            Ok(ScriptValue::Object(bridge.widen(obj)))
        });
        helpers.register("wrap", |bridge, args| {
            let obj = object_arg(args, 0, "obj")?;
            let ty = type_arg(args, 1, "type")?;
            bridge.narrow(obj, ty).map(ScriptValue::Object)
        });
        helpers.register("typeOf", |bridge, args| {
            bridge.require_get_type("typeOf")?;
            let obj = object_arg(args, 0, "obj")?;
            bridge.type_of(obj).map(ScriptValue::Type)
        });
        helpers.register("typeToObject", |bridge, args| {
            bridge.require_get_type("typeToObject")?;
            let ty = type_arg(args, 0, "type")?;
            bridge.type_to_instance_view(ty)
        });
        helpers.register("objectToType", |bridge, args| {
            bridge.require_get_type("objectToType")?;
            let obj = object_arg(args, 0, "obj")?;
            bridge.instance_view_to_type(obj).map(ScriptValue::Type)
        });

        helpers
    }

    /// Build from configuration; `None` when the helper is not exposed
    pub fn from_config(bridge: Arc<InteropBridge>, config: &InteropConfig) -> Option<Self> {
        if !config.expose_helper {
            return None;
        }
        Some(Self::new(bridge).with_name(config.helper_name.clone()))
    }

    /// Set the global name the helper object is exposed under
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Register (or replace) a helper function
    pub fn register(
        &mut self,
        name: &str,
        handler: impl Fn(&InteropBridge, &[ScriptValue]) -> InteropResult<ScriptValue>
            + Send
            + Sync
            + 'static,
    ) {
        self.handlers.insert(name.to_string(), Arc::new(handler));
    }

    /// Call a helper function by name
    pub fn call(&self, name: &str, args: &[ScriptValue]) -> InteropResult<ScriptValue> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| InteropError::UnknownFunction(name.to_string()))?;
        handler(self.bridge.as_ref(), args)
    }

    /// Global name of the helper object
    pub fn helper_name(&self) -> &str {
        &self.name
    }

    /// The bound bridge
    pub fn bridge(&self) -> &InteropBridge {
        &self.bridge
    }

    /// Registered function names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no functions are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
