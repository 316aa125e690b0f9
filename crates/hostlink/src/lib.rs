//! hostlink - script/host interop bridge
//!
//! Lets script code that holds an opaque host object reference:
//!
//! - view the object through another type it implements (`wrap`) or
//!   through its full runtime type (`unwrap`)
//! - discover the object's runtime type (`typeOf`)
//! - move between a type reference and the object view of that type
//!   (`typeToObject` / `objectToType`)
//!
//! The three introspection operations are gated by
//! [`InteropOptions::allow_get_type`], which is off by default so sandboxed
//! scripts cannot enumerate host types.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hostlink::{InteropBridge, InteropOptions, TypeDef, TypeRegistry};
//! use hostlink_sdk::{ObjectHandle, TypeHandle};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let runner = registry.register(TypeDef::interface("App.IRunner"))?;
//! let dog = registry.register(TypeDef::class("App.Dog").implements(&runner))?;
//!
//! let bridge = InteropBridge::new(InteropOptions::new().with_allow_get_type(true), registry.clone());
//! let rex = ObjectHandle::new(registry.instantiate(&dog, None)?);
//! let as_runner = bridge.narrow(&rex, &TypeHandle::new(runner))?;
//! assert_eq!(bridge.type_of(&as_runner)?.underlying_type(), &dog);
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod config;
pub mod helpers;
pub mod options;
pub mod registry;

pub use bridge::InteropBridge;
pub use config::{ConfigError, InteropConfig, DEFAULT_HELPER_NAME};
pub use helpers::{HelperFn, HelperFunctions};
pub use options::{default_wrap_object_handler, InteropOptions, ALLOW_GET_TYPE_OPTION};
pub use registry::{RegistryError, TypeDef, TypeRegistry, METATYPE_NAME, OBJECT_TYPE_NAME};

pub use hostlink_sdk as sdk;
