//! hostlink SDK - contracts shared by the interop bridge and its host
//!
//! This crate holds the value shapes that cross the script/host boundary
//! and the collaborator traits the bridge programs against, without
//! depending on any concrete reflection facility.
//!
//! - [`HostType`] / [`HostObject`]: host-side type descriptors and objects
//! - [`ObjectHandle`] / [`TypeHandle`]: what script code holds
//! - [`ScriptValue`]: script values, with `Display` as string conversion
//! - [`HostReflection`] / [`WrapObjectHandler`]: collaborator contracts
//! - [`InteropError`]: the three fault kinds the bridge raises

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod handle;
pub mod object;
pub mod types;
pub mod value;

pub use context::{HostReflection, WrapObjectHandler};
pub use error::{ErrorKind, InteropError, InteropResult};
pub use handle::{ObjectHandle, TypeHandle};
pub use object::HostObject;
pub use types::{HostType, TypeId, TypeKind};
pub use value::{NamespaceRef, ScriptValue};
