//! ScriptValue - script-side view of values crossing the bridge
//!
//! Only the shapes the interop layer produces or consumes are modelled in
//! detail; primitive values are carried as-is. `Display` is the script
//! string-conversion rule.

use std::fmt;
use std::sync::Arc;

use crate::handle::{ObjectHandle, TypeHandle};

/// Reference to a dotted host namespace such as `System.Collections`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceRef {
    path: Arc<str>,
}

impl NamespaceRef {
    /// Create a namespace reference from a dotted path
    pub fn new(path: &str) -> Self {
        Self { path: Arc::from(path) }
    }

    /// Full dotted path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment
    pub fn name(&self) -> &str {
        self.path().rsplit('.').next().unwrap_or(self.path())
    }

    /// Nested namespace or member path
    pub fn child(&self, name: &str) -> NamespaceRef {
        if self.path.is_empty() {
            NamespaceRef::new(name)
        } else {
            NamespaceRef::new(&format!("{}.{}", self.path, name))
        }
    }

    /// Enclosing namespace, `None` at the top level
    pub fn parent(&self) -> Option<NamespaceRef> {
        self.path
            .rfind('.')
            .map(|dot| NamespaceRef::new(&self.path()[..dot]))
    }
}

impl fmt::Display for NamespaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// A script value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    /// The `undefined` sentinel
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(Arc<str>),
    /// Host object viewed through a declared type
    Object(ObjectHandle),
    /// Host type reference
    Type(TypeHandle),
    /// Host namespace reference
    Namespace(NamespaceRef),
}

impl ScriptValue {
    /// Check for the `undefined` sentinel
    pub fn is_undefined(&self) -> bool {
        matches!(self, ScriptValue::Undefined)
    }

    /// Get as object handle if this wraps a host object
    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            ScriptValue::Object(handle) => Some(handle),
            _ => None,
        }
    }

    /// Get as type handle if this is a type reference
    pub fn as_type(&self) -> Option<&TypeHandle> {
        match self {
            ScriptValue::Type(handle) => Some(handle),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Name of the value's shape, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Undefined => "undefined",
            ScriptValue::Null => "null",
            ScriptValue::Bool(_) => "boolean",
            ScriptValue::Number(_) => "number",
            ScriptValue::String(_) => "string",
            ScriptValue::Object(_) => "object wrapper",
            ScriptValue::Type(_) => "type reference",
            ScriptValue::Namespace(_) => "namespace reference",
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 prints as 0
        f.write_str("0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{}", n)
    } else {
        // exponent form, with an explicit sign on positive exponents
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => f.write_str(&exp),
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => f.write_str("undefined"),
            ScriptValue::Null => f.write_str("null"),
            ScriptValue::Bool(b) => write!(f, "{}", b),
            ScriptValue::Number(n) => fmt_number(*n, f),
            ScriptValue::String(s) => f.write_str(s),
            ScriptValue::Object(handle) => write!(f, "{}", handle.target()),
            ScriptValue::Type(handle) => write!(f, "{}", handle),
            ScriptValue::Namespace(ns) => write!(f, "{}", ns),
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Bool(b)
    }
}

impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        ScriptValue::Number(n)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(Arc::from(s))
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(Arc::from(s))
    }
}

impl From<ObjectHandle> for ScriptValue {
    fn from(handle: ObjectHandle) -> Self {
        ScriptValue::Object(handle)
    }
}

impl From<TypeHandle> for ScriptValue {
    fn from(handle: TypeHandle) -> Self {
        ScriptValue::Type(handle)
    }
}

impl From<NamespaceRef> for ScriptValue {
    fn from(ns: NamespaceRef) -> Self {
        ScriptValue::Namespace(ns)
    }
}
