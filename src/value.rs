//! Value Coercion Module
//!
//! Converts raw text input into the cache's single configured value type.
//! Supported targets are a closed set of primitive kinds plus caller-registered
//! custom types resolved through an explicit registry at configuration time.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CacheError, Result};

// == Custom Value Trait ==
/// A caller-defined value stored in the cache.
///
/// Custom values are produced by a registered parse function and handed back
/// to callers behind an `Arc`. `as_any` allows downcasting to the concrete
/// type on retrieval.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Returns self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Parse function for a registered custom type.
///
/// Returns `None` when the raw text cannot be parsed; the cache surfaces
/// that as [`CacheError::ValueConversionFailed`].
pub type CustomParser = Arc<dyn Fn(&str) -> Option<Arc<dyn CustomValue>> + Send + Sync>;

// == Cache Value ==
/// A value held by the cache, tagged with its kind.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// UTF-8 text
    Text(String),
    /// Signed 64-bit integer
    Integer(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// Caller-defined type produced by a registered parser
    Custom(Arc<dyn CustomValue>),
}

impl CacheValue {
    /// Returns the text payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CacheValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Integer` value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CacheValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a `Float` value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CacheValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a `Boolean` value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            CacheValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the custom payload, if this is a `Custom` value.
    pub fn as_custom(&self) -> Option<&Arc<dyn CustomValue>> {
        match self {
            CacheValue::Custom(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for CacheValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CacheValue::Text(a), CacheValue::Text(b)) => a == b,
            (CacheValue::Integer(a), CacheValue::Integer(b)) => a == b,
            (CacheValue::Float(a), CacheValue::Float(b)) => a == b,
            (CacheValue::Boolean(a), CacheValue::Boolean(b)) => a == b,
            // Custom values have no general equality; compare identity
            (CacheValue::Custom(a), CacheValue::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// == Type Registry ==
/// Registry of caller-supplied custom value types.
///
/// Supplied once at construction and consulted only to resolve a `value_type`
/// given as a string name. There is no global fallback: a name that is neither
/// a built-in nor registered here is rejected.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    parsers: HashMap<String, CustomParser>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parse function under a type name.
    ///
    /// Re-registering a name replaces the previous parser.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parser: impl Fn(&str) -> Option<Arc<dyn CustomValue>> + Send + Sync + 'static,
    ) {
        self.parsers.insert(name.into(), Arc::new(parser));
    }

    /// Returns the parser registered under `name`, if any.
    fn get(&self, name: &str) -> Option<&CustomParser> {
        self.parsers.get(name)
    }

    /// Checks whether a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// == Value Coercer ==
/// The coercion policy of a cache instance: exactly one target value type,
/// fixed for the instance's whole lifetime.
#[derive(Clone)]
pub enum ValueCoercer {
    /// Store raw text as-is
    Text,
    /// Parse as `i64`
    Integer,
    /// Parse as `f64`
    Float,
    /// Parse as `bool`
    Boolean,
    /// Parse through a registered custom parser
    Custom {
        /// Registered type name, reported in conversion errors
        name: String,
        /// Parser resolved from the registry at configuration time
        parse: CustomParser,
    },
}

impl ValueCoercer {
    /// Resolves a type name against the built-ins and the supplied registry.
    ///
    /// Fails with [`CacheError::UnknownValueType`] when the name matches
    /// neither, so misconfiguration surfaces before any entry exists.
    pub fn resolve(name: &str, registry: &TypeRegistry) -> Result<Self> {
        match name {
            "text" | "string" | "str" => Ok(ValueCoercer::Text),
            "integer" | "int" => Ok(ValueCoercer::Integer),
            "float" => Ok(ValueCoercer::Float),
            "bool" | "boolean" => Ok(ValueCoercer::Boolean),
            other => match registry.get(other) {
                Some(parser) => Ok(ValueCoercer::Custom {
                    name: other.to_string(),
                    parse: Arc::clone(parser),
                }),
                None => Err(CacheError::UnknownValueType(other.to_string())),
            },
        }
    }

    /// Returns the name of the target type, as used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            ValueCoercer::Text => "text",
            ValueCoercer::Integer => "integer",
            ValueCoercer::Float => "float",
            ValueCoercer::Boolean => "boolean",
            ValueCoercer::Custom { name, .. } => name,
        }
    }

    /// Converts raw text into a value of the target type.
    pub fn coerce(&self, raw: &str) -> Result<CacheValue> {
        match self {
            ValueCoercer::Text => Ok(CacheValue::Text(raw.to_string())),
            ValueCoercer::Integer => raw
                .parse::<i64>()
                .map(CacheValue::Integer)
                .map_err(|_| self.conversion_error()),
            ValueCoercer::Float => raw
                .parse::<f64>()
                .map(CacheValue::Float)
                .map_err(|_| self.conversion_error()),
            ValueCoercer::Boolean => raw
                .parse::<bool>()
                .map(CacheValue::Boolean)
                .map_err(|_| self.conversion_error()),
            ValueCoercer::Custom { parse, .. } => match parse(raw) {
                Some(value) => Ok(CacheValue::Custom(value)),
                None => Err(self.conversion_error()),
            },
        }
    }

    fn conversion_error(&self) -> CacheError {
        CacheError::ValueConversionFailed {
            expected_type: self.type_name().to_string(),
        }
    }
}

impl Default for ValueCoercer {
    fn default() -> Self {
        ValueCoercer::Text
    }
}

// Custom parsers are opaque; Debug prints only the target type name.
impl fmt::Debug for ValueCoercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueCoercer").field(&self.type_name()).finish()
    }
}
