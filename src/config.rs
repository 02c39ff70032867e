//! Configuration Module
//!
//! Raw configuration mapping for the cache and its validation into frozen
//! settings. Numeric validation is total: negative values are corrected to
//! the defaults with an observable warning instead of failing construction.
//! Only an unresolvable value type name is a hard error.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::value::{TypeRegistry, ValueCoercer};

// == Defaults ==
/// Default entry time-to-live in seconds
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Default maximum number of entries
pub const DEFAULT_MAX_SIZE: usize = 100;

// == Cache Config ==
/// Raw configuration input, as supplied by the caller.
///
/// All keys are optional; absent keys keep the defaults
/// (`ttl = 60s`, `max_size = 100`, `value_type = text`). Numeric fields are
/// signed so that out-of-range input can be observed and corrected rather
/// than rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    pub ttl: Option<i64>,
    /// Maximum number of entries
    pub max_size: Option<i64>,
    /// Target value type: a built-in name or a name from the type registry
    pub value_type: Option<String>,
}

// == Config Warning ==
/// Non-fatal signal emitted when an invalid configuration value was
/// corrected to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `ttl` was negative and replaced by the default
    NegativeTtl {
        /// Value supplied by the caller
        requested: i64,
        /// Seconds actually applied
        applied: u64,
    },
    /// `max_size` was negative and replaced by the default
    NegativeMaxSize {
        /// Value supplied by the caller
        requested: i64,
        /// Capacity actually applied
        applied: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::NegativeTtl { requested, applied } => write!(
                f,
                "TTL cannot be negative ({requested}); using default {applied}s"
            ),
            ConfigWarning::NegativeMaxSize { requested, applied } => write!(
                f,
                "Max size cannot be negative ({requested}); using default {applied}"
            ),
        }
    }
}

// == Settings ==
/// Validated, frozen cache settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Maximum number of entries
    pub max_size: usize,
    /// Entry time-to-live
    pub ttl: Duration,
    /// Coercion policy for stored values
    pub coercer: ValueCoercer,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            coercer: ValueCoercer::default(),
        }
    }
}

impl CacheConfig {
    /// Validates the raw mapping into frozen [`Settings`].
    ///
    /// Negative `ttl`/`max_size` are corrected to the defaults and reported
    /// through the returned warnings (also logged at `warn` level); this
    /// never aborts construction. An unknown `value_type` name is the only
    /// hard error.
    pub fn validate(&self, registry: &TypeRegistry) -> Result<(Settings, Vec<ConfigWarning>)> {
        let mut warnings = Vec::new();

        let ttl_secs = match self.ttl {
            Some(secs) if secs < 0 => {
                let warning = ConfigWarning::NegativeTtl {
                    requested: secs,
                    applied: DEFAULT_TTL_SECS,
                };
                warn!(requested = secs, applied = DEFAULT_TTL_SECS, "{warning}");
                warnings.push(warning);
                DEFAULT_TTL_SECS
            }
            Some(secs) => secs as u64,
            None => DEFAULT_TTL_SECS,
        };

        let max_size = match self.max_size {
            Some(size) if size < 0 => {
                let warning = ConfigWarning::NegativeMaxSize {
                    requested: size,
                    applied: DEFAULT_MAX_SIZE,
                };
                warn!(requested = size, applied = DEFAULT_MAX_SIZE, "{warning}");
                warnings.push(warning);
                DEFAULT_MAX_SIZE
            }
            Some(size) => size as usize,
            None => DEFAULT_MAX_SIZE,
        };

        // Type resolution fails fast, before any entry exists
        let coercer = match &self.value_type {
            Some(name) => ValueCoercer::resolve(name, registry)?,
            None => ValueCoercer::default(),
        };

        Ok((
            Settings {
                max_size,
                ttl: Duration::from_secs(ttl_secs),
                coercer,
            },
            warnings,
        ))
    }
}
