//! # Validator Options
//!
//! Switches that change what a successful validation returns. Options are
//! plain data: build them in code or deserialize them from a JSON/YAML
//! configuration block owned by the caller.

use serde::{Deserialize, Serialize};

/// Configuration handed to a validator at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Replace raw property values with the values produced by nested
    /// validation (e.g. `"42"` becomes `42` for an integer property).
    /// When false, an accepted value is returned exactly as given.
    pub coerce_values: bool,
}

impl ValidatorOptions {
    /// Options with coercion enabled.
    pub fn coercing() -> Self {
        Self {
            coerce_values: true,
        }
    }
}
