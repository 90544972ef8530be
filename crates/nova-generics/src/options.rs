use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Language-level switches for the relation engine.
///
/// Usually embedded in a larger configuration file; every field has a default so an empty
/// table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct RelationOptions {
    /// Allow boxing and unboxing in method invocation and casting contexts.
    pub allow_boxing: bool,
    /// Accept a raw supertype where a parameterization is expected, recording an `unchecked`
    /// warning instead of rejecting the conversion.
    pub allow_unchecked_conversion: bool,
    /// Recursion depth at which relations stop and assume the relation holds.
    pub max_depth: usize,
}

impl Default for RelationOptions {
    fn default() -> Self {
        Self {
            allow_boxing: true,
            allow_unchecked_conversion: true,
            max_depth: 512,
        }
    }
}

impl RelationOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        let options: RelationOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_depth == 0 {
            return Err(OptionsError::InvalidValue {
                field: "max_depth",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RelationOptions)
    }
}
