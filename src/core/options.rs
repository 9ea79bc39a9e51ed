//! Toolchain build options.

use serde::{Deserialize, Serialize};

use crate::util::errors::ConfigurationError;

/// The recognized toolchain options.
///
/// This is a closed record: unknown keys are rejected both when parsing a
/// config file and when building from `KEY=VALUE` pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSet {
    /// Build against MPI (compiler wrappers, cluster libraries)
    #[serde(rename = "usempi", alias = "parallel")]
    pub parallel: bool,

    /// Position-independent code
    #[serde(rename = "pic")]
    pub position_independent: bool,

    /// Prefer static linking
    #[serde(rename = "static")]
    pub static_linking: bool,
}

impl OptionSet {
    /// Set a single option by key.
    pub fn set(&mut self, key: &str, value: bool) -> Result<(), ConfigurationError> {
        *self.field_mut(key)? = value;
        Ok(())
    }

    fn field_mut(&mut self, key: &str) -> Result<&mut bool, ConfigurationError> {
        match key {
            "usempi" | "parallel" => Ok(&mut self.parallel),
            "pic" => Ok(&mut self.position_independent),
            "static" => Ok(&mut self.static_linking),
            _ => Err(ConfigurationError::UnknownOption {
                key: key.to_string(),
            }),
        }
    }

    /// Build an option set from textual `(key, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = OptionSet::default();
        options.apply_pairs(pairs)?;
        Ok(options)
    }

    /// Apply textual `(key, value)` pairs on top of the current values.
    pub fn apply_pairs<I, K, V>(&mut self, pairs: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let key = key.as_ref();
            let field = self.field_mut(key)?;
            *field = parse_bool(value.as_ref()).ok_or_else(|| {
                ConfigurationError::InvalidOptionValue {
                    key: key.to_string(),
                    value: value.as_ref().to_string(),
                }
            })?;
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
