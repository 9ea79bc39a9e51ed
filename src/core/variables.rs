//! Named toolchain variables.
//!
//! A [`VariableStore`] is owned by exactly one resolution pass. List values
//! are link-ordered: nothing in here sorts or deduplicates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::util::errors::VariableError;

/// The value of a toolchain variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// The first value: the scalar itself, or the head of a list.
    pub fn first(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s.as_str()),
            Value::List(items) => items.first().map(String::as_str),
        }
    }

    /// Render the value the way a shell assignment would see it.
    pub fn render(&self) -> String {
        match self {
            Value::Scalar(s) => s.clone(),
            Value::List(items) => items.join(" "),
        }
    }
}

/// Registry of named scalar and list variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableStore {
    vars: BTreeMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        VariableStore::default()
    }

    /// Set (or replace) a variable with an already-built value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Set (or replace) a scalar variable.
    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), Value::Scalar(value.into()));
    }

    /// Set (or replace) a list variable.
    pub fn set_list<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.vars.insert(name.into(), Value::List(values));
    }

    /// Append groups of values to a list variable.
    ///
    /// One level of nesting is flattened: `[[a, b], [c]]` appends `a, b, c`
    /// after the existing entries. An unset variable starts out empty.
    pub fn append<G, I, S>(&mut self, name: &str, groups: G) -> Result<(), VariableError>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .vars
            .entry(name.to_string())
            .or_insert_with(|| Value::List(Vec::new()));

        match entry {
            Value::List(items) => {
                items.extend(groups.into_iter().flatten().map(Into::into));
                Ok(())
            }
            Value::Scalar(_) => Err(VariableError::NotAList {
                name: name.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Value, VariableError> {
        self.vars.get(name).ok_or_else(|| VariableError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn scalar(&self, name: &str) -> Result<&str, VariableError> {
        match self.get(name)? {
            Value::Scalar(s) => Ok(s.as_str()),
            Value::List(_) => Err(VariableError::NotAScalar {
                name: name.to_string(),
            }),
        }
    }

    pub fn list(&self, name: &str) -> Result<&[String], VariableError> {
        match self.get(name)? {
            Value::List(items) => Ok(items.as_slice()),
            Value::Scalar(_) => Err(VariableError::NotAList {
                name: name.to_string(),
            }),
        }
    }

    /// First value of a variable, see [`Value::first`].
    pub fn first(&self, name: &str) -> Result<Option<&str>, VariableError> {
        Ok(self.get(name)?.first())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
