//! Positional and keyword call inputs
//!
//! Memoized computations can take any `Serialize` input. [`CallArgs`] is the
//! explicit form for computations whose signature mixes positional and
//! keyword inputs: keyword inputs live in a sorted map, so two calls that
//! supply the same keywords in a different order encode identically.

use crate::codec::to_checked_value;
use crate::error::Result;
use serde::ser::{self, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Inputs of one call
///
/// The builder methods [`arg`](Self::arg) and [`kwarg`](Self::kwarg) never
/// fail. An input that has no JSON form (a `NaN`, an infinity, a map with
/// non-string keys) is remembered instead, and serializing the inputs
/// fails, so no cache key can be derived for them.
///
/// # Example
///
/// ```
/// use memo_domain::CallArgs;
///
/// let a = CallArgs::new().arg(4).kwarg("scale", 2).kwarg("offset", 1);
/// let b = CallArgs::new().arg(4).kwarg("offset", 1).kwarg("scale", 2);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CallArgs {
    /// Ordered positional inputs
    pub positional: Vec<Value>,
    /// Keyword inputs, sorted by name
    pub keyword: BTreeMap<String, Value>,
    #[serde(skip)]
    rejected: Option<String>,
}

impl CallArgs {
    /// Create empty call inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional input
    pub fn arg<T: Serialize>(mut self, value: T) -> Self {
        match to_checked_value(&value) {
            Ok(value) => self.positional.push(value),
            Err(e) => self.reject(format!("positional input {}: {e}", self.positional.len())),
        }
        self
    }

    /// Set a keyword input, replacing an earlier value for the same name
    pub fn kwarg<K: Into<String>, T: Serialize>(mut self, name: K, value: T) -> Self {
        let name = name.into();
        match to_checked_value(&value) {
            Ok(value) => {
                self.keyword.insert(name, value);
            }
            Err(e) => self.reject(format!("keyword input {name:?}: {e}")),
        }
        self
    }

    /// Append a positional input, failing if it has no JSON form
    pub fn try_arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.positional.push(to_checked_value(value)?);
        Ok(self)
    }

    /// Set a keyword input, failing if it has no JSON form
    pub fn try_kwarg<K: Into<String>, T: Serialize + ?Sized>(
        mut self,
        name: K,
        value: &T,
    ) -> Result<Self> {
        self.keyword.insert(name.into(), to_checked_value(value)?);
        Ok(self)
    }

    /// Positional input at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword input named `name`
    pub fn get_kwarg(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Why an input was refused by [`arg`](Self::arg) or [`kwarg`](Self::kwarg)
    pub fn rejection(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    /// Whether no inputs were supplied
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty() && self.rejected.is_none()
    }

    fn reject(&mut self, reason: String) {
        // First refusal wins
        self.rejected.get_or_insert(reason);
    }
}

impl Serialize for CallArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let Some(reason) = &self.rejected {
            return Err(ser::Error::custom(reason));
        }
        let mut state = serializer.serialize_struct("CallArgs", 2)?;
        state.serialize_field("positional", &self.positional)?;
        state.serialize_field("keyword", &self.keyword)?;
        state.end()
    }
}
