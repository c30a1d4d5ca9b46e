//! Template expansion context.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Value of a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Undefined (i.e. null).
    Undefined,
    /// String value.
    String(String),
    /// List.
    List(Vec<String>),
    /// Associative array.
    Assoc(Vec<(String, String)>),
}

impl Value {
    /// Returns `true` if the value is expanded as undefined.
    ///
    /// Empty lists and empty associative arrays are considered undefined.
    #[must_use]
    pub(super) fn is_undefined(&self) -> bool {
        match self {
            Self::Undefined => true,
            Self::String(_) => false,
            Self::List(list) => list.is_empty(),
            Self::Assoc(assoc) => assoc.is_empty(),
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for Value {
    #[inline]
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        Self::List(v.iter().map(|&s| s.into()).collect())
    }
}

impl From<Vec<(String, String)>> for Value {
    #[inline]
    fn from(v: Vec<(String, String)>) -> Self {
        Self::Assoc(v)
    }
}

impl From<&[(&str, &str)]> for Value {
    fn from(v: &[(&str, &str)]) -> Self {
        Self::Assoc(v.iter().map(|&(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}

/// Template expansion context.
///
/// A mapping from variable names to values.
#[derive(Default, Debug, Clone)]
pub struct Context {
    /// Variable values.
    variables: BTreeMap<String, Value>,
}

impl Context {
    /// Creates a new empty context.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a variable, returning the old value.
    ///
    /// Passing [`Value::Undefined`] removes the value from the context.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::template::{Context, UriTemplate, Value};
    ///
    /// let template = UriTemplate::new("/users/{username}")?;
    /// let mut context = Context::new();
    ///
    /// context.insert("username", "foo");
    /// assert_eq!(template.expand(&context)?, "/users/foo");
    ///
    /// context.insert("username", Value::Undefined);
    /// assert_eq!(template.expand(&context)?, "/users/");
    /// # Ok::<_, generic_uri::template::Error>(())
    /// ```
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        match value.into() {
            Value::Undefined => self.variables.remove(&key),
            value => self.variables.insert(key, value),
        }
    }

    /// Removes the variable, returning its value.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(key)
    }

    /// Removes all entries in the context.
    #[inline]
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Returns a reference to the value for the key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Context {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_removes() {
        let mut context = Context::new();
        assert_eq!(context.insert("a", "x"), None);
        assert_eq!(context.insert("a", Value::Undefined), Some(Value::from("x")));
        assert_eq!(context.get("a"), None);
        assert_eq!(context.insert("b", None::<&str>), None);
        assert_eq!(context.get("b"), None);
    }

    #[test]
    fn empty_composites_are_undefined() {
        assert!(Value::List(Vec::new()).is_undefined());
        assert!(Value::Assoc(Vec::new()).is_undefined());
        assert!(!Value::from("").is_undefined());
    }
}
