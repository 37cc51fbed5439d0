//! Statement contexts - key/value facts used to resolve placeholders.
//!
//! A statement is something like "the currently selected profile". Contexts
//! answer lookups for single values and for tuples; a miss is `None`, never
//! an error, and callers supply their own defaults.

mod delegating;

pub use delegating::*;

use std::collections::HashMap;
use std::rc::Rc;

/// Resolves statement keys to values.
pub trait StatementContext {
    /// Resolve a key to a single value.
    fn get(&self, key: &str) -> Option<String>;

    /// Resolve a key to a tuple of values.
    fn get_tuple(&self, key: &str) -> Option<Vec<String>>;
}

impl<T: StatementContext + ?Sized> StatementContext for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn get_tuple(&self, key: &str) -> Option<Vec<String>> {
        (**self).get_tuple(key)
    }
}

impl<T: StatementContext + ?Sized> StatementContext for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn get_tuple(&self, key: &str) -> Option<Vec<String>> {
        (**self).get_tuple(key)
    }
}

impl<T: StatementContext + ?Sized> StatementContext for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn get_tuple(&self, key: &str) -> Option<Vec<String>> {
        (**self).get_tuple(key)
    }
}

/// A context that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl StatementContext for EmptyContext {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn get_tuple(&self, _key: &str) -> Option<Vec<String>> {
        None
    }
}

/// A fixed, map-backed context. Typically the application-global root of
/// every delegation chain.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    values: HashMap<String, String>,
    tuples: HashMap<String, Vec<String>>,
}

impl MapContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-valued statement.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Add a tuple statement.
    pub fn with_tuple<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tuples
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Set a single-valued statement in place.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl StatementContext for MapContext {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn get_tuple(&self, key: &str) -> Option<Vec<String>> {
        self.tuples.get(key).cloned()
    }
}
