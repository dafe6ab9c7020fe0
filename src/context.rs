//! The evaluation context: a lookup from field name to either a plain string
//! value or a predicate.

use std::collections::HashMap;

use crate::alternative::Alternative;

/// What a [`Context`] knows about one field.
pub enum ContextValue {
    /// An ordinary string value, checked against the alternative's operator
    /// by the built-in evaluation rules.
    Value(String),
    /// A caller-supplied predicate, invoked instead of the built-in check
    /// and given the whole alternative so it can inspect the operator and
    /// value itself. Returns `Some(reason)` on failure, `None` on success.
    ///
    /// This is how callers express things like blacklists and rate limits:
    /// a field whose "value" is really a question answered by external
    /// state rather than a string stored in the context.
    Predicate(Box<dyn Fn(&Alternative) -> Option<String>>),
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

/// A lookup from field name to [`ContextValue`], supplied by the caller when
/// evaluating a rune's restrictions.
pub trait Context {
    fn get(&self, field: &str) -> Option<&ContextValue>;
}

/// A plain [`HashMap`]-backed [`Context`], holding either string values or
/// predicates.
#[derive(Default)]
pub struct MapContext {
    entries: HashMap<String, ContextValue>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a plain string value for `field`.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(field.into(), ContextValue::Value(value.into()));
        self
    }

    /// Inserts a predicate for `field`.
    pub fn with_predicate(
        mut self,
        field: impl Into<String>,
        predicate: impl Fn(&Alternative) -> Option<String> + 'static,
    ) -> Self {
        self.entries
            .insert(field.into(), ContextValue::Predicate(Box::new(predicate)));
        self
    }
}

impl Context for MapContext {
    fn get(&self, field: &str) -> Option<&ContextValue> {
        self.entries.get(field)
    }
}

/// A [`Context`] with no entries at all; every field is absent.
impl Context for () {
    fn get(&self, _field: &str) -> Option<&ContextValue> {
        None
    }
}
