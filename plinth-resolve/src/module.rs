//! Loaded modules and the objects they expose.

use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    fmt,
    sync::Arc,
};

/// A type-erased object exposed by a module.
pub type Object = Arc<dyn Any + Send + Sync>;

/// An attribute value with the name of its concrete type.
#[derive(Clone)]
struct Attr {
    value: Object,
    type_name: &'static str,
}

/// A named namespace of objects, addressed by a dotted path.
#[derive(Clone)]
pub struct Module {
    name: String,
    attrs: BTreeMap<String, Attr>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Fully-qualified dotted name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute, replacing any previous value with the same name.
    pub fn with<T: Any + Send + Sync>(mut self, attr: impl Into<String>, value: T) -> Self {
        self.insert(attr, value);
        self
    }

    /// Set an attribute, replacing any previous value with the same name.
    pub fn insert<T: Any + Send + Sync>(&mut self, attr: impl Into<String>, value: T) {
        self.attrs.insert(
            attr.into(),
            Attr {
                value: Arc::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    /// Get an attribute.
    pub fn get(&self, attr: &str) -> Option<&Object> {
        self.attrs.get(attr).map(|a| &a.value)
    }

    /// Name of the type an attribute was inserted as.
    pub fn type_name(&self, attr: &str) -> Option<&'static str> {
        self.attrs.get(attr).map(|a| a.type_name)
    }

    /// Get an attribute as a concrete type.
    pub fn get_as<T: Any>(&self, attr: &str) -> Option<&T> {
        self.attrs.get(attr).and_then(|a| a.value.downcast_ref::<T>())
    }

    /// Check whether an attribute exists.
    pub fn has(&self, attr: &str) -> bool {
        self.attrs.contains_key(attr)
    }

    /// Attribute names in sorted order.
    pub fn attrs(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("attrs", &self.attrs.keys().collect::<Vec<_>>())
            .finish()
    }
}
