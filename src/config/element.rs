// src/config/element.rs

use std::collections::BTreeMap;

/// A node of the parsed configuration tree.
///
/// This is the shape produced by the configuration parser: a named block
/// with an optional argument, flat `key -> raw value` attributes and nested
/// child blocks. The system config builder only ever looks at direct
/// children named `system` and at their attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub arg: String,
    pub attrs: BTreeMap<String, String>,
    pub elements: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_element(mut self, child: Element) -> Self {
        self.elements.push(child);
        self
    }

    /// Direct children with the given name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.name == name)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}
