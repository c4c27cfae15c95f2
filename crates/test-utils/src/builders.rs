#![allow(dead_code)]

use sysconfig::config::{Element, SYSTEM_SECTION, SystemConfig};
use sysconfig::errors::Result;

/// Builder for a configuration tree root holding `system` sections.
pub struct ConfigTreeBuilder {
    root: Element,
}

impl ConfigTreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Element::new("ROOT"),
        }
    }

    pub fn with_system(mut self, section: SectionBuilder) -> Self {
        self.root.elements.push(section.build());
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.root.elements.push(element);
        self
    }

    pub fn build(self) -> Element {
        self.root
    }

    /// Build the tree and run it through `SystemConfig::create`.
    pub fn create(self) -> Result<SystemConfig> {
        SystemConfig::create(&self.build())
    }
}

impl Default for ConfigTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `system` section.
pub struct SectionBuilder {
    section: Element,
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self {
            section: Element::new(SYSTEM_SECTION),
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.section.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> Element {
        self.section
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
