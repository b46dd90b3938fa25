//! An in-memory page backend.
//!
//! Holds element text in a plain map and records navigations instead of
//! performing them. This is the default backend for unit tests and for
//! driving the cart logic without any document at all.

use std::collections::HashMap;

use crate::{Error, Page, Result};

/// A page backend with no document behind it
///
/// Elements exist only if text has been supplied for them, either through
/// [`MemoryPage::with_text`] or a previous `set_text`.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    texts: HashMap<String, String>,
    navigations: Vec<String>,
}

impl MemoryPage {
    /// Create an empty page with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to seed an element's text
    pub fn with_text(mut self, id: &str, text: &str) -> Self {
        self.texts.insert(id.to_string(), text.to_string());
        self
    }

    /// All recorded navigation targets, oldest first
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// The most recent navigation target, if any
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(|s| s.as_str())
    }
}

impl Page for MemoryPage {
    fn text_of(&self, id: &str) -> Result<String> {
        self.texts
            .get(id)
            .cloned()
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    fn set_text(&mut self, id: &str, value: &str) -> Result<()> {
        self.texts.insert(id.to_string(), value.to_string());
        Ok(())
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        Ok(())
    }
}
