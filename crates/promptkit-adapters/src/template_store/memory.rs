//! In-memory template store with built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use promptkit_core::{
    application::ports::TemplateStore,
    domain::PromptTemplate,
    error::{PromptError, PromptResult},
};
use tracing::debug;

use crate::builtin_templates;

/// Thread-safe in-memory template store keyed by template name.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<String, PromptTemplate>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> PromptResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates, replacing same-named entries.
    pub fn load_builtin(&self) -> PromptResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> PromptResult<usize> {
        Ok(self.read()?.len())
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> PromptResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(
        &self,
    ) -> PromptResult<std::sync::RwLockReadGuard<'_, HashMap<String, PromptTemplate>>> {
        self.inner.read().map_err(|_| PromptError::StoreLockError)
    }

    fn write(
        &self,
    ) -> PromptResult<std::sync::RwLockWriteGuard<'_, HashMap<String, PromptTemplate>>> {
        self.inner.write().map_err(|_| PromptError::StoreLockError)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, name: &str) -> PromptResult<PromptTemplate> {
        self.read()?
            .get(name)
            .cloned()
            .ok_or_else(|| PromptError::TemplateNotFound { name: name.into() })
    }

    fn list(&self) -> PromptResult<Vec<PromptTemplate>> {
        let mut templates: Vec<PromptTemplate> = self.read()?.values().cloned().collect();
        templates.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(templates)
    }

    fn insert(&self, template: PromptTemplate) -> PromptResult<()> {
        let name = template.name().to_string();
        if self.write()?.insert(name.clone(), template).is_some() {
            debug!(%name, "replaced existing template");
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> PromptResult<()> {
        self.write()?
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| PromptError::TemplateNotFound { name: name.into() })
    }

    fn clear(&self) -> PromptResult<()> {
        self.write()?.clear();
        Ok(())
    }
}
