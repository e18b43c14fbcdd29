//! Parameter store collaborator
//!
//! Jurisdiction-specific account codes (e.g. `condominium-current-revenue-account`)
//! live in a parameter store, read far more often than they change. Reads go
//! through a cache; after any bulk change the caller must invoke [`ParameterStore::clear`]
//! so subsequent reads are fresh.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::CoreError;

/// Read/write access to named string parameters
pub trait ParameterStore {
    /// Returns the value of a parameter
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownParameter`] if no parameter with this name exists
    fn get_value(&self, name: &str) -> Result<String, CoreError>;

    /// Sets a parameter value
    fn change_value(&mut self, name: &str, value: &str);

    /// Invalidates the read cache
    ///
    /// Must be called after any bulk parameter change so subsequent reads
    /// observe the new values.
    fn clear(&mut self);
}

/// In-memory parameter store with a read-through cache
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: HashMap<String, String>,
    cache: RefCell<HashMap<String, String>>,
}

impl InMemoryParameterStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a parameter exists
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn get_value(&self, name: &str) -> Result<String, CoreError> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(cached.clone());
        }
        let value = self
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownParameter(name.to_string()))?;
        self.cache
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    fn change_value(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
        self.cache.borrow_mut().remove(name);
    }

    fn clear(&mut self) {
        self.cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_parameter() {
        let store = InMemoryParameterStore::new();
        let result = store.get_value("condominium-current-revenue-account");
        assert!(matches!(result, Err(CoreError::UnknownParameter(_))));
    }

    #[test]
    fn test_change_then_read() {
        let mut store = InMemoryParameterStore::new();
        store.change_value("condominium-current-revenue-account", "701");
        assert_eq!(
            store.get_value("condominium-current-revenue-account").unwrap(),
            "701"
        );
    }

    #[test]
    fn test_clear_invalidates_cache() {
        let mut store = InMemoryParameterStore::new();
        store.change_value("condominium-default-owner-account", "450");

        // Prime the cache, change the value, clear, and re-read
        assert_eq!(
            store.get_value("condominium-default-owner-account").unwrap(),
            "450"
        );
        store.change_value("condominium-default-owner-account", "410");
        store.clear();
        assert_eq!(
            store.get_value("condominium-default-owner-account").unwrap(),
            "410"
        );
    }
}
