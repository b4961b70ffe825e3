//! Free-form session notes.
//!
//! Notes are the one record stored as a raw string rather than JSON,
//! matching the export bundle's `notes` field.

use std::rc::Rc;

use crate::store::{keys, KvStore};

pub struct Notes {
    store: Rc<dyn KvStore>,
}

impl Notes {
    pub fn new(store: Rc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> String {
        match self.store.get(keys::NOTES) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read notes");
                String::new()
            }
        }
    }

    pub fn save(&self, text: &str) {
        if let Err(e) = self.store.set(keys::NOTES, text) {
            tracing::warn!(error = %e, "failed to write notes");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(keys::NOTES) {
            tracing::warn!(error = %e, "failed to clear notes");
        }
    }
}
