//! Platform selection state.
//!
//! Owns the platform id → requested quantity map. Absence of a key means
//! "not selected". Every stored quantity is within `[1, max_quantity]` for
//! its platform at all times: out-of-range requests are clamped on entry and
//! never remove a selection as a side effect.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::catalog::PlatformCatalog;

/// Mapping from platform id to requested post count.
pub type SelectionMap = HashMap<String, u32>;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContentPicker {
    catalog: PlatformCatalog,
    selections: SelectionMap,
}

impl ContentPicker {
    pub fn new(catalog: PlatformCatalog) -> Self {
        Self {
            catalog,
            selections: SelectionMap::new(),
        }
    }

    pub fn catalog(&self) -> &PlatformCatalog {
        &self.catalog
    }

    pub fn selections(&self) -> &SelectionMap {
        &self.selections
    }

    pub fn is_selected(&self, platform_id: &str) -> bool {
        self.selections.contains_key(platform_id)
    }

    pub fn quantity(&self, platform_id: &str) -> Option<u32> {
        self.selections.get(platform_id).copied()
    }

    /// Enable or disable a platform.
    ///
    /// Enabling inserts the catalog default quantity; enabling an
    /// already-selected platform keeps its current quantity. Unknown ids are
    /// ignored (the catalog is a closed, caller-controlled set).
    pub fn toggle(&mut self, platform_id: &str, enabled: bool) {
        let Some(option) = self.catalog.get(platform_id) else {
            return;
        };

        if enabled {
            self.selections
                .entry(option.id.clone())
                .or_insert(option.default_quantity);
        } else {
            self.selections.remove(platform_id);
        }
    }

    /// Set the requested quantity for a selected platform, clamped into
    /// `[1, max_quantity]`. No-op when the platform is not selected.
    pub fn set_quantity(&mut self, platform_id: &str, requested: i64) {
        let Some(option) = self.catalog.get(platform_id) else {
            return;
        };
        let Some(slot) = self.selections.get_mut(platform_id) else {
            return;
        };
        *slot = requested.clamp(1, i64::from(option.max_quantity)) as u32;
    }

    /// Discard every selection (used when a project session ends).
    pub fn clear(&mut self) {
        self.selections.clear();
    }
}
