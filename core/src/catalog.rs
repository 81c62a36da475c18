use serde::Deserialize;
use serde::Serialize;

/// A selectable target platform with its post-count bounds.
///
/// Invariant (enforced at catalog construction): `1 <= default_quantity <=
/// max_quantity`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlatformOption {
    pub id: String,
    pub display_name: String,
    pub default_quantity: u32,
    pub max_quantity: u32,
}

/// Immutable, injected table of selectable platforms.
///
/// Built once at startup (defaults or config) and passed to the controllers;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlatformCatalog {
    options: Vec<PlatformOption>,
}

impl PlatformCatalog {
    /// Build a catalog, skipping entries whose bounds are inconsistent.
    pub fn new(options: Vec<PlatformOption>) -> Self {
        let options = options
            .into_iter()
            .filter(|opt| {
                opt.default_quantity >= 1 && opt.max_quantity >= opt.default_quantity
            })
            .collect();
        Self { options }
    }

    pub fn get(&self, id: &str) -> Option<&PlatformOption> {
        self.options.iter().find(|opt| opt.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Default for PlatformCatalog {
    /// The reference catalog: LinkedIn (default 2, max 5) and X/Twitter
    /// (default 3, max 10).
    fn default() -> Self {
        Self::new(vec![
            PlatformOption {
                id: "linkedin".to_string(),
                display_name: "LinkedIn".to_string(),
                default_quantity: 2,
                max_quantity: 5,
            },
            PlatformOption {
                id: "twitter".to_string(),
                display_name: "X/Twitter".to_string(),
                default_quantity: 3,
                max_quantity: 10,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_catalog_has_two_entries() {
        let catalog = PlatformCatalog::default();
        assert_eq!(catalog.len(), 2);
        let linkedin = catalog.get("linkedin").expect("linkedin present");
        assert_eq!(linkedin.default_quantity, 2);
        assert_eq!(linkedin.max_quantity, 5);
        let twitter = catalog.get("twitter").expect("twitter present");
        assert_eq!(twitter.default_quantity, 3);
        assert_eq!(twitter.max_quantity, 10);
    }

    #[test]
    fn inconsistent_entries_are_skipped() {
        let catalog = PlatformCatalog::new(vec![
            PlatformOption {
                id: "ok".to_string(),
                display_name: "Ok".to_string(),
                default_quantity: 1,
                max_quantity: 3,
            },
            PlatformOption {
                id: "max-below-default".to_string(),
                display_name: "Bad".to_string(),
                default_quantity: 5,
                max_quantity: 2,
            },
            PlatformOption {
                id: "zero-default".to_string(),
                display_name: "Bad".to_string(),
                default_quantity: 0,
                max_quantity: 2,
            },
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("ok").is_some());
    }
}
