//! Catalog snapshots and the provider seam the injector queries.

use super::PackageDescriptor;

/// Every pack known to a registry at one point in time, in enumeration order.
///
/// The order is the tie-break for injection rules: the first pack a selector
/// matches wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    packs: Vec<PackageDescriptor>,
}

impl Catalog {
    pub fn new(packs: Vec<PackageDescriptor>) -> Self {
        Self { packs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.packs.iter()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// First pack whose name or project id equals `selector`.
    pub fn find(&self, selector: &str) -> Option<&PackageDescriptor> {
        self.packs.iter().find(|p| p.is_selected_by(selector))
    }
}

impl FromIterator<PackageDescriptor> for Catalog {
    fn from_iter<I: IntoIterator<Item = PackageDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source of catalog snapshots.
///
/// Returns `None` when the registry has not been populated yet.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogProvider: Send + Sync {
    fn snapshot(&self) -> Option<Catalog>;
}

impl CatalogProvider for Catalog {
    fn snapshot(&self) -> Option<Catalog> {
        Some(self.clone())
    }
}
