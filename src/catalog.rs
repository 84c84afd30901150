//! Read-only list of beverage types the machine can be supplied with.

use std::sync::Arc;

use crate::model::{BeverageType, CatalogIndex};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<BeverageType>>,
}

impl Catalog {
    pub fn new(entries: impl IntoIterator<Item = BeverageType>) -> Self {
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, index: CatalogIndex) -> Option<&Arc<BeverageType>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BeverageType>> + '_ {
        self.entries.iter()
    }
}
