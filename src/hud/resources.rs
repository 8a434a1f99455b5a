//! Resource counters.

use crate::game::{ResourceBank, ResourceKind};
use std::collections::BTreeMap;

/// Cached counter text per resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceCounters {
    texts: BTreeMap<ResourceKind, String>,
}

impl ResourceCounters {
    pub fn new(bank: &ResourceBank) -> Self {
        let mut counters = Self::default();
        counters.refresh(bank);
        counters
    }

    /// Re-reads every resource amount.
    pub fn refresh(&mut self, bank: &ResourceBank) {
        for kind in ResourceKind::ALL {
            let amount = bank.get(&kind).copied().unwrap_or(0);
            self.texts.insert(kind, amount.to_string());
        }
    }

    pub fn text(&self, kind: ResourceKind) -> &str {
        self.texts.get(&kind).map_or("0", String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &str)> {
        self.texts.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_keep_cached_text_until_refresh() {
        let mut bank = ResourceBank::from([(ResourceKind::Gold, 10)]);
        let mut counters = ResourceCounters::new(&bank);
        assert_eq!(counters.text(ResourceKind::Gold), "10");
        assert_eq!(counters.text(ResourceKind::Stone), "0");

        bank.insert(ResourceKind::Gold, 99);
        assert_eq!(counters.text(ResourceKind::Gold), "10");
        counters.refresh(&bank);
        assert_eq!(counters.text(ResourceKind::Gold), "99");
        assert_eq!(counters.iter().count(), 3);
    }
}
