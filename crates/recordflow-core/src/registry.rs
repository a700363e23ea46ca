//! Pair registry: app id -> integration pair.
//!
//! Built once at startup from the configured pair list and never mutated
//! afterwards, so it is shared across requests behind an `Arc` and read
//! without locks.

use std::collections::HashMap;

use recordflow_types::error::ConfigError;
use recordflow_types::ids::AppId;
use recordflow_types::pair::IntegrationPair;

/// Read-only lookup of integration pairs by source app id.
#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: HashMap<AppId, IntegrationPair>,
}

impl PairRegistry {
    /// Build the registry, rejecting duplicate app ids.
    pub fn from_pairs(pairs: Vec<IntegrationPair>) -> Result<Self, ConfigError> {
        let mut map = HashMap::with_capacity(pairs.len());
        for pair in pairs {
            let app_id = pair.app_id.clone();
            if map.insert(app_id.clone(), pair).is_some() {
                return Err(ConfigError::DuplicatePair(app_id));
            }
        }
        tracing::debug!(pairs = map.len(), "pair registry built");
        Ok(Self { pairs: map })
    }

    /// Look up the pair for an app id.
    pub fn find_pair(&self, app_id: &AppId) -> Option<&IntegrationPair> {
        self.pairs.get(app_id)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Registered pairs ordered by app id.
    pub fn pairs(&self) -> Vec<&IntegrationPair> {
        let mut pairs: Vec<_> = self.pairs.values().collect();
        pairs.sort_by(|a, b| a.app_id.cmp(&b.app_id));
        pairs
    }
}
