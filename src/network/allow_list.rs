//! Token allow-list applied to raw pairs before aggregation

use std::collections::HashSet;
use crate::types::{RawPair, RawToken};

/// Set of token addresses eligible for display. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    addresses: Option<HashSet<String>>,
}

impl AllowList {
    pub fn allow_all() -> Self {
        Self { addresses: None }
    }

    /// An empty input allows every token.
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_ascii_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self {
            addresses: (!set.is_empty()).then_some(set),
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.addresses.is_some()
    }

    pub fn len(&self) -> usize {
        self.addresses.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_allowed(&self, address: &str) -> bool {
        match &self.addresses {
            None => true,
            Some(set) => set.contains(&address.trim().to_ascii_lowercase()),
        }
    }

    fn token_allowed(&self, token: &Option<RawToken>) -> bool {
        if !self.is_restricted() {
            return true;
        }
        token
            .as_ref()
            .and_then(|t| t.contract_address.as_deref())
            .is_some_and(|address| self.is_allowed(address))
    }

    /// Keeps pairs whose two tokens are both allowed.
    pub fn filter_pairs(&self, pairs: Vec<RawPair>) -> Vec<RawPair> {
        if !self.is_restricted() {
            return pairs;
        }
        pairs
            .into_iter()
            .filter(|p| self.token_allowed(&p.token0) && self.token_allowed(&p.token1))
            .collect()
    }
}
