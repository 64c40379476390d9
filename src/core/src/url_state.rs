//! Form fields mirrored into URL query parameters.

use crate::store::Store;
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Query parameter holding the selected asset.
pub const PARAM_ASSET: &str = "asset";
/// Query parameter holding the chain of the selected asset.
pub const PARAM_CHAIN: &str = "chain";
/// Query parameter holding the shielded flag of the source.
pub const PARAM_SHIELDED: &str = "shielded";

pub type Params = BTreeMap<String, String>;

/// Named query parameters.
///
/// Setting a parameter to `None` removes it. Batched writes reach
/// subscribers as a single change.
#[derive(Debug, Default)]
pub struct UrlState {
    store: Store<Params>,
}

impl UrlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a query string such as `asset=NAM&chain=namada`.
    pub fn from_query(query: &str) -> Self {
        let params = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let name = parts.next()?;
                let value = parts.next().unwrap_or_default();
                if name.is_empty() || value.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self {
            store: Store::new(params),
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.store.with(|params| params.get(name).cloned())
    }

    /// Sets or, with `None`, removes one parameter.
    pub fn set(&self, name: &str, value: Option<&str>) {
        self.store.update(|params| apply(params, name, value));
    }

    /// Applies several updates as one change.
    pub fn set_many(&self, updates: &[(&str, Option<&str>)]) {
        self.store.update(|params| {
            for (name, value) in updates {
                apply(params, name, *value);
            }
        });
    }

    pub fn params(&self) -> Params {
        self.store.get()
    }

    /// Current parameters rendered as a query string, names sorted.
    pub fn to_query(&self) -> String {
        self.store.with(|params| {
            params
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("&")
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Params> {
        self.store.subscribe()
    }
}

fn apply(params: &mut Params, name: &str, value: Option<&str>) {
    match value {
        Some(value) if !value.is_empty() => {
            params.insert(name.to_string(), value.to_string());
        }
        _ => {
            params.remove(name);
        }
    }
}
