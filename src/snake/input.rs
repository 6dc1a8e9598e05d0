//! Key alias table: raw key identifiers to headings.
//!
//! Key identifiers follow the browser `KeyboardEvent.key` naming (`ArrowUp`,
//! `w`, ...) so that keyboard events and on-screen buttons share one table.

use super::types::Heading;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default bindings: arrows, WASD in both cases, and the keys that sit under
/// W/A/S/D on an Arabic layout.
const DEFAULT_ALIASES: &[(&str, Heading)] = &[
    ("ArrowUp", Heading::Up),
    ("w", Heading::Up),
    ("W", Heading::Up),
    ("\u{635}", Heading::Up), // ص
    ("ArrowDown", Heading::Down),
    ("s", Heading::Down),
    ("S", Heading::Down),
    ("\u{633}", Heading::Down), // س
    ("ArrowLeft", Heading::Left),
    ("a", Heading::Left),
    ("A", Heading::Left),
    ("\u{634}", Heading::Left), // ش
    ("ArrowRight", Heading::Right),
    ("d", Heading::Right),
    ("D", Heading::Right),
    ("\u{64A}", Heading::Right), // ي
];

/// Mapping from raw key identifier to heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyAliases {
    map: HashMap<String, Heading>,
}

impl Default for KeyAliases {
    fn default() -> Self {
        Self {
            map: DEFAULT_ALIASES
                .iter()
                .map(|&(key, heading)| (key.to_string(), heading))
                .collect(),
        }
    }
}

impl KeyAliases {
    /// An empty table. Nothing maps until aliases are inserted.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `key` to `heading`, replacing any previous binding for that key.
    pub fn insert(&mut self, key: impl Into<String>, heading: Heading) {
        self.map.insert(key.into(), heading);
    }

    /// Overlay `other` on top of this table; entries in `other` win.
    pub fn merge(&mut self, other: &KeyAliases) {
        for (key, heading) in &other.map {
            self.map.insert(key.clone(), *heading);
        }
    }

    pub fn resolve(&self, key: &str) -> Option<Heading> {
        self.map.get(key).copied()
    }

    /// All keys bound to `heading`, sorted for stable display.
    pub fn keys_for(&self, heading: Heading) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .map
            .iter()
            .filter(|(_, h)| **h == heading)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
