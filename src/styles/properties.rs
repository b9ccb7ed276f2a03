//! Ordered property store backing a style.
//!
//! Two kinds of entry: `key=value` pairs and bare atoms (e.g. the arrow spec
//! `->`). Keys are unique; insertion order is preserved so that emission is
//! deterministic and round-trips the source file. An absent key means
//! "inherit the default", never "explicitly empty".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyEntry {
    Pair { key: String, value: String },
    Atom(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    entries: Vec<PropertyEntry>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            PropertyEntry::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn property_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property(key).unwrap_or(default)
    }

    /// Set or update a pair. An existing key keeps its position so emission
    /// order stays stable across edits.
    pub fn set_property(&mut self, key: &str, value: &str) {
        for e in &mut self.entries {
            if let PropertyEntry::Pair { key: k, value: v } = e {
                if k == key {
                    *v = value.to_string();
                    return;
                }
            }
        }
        self.entries.push(PropertyEntry::Pair {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub fn remove_property(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !matches!(e, PropertyEntry::Pair { key: k, .. } if k == key));
        self.entries.len() != before
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, PropertyEntry::Atom(a) if a == name))
    }

    pub fn set_atom(&mut self, name: &str) {
        if !self.has_atom(name) {
            self.entries.push(PropertyEntry::Atom(name.to_string()));
        }
    }

    pub fn remove_atom(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, PropertyEntry::Atom(a) if a == name));
        self.entries.len() != before
    }

    /// First atom satisfying the predicate, if any.
    pub fn find_atom(&self, mut pred: impl FnMut(&str) -> bool) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            PropertyEntry::Atom(a) if pred(a) => Some(a.as_str()),
            _ => None,
        })
    }
}

fn needs_braces(value: &str) -> bool {
    value.is_empty() || value.contains([',', '=', '[', ']', '{', '}'])
}

/// Renders the bracketed option list, e.g. `[fill=white, draw=black, ->]`.
impl fmt::Display for StyleProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match e {
                PropertyEntry::Pair { key, value } => {
                    if needs_braces(value) {
                        write!(f, "{}={{{}}}", key, value)?;
                    } else {
                        write!(f, "{}={}", key, value)?;
                    }
                }
                PropertyEntry::Atom(a) => write!(f, "{}", a)?,
            }
        }
        write!(f, "]")
    }
}
