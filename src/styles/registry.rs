//! The style registry: ordered node and edge style lists loaded from a
//! `.tikzstyles` source.
//!
//! Loading is all-or-nothing. `load` builds a complete new registry value and
//! only hands it to the caller on success, so a failed reload leaves whatever
//! registry the caller currently holds untouched.

use std::fmt;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::styles::properties::StyleProperties;
use crate::styles::style::{is_arrow_atom, Style, StyleVariant, RESERVED_NONE};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read style file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad style file '{path}', line {line}: {msg}")]
    Parse {
        path: String,
        line: usize,
        msg: String,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StyleRegistry {
    node_styles: Vec<Style>,
    edge_styles: Vec<Style>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a style file. Returns a fresh registry; the caller
    /// swaps it in on success.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| {
            warn!("failed to read style file {}", path.display());
            LoadError::Read {
                path: path.display().to_string(),
                source,
            }
        })?;
        let reg = Self::parse(&src, &path.display().to_string())?;
        debug!(
            "loaded {} node styles, {} edge styles from {}",
            reg.node_styles.len(),
            reg.edge_styles.len(),
            path.display()
        );
        Ok(reg)
    }

    /// Parse style-file text. `origin` labels errors (usually the path).
    pub fn parse(src: &str, origin: &str) -> Result<Self, LoadError> {
        let mut reg = StyleRegistry::new();
        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('%') {
                continue;
            }
            let (name, data) = parse_style_line(text).map_err(|msg| LoadError::Parse {
                path: origin.to_string(),
                line,
                msg,
            })?;
            if name == RESERVED_NONE {
                return Err(LoadError::Parse {
                    path: origin.to_string(),
                    line,
                    msg: format!("'{}' is a reserved style name", RESERVED_NONE),
                });
            }
            let variant = classify(&data);
            let style = Style::with_data(variant, &name, data);
            if !reg.add_style(style) {
                return Err(LoadError::Parse {
                    path: origin.to_string(),
                    line,
                    msg: format!("duplicate style name '{}'", name),
                });
            }
        }
        Ok(reg)
    }

    /// Node style by exact, case-sensitive name. The reserved sentinel
    /// `"none"` always misses; so does any unknown name.
    pub fn node_style(&self, name: &str) -> Option<&Style> {
        if name == RESERVED_NONE {
            return None;
        }
        self.node_styles.iter().find(|s| s.name() == name)
    }

    pub fn edge_style(&self, name: &str) -> Option<&Style> {
        if name == RESERVED_NONE {
            return None;
        }
        self.edge_styles.iter().find(|s| s.name() == name)
    }

    pub fn node_style_mut(&mut self, name: &str) -> Option<&mut Style> {
        if name == RESERVED_NONE {
            return None;
        }
        self.node_styles.iter_mut().find(|s| s.name() == name)
    }

    pub fn edge_style_mut(&mut self, name: &str) -> Option<&mut Style> {
        if name == RESERVED_NONE {
            return None;
        }
        self.edge_styles.iter_mut().find(|s| s.name() == name)
    }

    /// Enumeration in load order, for deterministic palette layout.
    pub fn node_styles(&self) -> &[Style] {
        &self.node_styles
    }

    pub fn edge_styles(&self) -> &[Style] {
        &self.edge_styles
    }

    /// Insert a style. Rejects empty names, the reserved `"none"`, and
    /// duplicates within the variant.
    pub fn add_style(&mut self, style: Style) -> bool {
        if style.name().is_empty() || style.name() == RESERVED_NONE {
            return false;
        }
        let list = match style.variant() {
            StyleVariant::Node => &mut self.node_styles,
            StyleVariant::Edge => &mut self.edge_styles,
        };
        if list.iter().any(|s| s.name() == style.name()) {
            return false;
        }
        list.push(style);
        true
    }
}

/// Writes the registry back out as `\tikzstyle` lines in load order, node
/// styles first. Override keys survive the round trip.
impl fmt::Display for StyleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.node_styles.iter().chain(self.edge_styles.iter()) {
            writeln!(f, "\\tikzstyle{{{}}}={}", s.name(), s.data())?;
        }
        Ok(())
    }
}

/// A record is an edge style iff its option list carries an arrow atom.
fn classify(data: &StyleProperties) -> StyleVariant {
    if data.find_atom(is_arrow_atom).is_some() {
        StyleVariant::Edge
    } else {
        StyleVariant::Node
    }
}

fn parse_style_line(text: &str) -> Result<(String, StyleProperties), String> {
    let rest = text
        .strip_prefix("\\tikzstyle")
        .ok_or_else(|| "expected \\tikzstyle".to_string())?;
    let rest = rest
        .strip_prefix('{')
        .ok_or_else(|| "expected '{' after \\tikzstyle".to_string())?;
    let close = rest
        .find('}')
        .ok_or_else(|| "unterminated style name".to_string())?;
    let name = rest[..close].trim();
    if name.is_empty() {
        return Err("empty style name".to_string());
    }
    let rest = rest[close + 1..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .ok_or_else(|| "expected '=' after style name".to_string())?;
    let rest = rest.trim();
    if !rest.starts_with('[') || !rest.ends_with(']') {
        return Err("expected bracketed option list".to_string());
    }
    let body = &rest[1..rest.len() - 1];
    let data = parse_options(body)?;
    Ok((name.to_string(), data))
}

/// Split an option list on top-level commas, honoring `{...}` groups, and
/// classify each piece as a pair or an atom.
fn parse_options(body: &str) -> Result<StyleProperties, String> {
    let mut data = StyleProperties::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let bytes = body.as_bytes();
    let mut pieces: Vec<&str> = Vec::new();
    for (i, &c) in bytes.iter().enumerate() {
        match c {
            b'{' => depth += 1,
            b'}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced '}'".to_string())?;
            }
            b',' if depth == 0 => {
                pieces.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced '{'".to_string());
    }
    pieces.push(&body[start..]);

    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        match top_level_eq(piece) {
            Some(eq) => {
                let key = piece[..eq].trim();
                if key.is_empty() {
                    return Err(format!("empty key in '{}'", piece));
                }
                let value = unbrace(piece[eq + 1..].trim());
                data.set_property(key, value);
            }
            None => data.set_atom(piece),
        }
    }
    Ok(data)
}

fn top_level_eq(piece: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in piece.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn unbrace(value: &str) -> &str {
    value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "\
% node styles
\\tikzstyle{white dot}=[fill=white, draw=black, shape=circle]
\\tikzstyle{black dot}=[fill=black, draw=black, shape=circle]

% edge styles
\\tikzstyle{arrow}=[->, draw=black]
";

    #[test]
    fn test_parse_classifies_and_orders() {
        let reg = StyleRegistry::parse(SRC, "test").unwrap();
        let nodes: Vec<&str> = reg.node_styles().iter().map(|s| s.name()).collect();
        assert_eq!(nodes, vec!["white dot", "black dot"]);
        assert_eq!(reg.edge_styles().len(), 1);
        assert_eq!(reg.edge_styles()[0].variant(), StyleVariant::Edge);
    }

    #[test]
    fn test_lookup_misses() {
        let reg = StyleRegistry::parse(SRC, "test").unwrap();
        assert!(reg.node_style("none").is_none());
        assert!(reg.node_style("nonexistent").is_none());
        // Case-sensitive.
        assert!(reg.node_style("White dot").is_none());
        // Variant separation: an edge style is not a node style.
        assert!(reg.node_style("arrow").is_none());
        assert!(reg.edge_style("arrow").is_some());
    }

    #[test]
    fn test_parse_error_carries_line_and_origin() {
        let err = StyleRegistry::parse("\\tikzstyle{x}=[fill=", "styles.tikzstyles").unwrap_err();
        match err {
            LoadError::Parse { path, line, .. } => {
                assert_eq!(path, "styles.tikzstyles");
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_and_reserved_names_rejected() {
        let dup = "\\tikzstyle{a}=[fill=red]\n\\tikzstyle{a}=[fill=blue]\n";
        assert!(StyleRegistry::parse(dup, "t").is_err());
        let none = "\\tikzstyle{none}=[fill=red]\n";
        assert!(StyleRegistry::parse(none, "t").is_err());

        let mut reg = StyleRegistry::new();
        assert!(!reg.add_style(Style::new(StyleVariant::Node, "none")));
        assert!(!reg.add_style(Style::new(StyleVariant::Node, "")));
        assert!(reg.add_style(Style::new(StyleVariant::Node, "a")));
        assert!(!reg.add_style(Style::new(StyleVariant::Node, "a")));
        // Same name in the other variant list is fine.
        assert!(reg.add_style(Style::new(StyleVariant::Edge, "a")));
    }

    #[test]
    fn test_display_round_trips() {
        let reg = StyleRegistry::parse(SRC, "test").unwrap();
        let emitted = reg.to_string();
        let back = StyleRegistry::parse(&emitted, "emitted").unwrap();
        assert_eq!(back.node_styles().len(), reg.node_styles().len());
        assert_eq!(back.edge_styles().len(), reg.edge_styles().len());
        assert_eq!(
            back.node_style("white dot").unwrap().data(),
            reg.node_style("white dot").unwrap().data()
        );
    }
}
