//! A named style and its two-layer property resolution.
//!
//! Every visual property resolves through an explicit chain: the distinguished
//! override key (`tikzit <prop>`), then the plain key, then the variant's
//! built-in default table. The override layer exists so the editor can show a
//! different color on screen than the one the style's plain property emits
//! into the markup; a higher layer outside this crate may disable it by
//! resolving with `allow_override = false`.

use serde::{Deserialize, Serialize};

use crate::styles::color::Color;
use crate::styles::properties::StyleProperties;

/// Key prefix of the override layer.
pub const OVERRIDE_PREFIX: &str = "tikzit ";

/// Reserved name meaning "no style selected". Never a real registry entry.
pub const RESERVED_NONE: &str = "none";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    Node,
    Edge,
}

/// Arrow tip at one end of an edge, parsed from the arrow atom (`->`, `|-|`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowTip {
    None,
    Pointer,
    Flat,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Style {
    name: String,
    variant: StyleVariant,
    data: StyleProperties,
    /// Change token. Bumped on every mutation; consumers caching a rendered
    /// icon for this style compare revisions instead of listening for signals.
    #[serde(skip)]
    rev: u64,
}

/// Built-in default for a property family, per variant. The node/edge
/// asymmetry (white vs. gray fill) is deliberate: an unstyled edge target
/// reads as inert in the editor while an unstyled node reads as a blank disc.
fn builtin_default(variant: StyleVariant, prop: &str) -> Option<&'static str> {
    match (variant, prop) {
        (StyleVariant::Node, "fill") => Some("white"),
        (StyleVariant::Node, "draw") => Some("black"),
        (StyleVariant::Node, "shape") => Some("circle"),
        (StyleVariant::Edge, "fill") => Some("gray"),
        (StyleVariant::Edge, "draw") => Some("black"),
        _ => None,
    }
}

impl Style {
    pub fn new(variant: StyleVariant, name: &str) -> Self {
        Self::with_data(variant, name, StyleProperties::new())
    }

    pub fn with_data(variant: StyleVariant, name: &str, data: StyleProperties) -> Self {
        Style {
            name: name.to_string(),
            variant,
            data,
            rev: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> StyleVariant {
        self.variant
    }

    pub fn data(&self) -> &StyleProperties {
        &self.data
    }

    /// Current change token; differs from a previously observed value iff the
    /// style was mutated in between.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn touch(&mut self) {
        self.rev += 1;
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
            self.touch();
        }
    }

    /// Resolve a property family through override, base, then the built-in
    /// default table. With `allow_override` false the override layer is
    /// skipped entirely, yielding the "real" value the markup will carry.
    pub fn resolved(&self, prop: &str, allow_override: bool) -> Option<&str> {
        if allow_override {
            let key = format!("{}{}", OVERRIDE_PREFIX, prop);
            if let Some(v) = self.data.property(&key) {
                return Some(v);
            }
        }
        self.data
            .property(prop)
            .or_else(|| builtin_default(self.variant, prop))
    }

    /// True iff an override entry exists for `prop` and it changes the
    /// rendered value. Drives the "override enabled" checkbox in the editor.
    ///
    /// Color families compare at the color level, after name lookup and
    /// fallback, so an override spelled with an unrecognized color name that
    /// renders the same as base does not count.
    pub fn has_override(&self, prop: &str) -> bool {
        let key = format!("{}{}", OVERRIDE_PREFIX, prop);
        if self.data.property(&key).is_none() {
            return false;
        }
        match prop {
            "fill" => self.fill_color(true) != self.fill_color(false),
            "draw" => self.stroke_color(true) != self.stroke_color(false),
            _ => self.resolved(prop, true) != self.resolved(prop, false),
        }
    }

    fn resolved_color(&self, prop: &str, allow_override: bool, fallback: Color) -> Color {
        self.resolved(prop, allow_override)
            .and_then(Color::from_name)
            .unwrap_or(fallback)
    }

    pub fn fill_color(&self, allow_override: bool) -> Color {
        let fallback = match self.variant {
            StyleVariant::Node => Color::WHITE,
            StyleVariant::Edge => Color::GRAY,
        };
        self.resolved_color("fill", allow_override, fallback)
    }

    pub fn stroke_color(&self, allow_override: bool) -> Color {
        self.resolved_color("draw", allow_override, Color::BLACK)
    }

    pub fn shape(&self, allow_override: bool) -> &str {
        self.resolved("shape", allow_override).unwrap_or("circle")
    }

    pub fn category(&self) -> &str {
        self.data.property_or("category", "")
    }

    pub fn arrow_tail(&self) -> ArrowTip {
        self.arrow_atom().map_or(ArrowTip::None, |a| {
            parse_arrow(a).map_or(ArrowTip::None, |(tail, _)| tail)
        })
    }

    pub fn arrow_head(&self) -> ArrowTip {
        self.arrow_atom().map_or(ArrowTip::None, |a| {
            parse_arrow(a).map_or(ArrowTip::None, |(_, head)| head)
        })
    }

    fn arrow_atom(&self) -> Option<&str> {
        self.data.find_atom(is_arrow_atom)
    }

    pub fn set_property(&mut self, key: &str, value: &str) {
        self.data.set_property(key, value);
        self.touch();
    }

    pub fn remove_property(&mut self, key: &str) -> bool {
        let removed = self.data.remove_property(key);
        if removed {
            self.touch();
        }
        removed
    }

    /// Write the override layer for a property family.
    pub fn set_override(&mut self, prop: &str, value: &str) {
        let key = format!("{}{}", OVERRIDE_PREFIX, prop);
        self.data.set_property(&key, value);
        self.touch();
    }

    /// Drop the override entirely. The property reverts to its base value on
    /// the next read; the key is deleted, not rewritten to match base.
    pub fn clear_override(&mut self, prop: &str) -> bool {
        let key = format!("{}{}", OVERRIDE_PREFIX, prop);
        let removed = self.data.remove_property(&key);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn set_atom(&mut self, name: &str) {
        self.data.set_atom(name);
        self.touch();
    }
}

/// An atom is an arrow spec if it is built solely from tip characters around
/// a dash, e.g. `-`, `->`, `<-`, `<->`, `|-|`.
pub(crate) fn is_arrow_atom(atom: &str) -> bool {
    !atom.is_empty()
        && atom.contains('-')
        && atom.chars().all(|c| matches!(c, '-' | '<' | '>' | '|'))
}

fn parse_arrow(atom: &str) -> Option<(ArrowTip, ArrowTip)> {
    let dash = atom.find('-')?;
    let tail = match &atom[..dash] {
        "" => ArrowTip::None,
        "<" => ArrowTip::Pointer,
        "|" => ArrowTip::Flat,
        _ => return None,
    };
    let head = match &atom[dash + 1..] {
        "" => ArrowTip::None,
        ">" => ArrowTip::Pointer,
        "|" => ArrowTip::Flat,
        _ => return None,
    };
    Some((tail, head))
}
