//! RGBA color plus the named xcolor palette that style files speak in.
//!
//! Style properties store colors by name; resolution maps names to RGBA for
//! rendering and back to the nearest table entry for emission.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Look up a named color. Names are the xcolor base set; lookup is
    /// case-sensitive, matching what a TeX run would accept.
    pub fn from_name(name: &str) -> Option<Color> {
        NAMED.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    }

    /// Reverse lookup: the palette name of this exact color, if it has one.
    pub fn name(self) -> Option<&'static str> {
        NAMED.iter().find(|(_, c)| *c == self).map(|(n, _)| *n)
    }

    /// Palette entry by position, in the order a color picker lays them out
    /// (grayscale, rainbow, earth/teal spectrum, pinks).
    pub fn by_index(i: usize) -> Option<Color> {
        NAMED.get(i).map(|(_, c)| *c)
    }

    pub fn palette_len() -> usize {
        NAMED.len()
    }
}

// Palette order is display order: columns of the standard-color grid.
const NAMED: &[(&str, Color)] = &[
    // grayscale
    ("black", Color::rgb(0, 0, 0)),
    ("darkgray", Color::rgb(64, 64, 64)),
    ("gray", Color::rgb(128, 128, 128)),
    ("lightgray", Color::rgb(191, 191, 191)),
    ("white", Color::rgb(255, 255, 255)),
    // rainbow
    ("red", Color::rgb(255, 0, 0)),
    ("orange", Color::rgb(255, 128, 0)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("lime", Color::rgb(191, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("purple", Color::rgb(191, 0, 64)),
    // brown/green/teal spectrum
    ("brown", Color::rgb(191, 128, 64)),
    ("olive", Color::rgb(128, 128, 0)),
    ("green", Color::rgb(0, 255, 0)),
    ("teal", Color::rgb(0, 128, 128)),
    ("cyan", Color::rgb(0, 255, 255)),
    // pinks
    ("magenta", Color::rgb(255, 0, 255)),
    ("pink", Color::rgb(255, 191, 191)),
    ("violet", Color::rgb(128, 0, 128)),
];
