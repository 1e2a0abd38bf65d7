//! Fallback badge palette and the tag hash that indexes it.
//!
//! Every surface that renders a tag badge must land on the same palette
//! entry for the same tag, so the hash reproduces 32-bit signed wrap-around
//! over UTF-16 code units exactly.

/// A named palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub label: &'static str,
    pub hex: &'static str,
}

/// Fixed palette. Order is significant: the hash indexes into it.
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor {
        label: "Stabilo Yellow",
        hex: "#EFFF00",
    },
    PaletteColor {
        label: "Neon Green",
        hex: "#A3FF12",
    },
    PaletteColor {
        label: "Electric Cyan",
        hex: "#0FFFFF",
    },
    PaletteColor {
        label: "Hot Pink",
        hex: "#FF00FF",
    },
    PaletteColor {
        label: "Vibrant Orange",
        hex: "#FFAC1C",
    },
    PaletteColor {
        label: "Atomic Purple",
        hex: "#BF00FF",
    },
    PaletteColor {
        label: "Laser Red",
        hex: "#FF003C",
    },
    PaletteColor {
        label: "Pure White",
        hex: "#ffffff",
    },
];

/// Last palette entry. Only reachable through explicit configuration.
pub const RESERVED: PaletteColor = PALETTE[PALETTE.len() - 1];

/// Number of entries the hash may select.
const HASHABLE: u32 = (PALETTE.len() - 1) as u32;

/// Hash a tag for palette selection.
///
/// The tag is trimmed and lowercased, then folded as
/// `hash = unit + ((hash << 5) - hash)` over its UTF-16 code units with
/// 32-bit signed wrap-around.
#[must_use]
pub fn tag_hash(tag: &str) -> i32 {
    tag.trim()
        .to_lowercase()
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
        })
}

/// Palette index for a hash: `abs(hash) mod (palette size - 1)`.
#[must_use]
pub const fn palette_index(hash: i32) -> usize {
    (hash.unsigned_abs() % HASHABLE) as usize
}

/// Palette entry the hash selects for a tag. Never [`RESERVED`].
#[must_use]
pub fn hashed_color(tag: &str) -> &'static PaletteColor {
    &PALETTE[palette_index(tag_hash(tag))]
}
