//! Tag badge colors.
//!
//! A tag's color is either configured on its tier or derived from a fixed
//! palette by hashing the tag. The hash is reproducible bit-for-bit so every
//! surface renders the same badge color.

pub mod palette;
pub mod resolver;

pub use palette::{hashed_color, palette_index, tag_hash, PaletteColor, PALETTE, RESERVED};
pub use resolver::{color_for, tag_badges, ResolvedColor, TagBadge};
