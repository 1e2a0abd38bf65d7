//! Display color resolution for tag badges.

use ma_common::{ConfigSnapshot, TagSet, TierConfig};
use serde::Serialize;

use super::palette::{hashed_color, PaletteColor};

/// Color chosen for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedColor<'a> {
    /// Color configured on the tag's tier.
    Configured(&'a str),
    /// Deterministic palette fallback.
    Palette(&'static PaletteColor),
}

impl<'a> ResolvedColor<'a> {
    #[must_use]
    pub const fn hex(&self) -> &'a str {
        match self {
            Self::Configured(color) => *color,
            Self::Palette(entry) => entry.hex,
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// Resolve the display color of a tag.
///
/// Resolution order:
/// 1. Color configured on the first tier whose value equals `tag` exactly
/// 2. Hashed palette entry (never the reserved white)
///
/// An empty configured color counts as not configured.
#[must_use]
pub fn color_for<'a>(tag: &str, tiers: &'a [TierConfig]) -> ResolvedColor<'a> {
    let configured = tiers
        .iter()
        .find(|tier| tier.value == tag)
        .and_then(|tier| tier.color.as_deref())
        .filter(|color| !color.is_empty());

    match configured {
        Some(color) => ResolvedColor::Configured(color),
        None => ResolvedColor::Palette(hashed_color(tag)),
    }
}

/// Everything needed to render one tag badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadge {
    pub tag: String,
    pub label: String,
    pub color: String,
}

/// Badges for a tag set, in display order.
#[must_use]
pub fn tag_badges(tags: &TagSet, snapshot: &ConfigSnapshot) -> Vec<TagBadge> {
    snapshot
        .order_tags(tags)
        .into_iter()
        .map(|tag| TagBadge {
            tag: tag.to_owned(),
            label: snapshot.tier_label(tag).to_owned(),
            color: color_for(tag, snapshot.tiers()).hex().to_owned(),
        })
        .collect()
}
