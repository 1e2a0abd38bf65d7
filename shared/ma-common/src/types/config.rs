//! Tier and Badge Configuration
//!
//! Configuration records are owned by the embedding application and handed
//! to the engine as an immutable [`ConfigSnapshot`] per evaluation batch.

use serde::{Deserialize, Serialize};

use super::tag::TagSet;
use crate::error::Result;

/// A configured membership tier ("Free", "PRO", "Elite", "Sultan").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Tag value this tier describes.
    pub value: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Fixed display color, if one was configured.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: i32,
}

/// A configured account level (member/pro/elite/sultan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Badge level value as stored on profiles.
    pub value: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Named color scheme used when rendering the badge.
    #[serde(default, alias = "colorScheme")]
    pub color_scheme: String,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: i32,
}

#[derive(Deserialize)]
struct SnapshotParts {
    #[serde(default)]
    tiers: Vec<TierConfig>,
    #[serde(default)]
    badges: Vec<BadgeConfig>,
}

impl From<SnapshotParts> for ConfigSnapshot {
    fn from(parts: SnapshotParts) -> Self {
        Self::new(parts.tiers, parts.badges)
    }
}

/// Ordered, read-only view of tier and badge configuration.
///
/// Both lists are kept sorted by `sort_order`; records sharing a sort order
/// keep the order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SnapshotParts")]
pub struct ConfigSnapshot {
    tiers: Vec<TierConfig>,
    badges: Vec<BadgeConfig>,
}

impl ConfigSnapshot {
    #[must_use]
    pub fn new(mut tiers: Vec<TierConfig>, mut badges: Vec<BadgeConfig>) -> Self {
        tiers.sort_by_key(|t| t.sort_order);
        badges.sort_by_key(|b| b.sort_order);
        Self { tiers, badges }
    }

    /// Parse a snapshot from its JSON form (`{"tiers": [...], "badges": [...]}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn tiers(&self) -> &[TierConfig] {
        &self.tiers
    }

    #[must_use]
    pub fn badges(&self) -> &[BadgeConfig] {
        &self.badges
    }

    /// First tier whose value matches `tag` exactly.
    #[must_use]
    pub fn tier(&self, tag: &str) -> Option<&TierConfig> {
        self.tiers.iter().find(|t| t.value == tag)
    }

    /// First badge whose value matches `level` exactly.
    #[must_use]
    pub fn badge(&self, level: &str) -> Option<&BadgeConfig> {
        self.badges.iter().find(|b| b.value == level)
    }

    /// Configured label for a tag, or the tag itself.
    #[must_use]
    pub fn tier_label<'a>(&'a self, tag: &'a str) -> &'a str {
        match self.tier(tag) {
            Some(tier) if !tier.label.is_empty() => &tier.label,
            _ => tag,
        }
    }

    /// Configured label for a badge level, or the level itself.
    #[must_use]
    pub fn badge_label<'a>(&'a self, level: &'a str) -> &'a str {
        match self.badge(level) {
            Some(badge) if !badge.label.is_empty() => &badge.label,
            _ => level,
        }
    }

    /// Display order for a tag set: configured tiers first (by sort order),
    /// then unconfigured tags in canonical order.
    #[must_use]
    pub fn order_tags<'a>(&self, tags: &'a TagSet) -> Vec<&'a str> {
        let mut configured = Vec::new();
        let mut unconfigured = Vec::new();

        for tag in tags.iter() {
            match self.tiers.iter().position(|t| t.value == tag) {
                Some(rank) => configured.push((rank, tag)),
                None => unconfigured.push(tag),
            }
        }

        configured.sort_by_key(|(rank, _)| *rank);
        configured
            .into_iter()
            .map(|(_, tag)| tag)
            .chain(unconfigured)
            .collect()
    }
}
