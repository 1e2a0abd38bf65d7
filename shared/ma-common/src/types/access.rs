//! Access Types
//!
//! Profiles, protected resources and the decisions the access engine
//! produces for them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use super::tag::{normalize, RawTag, TagSet};

/// Account role.
///
/// Deserializing never fails: any value but the string `"admin"` is a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator; may use every resource.
    Admin,
    /// Regular member.
    #[default]
    Member,
}

impl Role {
    /// Map a stored role name to a role. Anything but `"admin"` is a member.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "admin" {
            Self::Admin
        } else {
            Self::Member
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(name) => Self::from_name(&name),
            _ => Self::Member,
        })
    }
}

/// Badge level from a stored value. Anything but a string is no badge.
#[must_use]
pub fn badge_level_from_value(value: Value) -> String {
    match value {
        Value::String(level) => level,
        _ => String::new(),
    }
}

/// Resource ids from stored grant data.
///
/// Grants take every shape tags do, so they go through [`normalize`]:
/// scalars are coerced, null and empty entries dropped, and a string
/// holding an encoded list is decoded.
#[must_use]
pub fn resource_ids_from_raw(raw: &RawTag) -> BTreeSet<ResourceId> {
    normalize(raw).iter().map(ResourceId::from).collect()
}

/// Badge levels from stored data, shaped the same way as grants.
#[must_use]
pub fn badges_from_raw(raw: &RawTag) -> BTreeSet<String> {
    normalize(raw).iter().map(str::to_owned).collect()
}

fn deserialize_badge_level<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(badge_level_from_value)
}

fn deserialize_resource_ids<'de, D>(deserializer: D) -> Result<BTreeSet<ResourceId>, D::Error>
where
    D: Deserializer<'de>,
{
    RawTag::deserialize(deserializer).map(|raw| resource_ids_from_raw(&raw))
}

fn deserialize_badges<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    RawTag::deserialize(deserializer).map(|raw| badges_from_raw(&raw))
}

/// Identifier of a protected resource (tool, material bundle, paid offer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(SmolStr);

impl ResourceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(SmolStr::from(id))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalized account profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub role: Role,
    /// Account level (lowercase). Empty when the account has none.
    #[serde(alias = "badgeLevel", deserialize_with = "deserialize_badge_level")]
    pub badge_level: String,
    pub tags: TagSet,
    /// Resources explicitly granted to this account.
    #[serde(alias = "individualGrants", deserialize_with = "deserialize_resource_ids")]
    pub individual_grants: BTreeSet<ResourceId>,
}

impl Profile {
    /// A member profile with no badge, tags or grants.
    pub fn member(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// An admin profile with no badge, tags or grants.
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Admin,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_badge(mut self, level: impl Into<String>) -> Self {
        self.badge_level = level.into();
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_grant(mut self, resource: impl Into<ResourceId>) -> Self {
        self.individual_grants.insert(resource.into());
        self
    }

    #[must_use]
    pub fn has_grant(&self, resource: &ResourceId) -> bool {
        self.individual_grants.contains(resource)
    }
}

/// Anything gated behind membership: a tool, a material bundle, a paid offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResource {
    pub id: ResourceId,
    #[serde(default, alias = "allowedBadges", deserialize_with = "deserialize_badges")]
    pub allowed_badges: BTreeSet<String>,
    #[serde(default, alias = "allowedTags")]
    pub allowed_tags: TagSet,
}

impl ProtectedResource {
    /// A resource with no badge or tag requirement (individual-only).
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            allowed_badges: BTreeSet::new(),
            allowed_tags: TagSet::empty(),
        }
    }

    #[must_use]
    pub fn with_badges<I, S>(mut self, badges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_badges.extend(
            badges
                .into_iter()
                .map(Into::into)
                .filter(|b: &String| !b.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.allowed_tags = tags;
        self
    }

    /// Reachable only through an explicit grant or the admin role.
    #[must_use]
    pub fn is_individual_only(&self) -> bool {
        self.allowed_badges.is_empty() && self.allowed_tags.is_empty()
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    AllowAdmin,
    AllowBadge,
    AllowTag,
    AllowGrant,
    DenyNoMatch,
    DenyIndividualOnly,
}

impl DecisionReason {
    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(
            self,
            Self::AllowAdmin | Self::AllowBadge | Self::AllowTag | Self::AllowGrant
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowAdmin => "allow_admin",
            Self::AllowBadge => "allow_badge",
            Self::AllowTag => "allow_tag",
            Self::AllowGrant => "allow_grant",
            Self::DenyNoMatch => "deny_no_match",
            Self::DenyIndividualOnly => "deny_individual_only",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl From<DecisionReason> for Decision {
    fn from(reason: DecisionReason) -> Self {
        Self {
            allowed: reason.is_allow(),
            reason,
        }
    }
}
