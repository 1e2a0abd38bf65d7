//! Stored Records
//!
//! Profile and resource records as the embedding application fetches them.
//! Field shapes are loose: tags, grants and badge lists may come in any
//! stored encoding, and any field but `id` may be missing or of the wrong
//! type. Conversion into the engine's types never fails; unusable data
//! turns into empty sets so that nothing matches by accident.

use ma_common::{
    badge_level_from_value, badges_from_raw, normalize, resource_ids_from_raw, Profile,
    ProtectedResource, RawTag, Role,
};
use serde::Deserialize;
use serde_json::Value;

/// Account record as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "badgeLevel")]
    pub badge_level: Value,
    #[serde(default)]
    pub tags: RawTag,
    #[serde(default, alias = "individualGrants")]
    pub individual_grants: RawTag,
}

impl ProfileRecord {
    /// Canonicalize into a [`Profile`].
    pub fn into_profile(self) -> Profile {
        Profile {
            role: self.role,
            badge_level: badge_level_from_value(self.badge_level),
            tags: normalize(&self.tags),
            individual_grants: resource_ids_from_raw(&self.individual_grants),
            id: self.id,
        }
    }
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        record.into_profile()
    }
}

/// Tool, material or offer record as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    #[serde(default, alias = "allowedBadges")]
    pub allowed_badges: RawTag,
    #[serde(default, alias = "allowedTags")]
    pub allowed_tags: RawTag,
}

impl ResourceRecord {
    /// Canonicalize into a [`ProtectedResource`].
    pub fn into_resource(self) -> ProtectedResource {
        ProtectedResource::new(self.id)
            .with_badges(badges_from_raw(&self.allowed_badges))
            .with_tags(normalize(&self.allowed_tags))
    }
}

impl From<ResourceRecord> for ProtectedResource {
    fn from(record: ResourceRecord) -> Self {
        record.into_resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ma_common::{DecisionReason, ResourceId};
    use serde_json::json;

    use crate::policy::decide;

    #[test]
    fn test_profile_record_camel_case() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "id": "u1",
            "role": "member",
            "badgeLevel": "elite",
            "tags": ["[\"elite\",\"sultan\"]", "free"],
            "individualGrants": ["tool-1", "tool-1", ""]
        }))
        .unwrap();

        let profile = record.into_profile();
        assert_eq!(profile.role, Role::Member);
        assert_eq!(profile.badge_level, "elite");
        assert_eq!(profile.tags.to_vec(), vec!["elite", "sultan", "free"]);
        assert_eq!(profile.individual_grants.len(), 1);
        assert!(profile.has_grant(&ResourceId::from("tool-1")));
    }

    #[test]
    fn test_profile_record_missing_fields_fail_closed() {
        let record: ProfileRecord = serde_json::from_value(json!({"id": "u1"})).unwrap();
        let profile = record.into_profile();

        assert_eq!(profile.role, Role::Member);
        assert!(profile.badge_level.is_empty());
        assert!(profile.tags.is_empty());
        assert!(profile.individual_grants.is_empty());
    }

    #[test]
    fn test_profile_record_null_fields() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "id": "u1",
            "role": null,
            "badge_level": null,
            "tags": null,
            "individual_grants": null
        }))
        .unwrap();

        let profile = Profile::from(record);
        assert_eq!(profile.role, Role::Member);
        assert!(profile.tags.is_empty());
    }

    #[test]
    fn test_unknown_role_is_member() {
        let record: ProfileRecord =
            serde_json::from_value(json!({"id": "u1", "role": "superuser"})).unwrap();
        assert_eq!(record.into_profile().role, Role::Member);
    }

    fn parse_profile(value: Value) -> Profile {
        serde_json::from_value::<ProfileRecord>(value)
            .unwrap()
            .into_profile()
    }

    #[test]
    fn test_non_string_role_is_member() {
        for role in [json!(7.5), json!(true), json!({"name": "admin"}), json!(["admin"])] {
            let profile = parse_profile(json!({"id": "u1", "role": role.clone()}));
            assert_eq!(profile.role, Role::Member, "role {role}");
        }

        let admin = parse_profile(json!({"id": "u1", "role": "admin"}));
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_non_string_badge_level_is_no_badge() {
        let profile = parse_profile(json!({"id": "u1", "badgeLevel": ["pro"]}));
        assert!(profile.badge_level.is_empty());
    }

    #[test]
    fn test_grants_accept_loose_shapes() {
        let t1 = ResourceId::from("t1");

        let profile = parse_profile(json!({"id": "u1", "individualGrants": "t1"}));
        assert!(profile.has_grant(&t1));

        let profile = parse_profile(json!({"id": "u1", "individualGrants": [null, "t1", ""]}));
        assert_eq!(profile.individual_grants.len(), 1);
        assert!(profile.has_grant(&t1));

        let profile = parse_profile(json!({"id": "u1", "individualGrants": "[\"t1\",\"t2\"]"}));
        assert_eq!(profile.individual_grants.len(), 2);
        assert!(profile.has_grant(&t1));

        let profile = parse_profile(json!({"id": "u1", "individualGrants": [1, 2]}));
        assert!(profile.has_grant(&ResourceId::from("1")));
        assert!(profile.has_grant(&ResourceId::from("2")));
    }

    #[test]
    fn test_resource_record_loose_badges() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": "tool-1",
            "allowedBadges": [null, "pro", 3],
            "allowedTags": 0
        }))
        .unwrap();

        let resource = record.into_resource();
        assert_eq!(resource.allowed_badges.len(), 2);
        assert!(resource.allowed_badges.contains("pro"));
        assert!(resource.allowed_badges.contains("3"));
        assert!(resource.allowed_tags.is_empty());
    }

    #[test]
    fn test_resource_record_normalizes_allowed_tags() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": "tool-1",
            "allowedBadges": ["pro", "", "pro"],
            "allowedTags": "[\"premium\",\"elite\"]"
        }))
        .unwrap();

        let resource = record.into_resource();
        assert_eq!(resource.allowed_badges.len(), 1);
        assert_eq!(resource.allowed_tags.to_vec(), vec!["premium", "elite"]);
    }

    #[test]
    fn test_resource_record_missing_requirements_is_individual_only() {
        let record: ResourceRecord = serde_json::from_value(json!({"id": "tool-1"})).unwrap();
        let resource = ProtectedResource::from(record);

        assert!(resource.is_individual_only());

        let profile = ProfileRecord {
            id: "u1".into(),
            tags: RawTag::from("free"),
            ..ProfileRecord::default()
        }
        .into_profile();
        assert_eq!(
            decide(&profile, &resource).reason,
            DecisionReason::DenyIndividualOnly
        );
    }
}
