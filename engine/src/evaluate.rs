//! Batch evaluation of one profile against a resource catalogue.

use ma_common::{ConfigSnapshot, ProtectedResource};
use serde::{Deserialize, Serialize};

use crate::color::{tag_badges, TagBadge};
use crate::policy::{decide_all, ResourceDecision};
use crate::records::{ProfileRecord, ResourceRecord};

/// Evaluation input: one stored profile and the resources to check.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    pub profile: ProfileRecord,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
}

/// Badge level as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub level: String,
    pub label: String,
    pub color_scheme: Option<String>,
}

/// Evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub profile_id: String,
    pub badge: Option<BadgeView>,
    pub tags: Vec<TagBadge>,
    pub decisions: Vec<ResourceDecision>,
}

/// Canonicalize the request and decide every resource.
pub fn evaluate(request: EvaluationRequest, snapshot: &ConfigSnapshot) -> EvaluationReport {
    let profile = request.profile.into_profile();
    let resources: Vec<ProtectedResource> = request
        .resources
        .into_iter()
        .map(ResourceRecord::into_resource)
        .collect();

    let badge = (!profile.badge_level.is_empty()).then(|| BadgeView {
        level: profile.badge_level.clone(),
        label: snapshot.badge_label(&profile.badge_level).to_owned(),
        color_scheme: snapshot
            .badge(&profile.badge_level)
            .map(|b| b.color_scheme.clone()),
    });

    EvaluationReport {
        badge,
        tags: tag_badges(&profile.tags, snapshot),
        decisions: decide_all(&profile, &resources),
        profile_id: profile.id,
    }
}
