//! Access decision logic.
//!
//! Decides whether a profile may use a protected resource.

use ma_common::{Decision, DecisionReason, Profile, ProtectedResource, ResourceId, Role};

/// Decide access for a profile on a resource.
///
/// Resolution order (first match wins):
/// 1. Admin role
/// 2. Badge level listed in the resource's allowed badges
/// 3. Any profile tag listed in the resource's allowed tags
/// 4. Explicit individual grant for the resource
/// 5. Deny: `DenyIndividualOnly` when the resource has no badge or tag
///    requirement, `DenyNoMatch` otherwise
///
/// The order only affects the reported reason; any matching rule allows.
pub fn decide(profile: &Profile, resource: &ProtectedResource) -> Decision {
    let reason = resolve_reason(profile, resource);

    tracing::trace!(
        profile_id = %profile.id,
        resource_id = %resource.id,
        reason = %reason,
        "access decided"
    );

    Decision::from(reason)
}

fn resolve_reason(profile: &Profile, resource: &ProtectedResource) -> DecisionReason {
    if profile.role == Role::Admin {
        return DecisionReason::AllowAdmin;
    }

    // An absent badge level never matches, even if "" slipped into the allow list.
    if !profile.badge_level.is_empty() && resource.allowed_badges.contains(&profile.badge_level) {
        return DecisionReason::AllowBadge;
    }

    if profile.tags.intersects(&resource.allowed_tags) {
        return DecisionReason::AllowTag;
    }

    if profile.has_grant(&resource.id) {
        return DecisionReason::AllowGrant;
    }

    if resource.is_individual_only() {
        DecisionReason::DenyIndividualOnly
    } else {
        DecisionReason::DenyNoMatch
    }
}

/// Denied access, for callers that prefer `?` over inspecting a [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("access to {resource_id} denied: {reason}")]
pub struct AccessDenied {
    pub resource_id: ResourceId,
    pub reason: DecisionReason,
}

/// Require access, returning the allowing reason or [`AccessDenied`].
pub fn require(
    profile: &Profile,
    resource: &ProtectedResource,
) -> Result<DecisionReason, AccessDenied> {
    let decision = decide(profile, resource);
    if decision.allowed {
        Ok(decision.reason)
    } else {
        Err(AccessDenied {
            resource_id: resource.id.clone(),
            reason: decision.reason,
        })
    }
}
