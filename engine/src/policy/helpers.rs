//! Batch helpers over the access resolver.
//!
//! The embedding application usually evaluates one profile against a whole
//! catalogue of tools or materials at once.

use ma_common::{Decision, Profile, ProtectedResource, ResourceId};
use serde::Serialize;

use super::resolver::decide;

/// Decision for one resource in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDecision {
    pub resource_id: ResourceId,
    #[serde(flatten)]
    pub decision: Decision,
}

/// Decide every resource for a profile, keeping resource order.
#[tracing::instrument(skip_all, fields(profile_id = %profile.id, resources = resources.len()))]
pub fn decide_all(profile: &Profile, resources: &[ProtectedResource]) -> Vec<ResourceDecision> {
    let decisions: Vec<_> = resources
        .iter()
        .map(|resource| ResourceDecision {
            resource_id: resource.id.clone(),
            decision: decide(profile, resource),
        })
        .collect();

    let allowed = decisions.iter().filter(|d| d.decision.allowed).count();
    tracing::debug!(allowed, denied = decisions.len() - allowed, "batch decided");

    decisions
}

/// Resources the profile may use, in the order given.
pub fn filter_accessible<'a>(
    profile: &Profile,
    resources: &'a [ProtectedResource],
) -> Vec<&'a ProtectedResource> {
    resources
        .iter()
        .filter(|resource| decide(profile, resource).allowed)
        .collect()
}
