use crate::models::{Profile, SwipeRecord};

/// VIP-gated distance cut-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistanceFilter {
    pub vip_entitled: bool,
    pub max_distance_miles: Option<u32>,
}

impl DistanceFilter {
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.vip_entitled && self.max_distance_miles.is_some()
    }
}

/// Check the distance cut-off
///
/// Profiles without a known distance always pass.
#[inline]
pub fn within_distance(profile: &Profile, filter: &DistanceFilter) -> bool {
    if !filter.vip_entitled {
        return true;
    }

    match (filter.max_distance_miles, profile.distance_in_miles) {
        (Some(max), Some(distance)) => distance <= f64::from(max),
        _ => true,
    }
}

/// Check whether a profile may still be offered to the viewer
#[inline]
pub fn is_presentable(
    profile: &Profile,
    record: &SwipeRecord,
    filter: &DistanceFilter,
) -> bool {
    // Already decided
    if record.contains(&profile.id) {
        return false;
    }

    within_distance(profile, filter)
}

/// Compute the candidate pool
///
/// Keeps the directory order and drops every liked, passed or matched
/// profile, then applies the distance cut-off for VIP viewers. Pure;
/// an empty pool just means the viewer has run out of candidates.
pub fn candidate_pool<'a>(
    profiles: &'a [Profile],
    record: &SwipeRecord,
    filter: &DistanceFilter,
) -> Vec<&'a Profile> {
    if filter.is_active() {
        tracing::trace!(
            "VIP distance filter active: within {:?} miles",
            filter.max_distance_miles
        );
    }

    profiles
        .iter()
        .filter(|profile| is_presentable(profile, record, filter))
        .collect()
}

/// First profile of the pool without building the whole list
pub fn next_candidate<'a>(
    profiles: &'a [Profile],
    record: &SwipeRecord,
    filter: &DistanceFilter,
) -> Option<&'a Profile> {
    profiles
        .iter()
        .find(|profile| is_presentable(profile, record, filter))
}
