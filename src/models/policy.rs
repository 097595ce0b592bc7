use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

/// Rejected policy values
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Invalid policy: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Swipe policy knobs
///
/// The defaults reproduce the product's current behaviour: 20 likes a
/// day, a coin-flip match, compatibility in `[80, 95)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_compatibility_range"))]
pub struct SwipePolicy {
    #[serde(default = "default_daily_like_limit")]
    pub daily_like_limit: u32,
    #[serde(default = "default_true")]
    pub enforce_daily_limit: bool,
    #[serde(default = "default_match_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub match_probability: f64,
    #[serde(default = "default_compatibility_min")]
    pub compatibility_min: u8,
    /// Exclusive upper bound
    #[serde(default = "default_compatibility_max")]
    #[validate(range(max = 101))]
    pub compatibility_max: u8,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SwipePolicy {
    fn default() -> Self {
        Self {
            daily_like_limit: default_daily_like_limit(),
            enforce_daily_limit: true,
            match_probability: default_match_probability(),
            compatibility_min: default_compatibility_min(),
            compatibility_max: default_compatibility_max(),
            rng_seed: None,
        }
    }
}

impl SwipePolicy {
    pub fn validated(self) -> Result<Self, PolicyError> {
        self.validate()?;
        Ok(self)
    }
}

fn validate_compatibility_range(policy: &SwipePolicy) -> Result<(), ValidationError> {
    if policy.compatibility_min >= policy.compatibility_max {
        return Err(ValidationError::new("compatibility_range"));
    }
    Ok(())
}

fn default_daily_like_limit() -> u32 { 20 }
fn default_true() -> bool { true }
fn default_match_probability() -> f64 { 0.5 }
fn default_compatibility_min() -> u8 { 80 }
fn default_compatibility_max() -> u8 { 95 }

/// VIP distance and subscription settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_default_distance"))]
pub struct VipPolicy {
    #[serde(default = "default_max_distance")]
    pub default_max_distance: Option<u32>,
    #[serde(default = "default_max_distance_cap")]
    #[validate(range(min = 1))]
    pub max_distance_cap: u32,
    #[serde(default = "default_subscription_months")]
    #[validate(range(min = 1, max = 120))]
    pub subscription_months: u32,
}

impl Default for VipPolicy {
    fn default() -> Self {
        Self {
            default_max_distance: default_max_distance(),
            max_distance_cap: default_max_distance_cap(),
            subscription_months: default_subscription_months(),
        }
    }
}

impl VipPolicy {
    pub fn validated(self) -> Result<Self, PolicyError> {
        self.validate()?;
        Ok(self)
    }

    /// Clamp a requested radius into `[1, max_distance_cap]`
    #[inline]
    pub fn clamp_distance(&self, miles: u32) -> u32 {
        miles.clamp(1, self.max_distance_cap.max(1))
    }
}

fn validate_default_distance(policy: &VipPolicy) -> Result<(), ValidationError> {
    match policy.default_max_distance {
        Some(d) if d == 0 || d > policy.max_distance_cap => {
            Err(ValidationError::new("default_max_distance"))
        }
        _ => Ok(()),
    }
}

fn default_max_distance() -> Option<u32> { Some(25) }
fn default_max_distance_cap() -> u32 { 50 }
fn default_subscription_months() -> u32 { 1 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_swipe_policy() {
        let policy = SwipePolicy::default();
        assert_eq!(policy.daily_like_limit, 20);
        assert!(policy.enforce_daily_limit);
        assert_eq!(policy.match_probability, 0.5);
        assert_eq!(policy.compatibility_min, 80);
        assert_eq!(policy.compatibility_max, 95);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_inverted_compatibility_range_rejected() {
        let policy = SwipePolicy {
            compatibility_min: 95,
            compatibility_max: 80,
            ..SwipePolicy::default()
        };
        assert!(policy.validated().is_err());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let policy = SwipePolicy {
            match_probability: 1.5,
            ..SwipePolicy::default()
        };
        assert!(policy.validated().is_err());
    }

    #[test]
    fn test_vip_default_above_cap_rejected() {
        let policy = VipPolicy {
            default_max_distance: Some(80),
            ..VipPolicy::default()
        };
        assert!(policy.validated().is_err());
    }

    #[test]
    fn test_clamp_distance() {
        let policy = VipPolicy::default();
        assert_eq!(policy.clamp_distance(0), 1);
        assert_eq!(policy.clamp_distance(30), 30);
        assert_eq!(policy.clamp_distance(500), 50);
    }
}
