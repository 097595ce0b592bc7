use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::pool::DistanceFilter;
use crate::models::VipPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VipError {
    #[error("Distance control requires an active VIP subscription")]
    NotEntitled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Card,
    MtnMomo,
    Paypal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipSubscription {
    #[serde(rename = "subscribedAt")]
    pub subscribed_at: DateTime<Utc>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

/// VIP entitlement and the search radius it unlocks
#[derive(Debug, Clone)]
pub struct VipState {
    policy: VipPolicy,
    subscription: Option<VipSubscription>,
    max_distance: Option<u32>,
}

impl VipState {
    pub fn new(policy: VipPolicy) -> Self {
        let max_distance = policy.default_max_distance;
        Self {
            policy,
            subscription: None,
            max_distance,
        }
    }

    /// Rebuild from stored values. Distances are re-clamped against the
    /// current policy.
    pub fn restore(
        policy: VipPolicy,
        subscription: Option<VipSubscription>,
        max_distance: Option<u32>,
    ) -> Self {
        let max_distance = max_distance.map(|d| policy.clamp_distance(d));
        Self {
            policy,
            subscription,
            max_distance,
        }
    }

    pub fn is_entitled(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<&VipSubscription> {
        self.subscription.as_ref()
    }

    pub fn max_distance(&self) -> Option<u32> {
        self.max_distance
    }

    pub fn distance_filter(&self) -> DistanceFilter {
        DistanceFilter {
            vip_entitled: self.is_entitled(),
            max_distance_miles: self.max_distance,
        }
    }

    pub fn subscribe(&mut self, payment_method: PaymentMethod, now: DateTime<Utc>) -> &VipSubscription {
        let expires_at = now
            .checked_add_months(Months::new(self.policy.subscription_months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::info!(
            "VIP subscription started via {:?}, expires {}",
            payment_method,
            expires_at
        );

        self.subscription.insert(VipSubscription {
            subscribed_at: now,
            expires_at,
            payment_method,
        })
    }

    /// Drop entitlement and go back to the default radius
    pub fn cancel(&mut self) {
        if self.subscription.take().is_some() {
            tracing::info!("VIP subscription cancelled");
        }
        self.max_distance = self.policy.default_max_distance;
    }

    /// Expire a lapsed subscription. Returns `true` if it expired now.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        match &self.subscription {
            Some(sub) if sub.expires_at < now => {
                tracing::info!("VIP subscription expired at {}", sub.expires_at);
                self.subscription = None;
                true
            }
            _ => false,
        }
    }

    pub fn update_max_distance(&mut self, miles: u32) -> Result<u32, VipError> {
        if !self.is_entitled() {
            tracing::debug!("Rejected distance change to {} without VIP", miles);
            return Err(VipError::NotEntitled);
        }

        let clamped = self.policy.clamp_distance(miles);
        self.max_distance = Some(clamped);
        Ok(clamped)
    }
}
