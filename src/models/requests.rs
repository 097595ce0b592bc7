use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::vip::PaymentMethod;

/// Like or pass on a single candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
}

/// Query for the next candidates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PoolQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    10
}

/// Request that only names the viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewerRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
}

/// Start a VIP subscription
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[serde(alias = "payment_method", rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

/// Change the VIP search radius
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DistanceRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[serde(alias = "max_distance", rename = "maxDistance")]
    pub max_distance: u32,
}
