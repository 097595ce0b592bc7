use serde::{Deserialize, Serialize};
use crate::core::vip::VipSubscription;
use crate::models::domain::{Match, Profile};

/// Response for the candidate pool endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolResponse {
    pub candidates: Vec<Profile>,
    #[serde(rename = "totalAvailable")]
    pub total_available: usize,
    #[serde(rename = "likesRemaining")]
    pub likes_remaining: Option<u32>,
}

/// The candidate to show next, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextCandidateResponse {
    pub candidate: Option<Profile>,
    #[serde(rename = "likesRemaining")]
    pub likes_remaining: Option<u32>,
}

/// Response listing a viewer's matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
}

/// Current VIP state for a viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipResponse {
    #[serde(rename = "isVip")]
    pub is_vip: bool,
    pub subscription: Option<VipSubscription>,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<u32>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profiles: usize,
    pub sessions: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
