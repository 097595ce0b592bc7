// Model exports
pub mod directory;
pub mod domain;
pub mod policy;
pub mod requests;
pub mod responses;

pub use directory::{DuplicateProfileId, ProfileDirectory};
pub use domain::{ChatMessage, ChatThread, Decision, Match, Profile, SwipeEvent, SwipeOutcome, SwipeRecord, SwipeReport};
pub use policy::{PolicyError, SwipePolicy, VipPolicy};
pub use requests::{DistanceRequest, PoolQuery, SubscribeRequest, SwipeRequest, ViewerRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, NextCandidateResponse, PoolResponse, VipResponse};
