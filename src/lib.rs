//! Meet Swipe - swipe decision engine for the Meet dating app
//!
//! This library decides what a viewer sees next and what each swipe does:
//! the candidate pool, the daily like quota, match draws and the VIP
//! distance filter. Rendering, chat delivery and storage stay with the host.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{candidate_pool, DrawSource, SessionSnapshot, SwipeEngine, SwipeSession};
pub use models::{Match, Profile, ProfileDirectory, SwipeEvent, SwipeOutcome, SwipePolicy, SwipeRecord, VipPolicy};
