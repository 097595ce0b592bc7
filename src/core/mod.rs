// Core swipe exports
pub mod draw;
pub mod engine;
pub mod pool;
pub mod quota;
pub mod session;
pub mod vip;

pub use draw::{DrawSource, FixedDraw, RngDraw, SequenceDraw};
pub use engine::SwipeEngine;
pub use pool::{candidate_pool, is_presentable, next_candidate, within_distance, DistanceFilter};
pub use quota::DailyQuota;
pub use session::{SessionSnapshot, SnapshotError, SwipeSession};
pub use vip::{PaymentMethod, VipError, VipState, VipSubscription};
