use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, MatchesResponse, NextCandidateResponse, PoolQuery, PoolResponse, SwipeEvent,
    SwipeRequest, ViewerRequest,
};
use crate::services::SessionRegistry;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
}

/// Configure all swipe-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/swipe/pool", web::get().to(get_pool))
        .route("/swipe/next", web::get().to(get_next))
        .route("/swipe/like", web::post().to(like))
        .route("/swipe/pass", web::post().to(pass))
        .route("/swipe/matches", web::get().to(get_matches));
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles: state.sessions.directory().len(),
        sessions: state.sessions.session_count().await,
        timestamp: chrono::Utc::now(),
    })
}

/// Candidate pool endpoint
///
/// GET /api/v1/swipe/pool?viewerId={viewerId}&limit={limit}
async fn get_pool(
    state: web::Data<AppState>,
    query: web::Query<PoolQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    // Cap limit at 100
    let limit = query.limit.min(100) as usize;
    let (candidates, total_available, likes_remaining) =
        state.sessions.pool(&query.viewer_id, limit).await;

    tracing::debug!(
        "Serving {} of {} candidates to {}",
        candidates.len(),
        total_available,
        query.viewer_id
    );

    HttpResponse::Ok().json(PoolResponse {
        candidates,
        total_available,
        likes_remaining,
    })
}

/// Next candidate endpoint
///
/// GET /api/v1/swipe/next?viewerId={viewerId}
///
/// `candidate` is null once the pool is exhausted.
async fn get_next(
    state: web::Data<AppState>,
    query: web::Query<ViewerRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let (candidate, likes_remaining) = state.sessions.next_candidate(&query.viewer_id).await;

    HttpResponse::Ok().json(NextCandidateResponse {
        candidate,
        likes_remaining,
    })
}

/// Like endpoint
///
/// POST /api/v1/swipe/like
///
/// Request body:
/// ```json
/// {
///   "viewerId": "string",
///   "candidateId": "string"
/// }
/// ```
///
/// A declined like is still a 200; the `outcome` field says what happened.
async fn like(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    swipe(state, req.into_inner(), SwipeEvent::Like).await
}

/// Pass endpoint
///
/// POST /api/v1/swipe/pass
async fn pass(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    swipe(state, req.into_inner(), SwipeEvent::Pass).await
}

async fn swipe(
    state: web::Data<AppState>,
    req: SwipeRequest,
    event: fn(String) -> SwipeEvent,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let report = state
        .sessions
        .swipe(&req.viewer_id, event(req.candidate_id))
        .await;

    HttpResponse::Ok().json(report)
}

/// Matches endpoint
///
/// GET /api/v1/swipe/matches?viewerId={viewerId}
async fn get_matches(
    state: web::Data<AppState>,
    query: web::Query<ViewerRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let matches = state.sessions.matches(&query.viewer_id).await;
    HttpResponse::Ok().json(MatchesResponse { matches })
}
