use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{VipError, VipState};
use crate::models::{DistanceRequest, ErrorResponse, SubscribeRequest, ViewerRequest, VipResponse};
use crate::routes::swipe::{validation_error, AppState};

/// Configure VIP routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/vip", web::get().to(get_vip))
        .route("/vip/subscribe", web::post().to(subscribe))
        .route("/vip/cancel", web::post().to(cancel))
        .route("/vip/distance", web::put().to(update_distance));
}

fn vip_response(vip: &VipState) -> VipResponse {
    VipResponse {
        is_vip: vip.is_entitled(),
        subscription: vip.subscription().cloned(),
        max_distance: vip.max_distance(),
    }
}

/// GET /api/v1/vip?viewerId={viewerId}
async fn get_vip(
    state: web::Data<AppState>,
    query: web::Query<ViewerRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let response = state
        .sessions
        .read_session(&query.viewer_id, |session| vip_response(session.vip()))
        .await;

    HttpResponse::Ok().json(response)
}

/// POST /api/v1/vip/subscribe
///
/// Request body:
/// ```json
/// {
///   "viewerId": "string",
///   "paymentMethod": "card|mtn-momo|paypal"
/// }
/// ```
async fn subscribe(
    state: web::Data<AppState>,
    req: web::Json<SubscribeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let now = chrono::Utc::now();
    let response = state
        .sessions
        .with_session(&req.viewer_id, |session| {
            session.vip_mut().subscribe(req.payment_method, now);
            vip_response(session.vip())
        })
        .await;

    HttpResponse::Ok().json(response)
}

/// POST /api/v1/vip/cancel
async fn cancel(
    state: web::Data<AppState>,
    req: web::Json<ViewerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let response = state
        .sessions
        .with_session(&req.viewer_id, |session| {
            session.vip_mut().cancel();
            vip_response(session.vip())
        })
        .await;

    HttpResponse::Ok().json(response)
}

/// PUT /api/v1/vip/distance
///
/// Only VIP viewers may change their radius; the value is clamped.
async fn update_distance(
    state: web::Data<AppState>,
    req: web::Json<DistanceRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let result = state
        .sessions
        .with_session(&req.viewer_id, |session| {
            session
                .vip_mut()
                .update_max_distance(req.max_distance)
                .map(|_| vip_response(session.vip()))
        })
        .await;

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e @ VipError::NotEntitled) => HttpResponse::Forbidden().json(ErrorResponse {
            error: "VIP required".to_string(),
            message: e.to_string(),
            status_code: 403,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::core::{FixedDraw, SwipeEngine};
    use crate::models::{PoolResponse, SwipePolicy, VipPolicy};
    use crate::services::{parse_directory, SessionRegistry};
    use std::sync::Arc;

    fn create_state() -> AppState {
        let directory = parse_directory(
            r#"[
                {"id": "near", "name": "Ama", "age": 26, "distanceInMiles": 3},
                {"id": "far", "name": "Kofi", "age": 31, "distanceInMiles": 40}
            ]"#,
        )
        .unwrap();
        let engine = SwipeEngine::new(SwipePolicy::default(), Box::new(FixedDraw(0.1)));

        AppState {
            sessions: Arc::new(SessionRegistry::new(Arc::new(directory), engine, VipPolicy::default())),
        }
    }

    #[actix_web::test]
    async fn test_distance_requires_subscription() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure)
                .configure(crate::routes::swipe::configure),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/vip/distance")
            .set_json(serde_json::json!({"viewerId": "v", "maxDistance": 10}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/vip/subscribe")
            .set_json(serde_json::json!({"viewerId": "v", "paymentMethod": "mtn-momo"}))
            .to_request();
        let body: VipResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_vip);
        assert_eq!(body.max_distance, Some(25));

        // Default 25 mile radius already hides "far"
        let req = test::TestRequest::get().uri("/swipe/pool?viewerId=v").to_request();
        let pool: PoolResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pool.total_available, 1);

        let req = test::TestRequest::put()
            .uri("/vip/distance")
            .set_json(serde_json::json!({"viewerId": "v", "maxDistance": 500}))
            .to_request();
        let body: VipResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.max_distance, Some(50));

        let req = test::TestRequest::get().uri("/swipe/pool?viewerId=v").to_request();
        let pool: PoolResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pool.total_available, 2);
    }

    #[actix_web::test]
    async fn test_get_vip_for_new_viewer_keeps_registry_empty() {
        let state = create_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/vip?viewerId=nobody").to_request();
        let body: VipResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!body.is_vip);
        assert_eq!(body.max_distance, Some(25));
        assert_eq!(state.sessions.session_count().await, 0);
    }

    #[actix_web::test]
    async fn test_cancel_restores_full_pool() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure)
                .configure(crate::routes::swipe::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/vip/subscribe")
            .set_json(serde_json::json!({"viewerId": "v", "paymentMethod": "card"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/vip/cancel")
            .set_json(serde_json::json!({"viewerId": "v"}))
            .to_request();
        let body: VipResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!body.is_vip);
        assert!(body.subscription.is_none());

        let req = test::TestRequest::get().uri("/swipe/pool?viewerId=v").to_request();
        let pool: PoolResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pool.total_available, 2);
    }
}
