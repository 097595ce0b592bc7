// Route exports
pub mod swipe;
pub mod vip;

use actix_web::web;

pub use swipe::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(swipe::configure)
            .configure(vip::configure),
    );
}
