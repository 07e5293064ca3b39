use actix_web::web;

use crate::controller;

/// Registers the guard endpoints. The caller provides `web::Data<GuardService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(controller::json_config())
        .service(controller::generate)
        .default_service(web::to(controller::not_found));
}
