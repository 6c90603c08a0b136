pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::utils::AppError;

/// Registers the user resource routes.
///
/// Body extraction failures are answered with the same error envelope the
/// handlers use.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Rejected request body: {}", err);
        AppError::Validation(err.to_string()).into()
    }))
    .route("/user", web::post().to(users::create_user))
    .service(
        web::resource("/user/{user_id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::edit_user))
            .route(web::delete().to(users::delete_user)),
    )
    .route("/users", web::get().to(users::get_all_users));
}
