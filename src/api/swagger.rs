use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD endpoints for user records stored in MongoDB. \n\nEvery user endpoint replies with the envelope `{status, message, data}`, where `message` is `success` or `error`."
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::edit_user,
        crate::api::users::delete_user,
        crate::api::users::get_all_users,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserInput,
            crate::models::UserView,
            crate::models::InsertedId,
            crate::models::ResponseData,
            crate::models::Outcome,
            crate::models::Envelope,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete user records."),
        (name = "Health", description = "Health check and request metrics for monitoring service status."),
    )
)]
pub struct ApiDoc;
