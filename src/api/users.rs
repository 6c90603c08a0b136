use actix_web::{http::StatusCode, web, HttpResponse};
use std::future::Future;
use std::time::Duration;

use crate::{
    database::UserStore,
    models::{parse_user_id, Envelope, InsertedId, ResponseData, User, UserInput, UserView},
    utils::AppError,
};

/// Deadline shared by all store calls of one request.
#[derive(Debug, Clone, Copy)]
pub struct StoreTimeout(pub Duration);

impl Default for StoreTimeout {
    fn default() -> Self {
        StoreTimeout(Duration::from_secs(10))
    }
}

/// Runs `fut` under the request deadline; expiry is reported as a store failure.
pub async fn with_deadline<T, F>(limit: StoreTimeout, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit.0, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Database(format!("operation timed out after {:?}", limit.0))),
    }
}

fn no_documents() -> AppError {
    AppError::Database("no documents in result".to_string())
}

fn validated(body: web::Json<UserInput>) -> Result<UserInput, AppError> {
    let input = body.into_inner();
    input.validate().map_err(|e| {
        log::warn!("⚠️  Rejected user payload: {}", e);
        AppError::Validation(e)
    })?;
    Ok(input)
}

/// POST /user - Creates a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created; data carries the inserted id", body = Envelope),
        (status = 400, description = "Malformed body or missing field", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    timeout: web::Data<StoreTimeout>,
    body: web::Json<UserInput>,
) -> Result<HttpResponse, AppError> {
    let input = validated(body)?;
    let user = User::create(input);

    log::info!("📝 POST /user - Creating user {}", user.id);

    let inserted = with_deadline(**timeout, store.insert_one(&user))
        .await
        .inspect_err(|e| log::error!("❌ Error creating user: {}", e))?;

    Ok(Envelope::success(
        StatusCode::CREATED,
        ResponseData::Inserted(InsertedId { inserted_id: inserted.to_hex() }),
    )
    .into_response())
}

/// GET /user/{user_id} - Fetches one user
///
/// A missing user is reported as a store error (500), not 404.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "The user", body = Envelope),
        (status = 500, description = "Lookup failed or found nothing", body = Envelope)
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    timeout: web::Data<StoreTimeout>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /user/{}", user_id);

    let id = parse_user_id(&user_id);
    let user = with_deadline(**timeout, async {
        store.find_one(id).await?.ok_or_else(no_documents)
    })
    .await
    .inspect_err(|e| log::error!("❌ Error fetching user {}: {}", user_id, e))?;

    Ok(Envelope::success(StatusCode::OK, ResponseData::User { user: UserView::from(user) }).into_response())
}

/// PUT /user/{user_id} - Replaces name, location and title
///
/// When nothing matches, the reply still succeeds and carries an empty user.
#[utoipa::path(
    put,
    path = "/user/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Hex ObjectId of the user")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Updated user, or an empty user when none matched", body = Envelope),
        (status = 400, description = "Malformed body or missing field", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn edit_user(
    store: web::Data<dyn UserStore>,
    timeout: web::Data<StoreTimeout>,
    user_id: web::Path<String>,
    body: web::Json<UserInput>,
) -> Result<HttpResponse, AppError> {
    let input = validated(body)?;
    let id = parse_user_id(&user_id);

    log::info!("🔧 PUT /user/{} - Updating user", user_id);

    let user = with_deadline(**timeout, async {
        let matched = store.update_one(id, &input).await?;
        if matched == 1 {
            store.find_one(id).await?.ok_or_else(no_documents)
        } else {
            Ok(User::empty())
        }
    })
    .await
    .inspect_err(|e| log::error!("❌ Error updating user {}: {}", user_id, e))?;

    Ok(Envelope::success(StatusCode::OK, ResponseData::User { user: UserView::from(user) }).into_response())
}

/// DELETE /user/{user_id} - Removes a user
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "User deleted", body = Envelope),
        (status = 404, description = "No user with that id", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    timeout: web::Data<StoreTimeout>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /user/{}", user_id);

    let id = parse_user_id(&user_id);
    let deleted = with_deadline(**timeout, store.delete_one(id))
        .await
        .inspect_err(|e| log::error!("❌ Error deleting user {}: {}", user_id, e))?;

    if deleted < 1 {
        log::warn!("⚠️  User {} not found", user_id);
        return Err(AppError::NotFound("User with specified ID not found!".to_string()));
    }

    Ok(Envelope::success(
        StatusCode::OK,
        ResponseData::Confirmation("User successfully deleted!".to_string()),
    )
    .into_response())
}

/// GET /users - Lists every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users in store order", body = Envelope),
        (status = 500, description = "Scan failed or a record could not be decoded", body = Envelope)
    )
)]
pub async fn get_all_users(
    store: web::Data<dyn UserStore>,
    timeout: web::Data<StoreTimeout>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");

    let users = with_deadline(**timeout, store.find_all())
        .await
        .inspect_err(|e| log::error!("❌ Error listing users: {}", e))?;

    log::info!("✅ Listed {} users", users.len());

    Ok(Envelope::success(
        StatusCode::OK,
        ResponseData::Users { users: users.into_iter().map(UserView::from).collect() },
    )
    .into_response())
}
