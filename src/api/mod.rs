//! HTTP endpoints for the user resource.
//!
//! # Endpoints
//!
//! * `GET /users` - All users (`page`, `limit`, `sort` accepted, not applied)
//! * `GET /users/{userId}` - One user, `204` when absent
//! * `POST /users` - Create a user, `201`
//! * `PUT /users/{userId}` - Rename a user, `404` when absent
//! * `DELETE /users/{userId}` - Remove a user, always `204`
//!
//! # Example
//!
//! ```rust,ignore
//! let app = App::new()
//!     .app_data(web::Data::new(user_client))
//!     .service(api::bind_services(web::scope("/users")));
//! ```

pub mod error;
pub mod format;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    route, web, HttpRequest, HttpResponse, Scope,
};
use tracing::{debug, info, instrument};

use crate::clients::UserClient;
use crate::domain::UserListQuery;
use crate::validation::{CreateUserRequest, UpdateUserRequest};

use self::error::{ApiError, ApiErrorKind, InFormat};
use self::format::{decode_body, Format};

/// Binds the user endpoints to `scope`. The scope's app data must hold a
/// `web::Data<UserClient>`.
#[must_use]
pub fn bind_services<
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
>(
    scope: Scope<T>,
) -> Scope<T> {
    scope
        .app_data(web::QueryConfig::default().error_handler(|err, req| {
            let format = Format::negotiate(req).unwrap_or(Format::Json);
            ApiError::new(ApiErrorKind::MalformedQuery(err.to_string()), format).into()
        }))
        .service(list_users_endpoint)
        .service(create_user_endpoint)
        .service(get_user_endpoint)
        .service(update_user_endpoint)
        .service(delete_user_endpoint)
}

#[route("", method = "GET")]
#[instrument(skip(req, client))]
pub async fn list_users_endpoint(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
    client: web::Data<UserClient>,
) -> Result<HttpResponse, ApiError> {
    let format = Format::negotiate(&req)?;
    let users = client.list_users(query.into_inner()).await.in_format(format)?;
    debug!(user_count = users.len(), "Listed users");

    Ok(format.respond(HttpResponse::Ok(), &users))
}

#[route("/{user_id}", method = "GET")]
#[instrument(skip(req, client))]
pub async fn get_user_endpoint(
    req: HttpRequest,
    user_id: web::Path<String>,
    client: web::Data<UserClient>,
) -> Result<HttpResponse, ApiError> {
    let format = Format::negotiate(&req)?;

    match client.get_user(user_id.into_inner()).await.in_format(format)? {
        Some(user) => Ok(format.respond(HttpResponse::Ok(), &user)),
        None => {
            debug!("User not found");
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

#[route("", method = "POST")]
#[instrument(skip(req, body, client))]
pub async fn create_user_endpoint(
    req: HttpRequest,
    body: web::Bytes,
    client: web::Data<UserClient>,
) -> Result<HttpResponse, ApiError> {
    let format = Format::negotiate(&req)?;
    let request: CreateUserRequest = decode_body(&req, &body).in_format(format)?;

    let user = client.create_user(request).await.in_format(format)?;
    info!(user_id = %user.user_id, "Created user");

    Ok(format.respond(HttpResponse::Created(), &user))
}

#[route("/{user_id}", method = "PUT")]
#[instrument(skip(req, body, client))]
pub async fn update_user_endpoint(
    req: HttpRequest,
    user_id: web::Path<String>,
    body: web::Bytes,
    client: web::Data<UserClient>,
) -> Result<HttpResponse, ApiError> {
    let format = Format::negotiate(&req)?;
    let request: UpdateUserRequest = decode_body(&req, &body).in_format(format)?;

    let user = client.update_user(user_id.into_inner(), request).await.in_format(format)?;
    info!("Updated user");

    Ok(format.respond(HttpResponse::Ok(), &user))
}

#[route("/{user_id}", method = "DELETE")]
#[instrument(skip(client))]
pub async fn delete_user_endpoint(
    user_id: web::Path<String>,
    client: web::Data<UserClient>,
) -> Result<HttpResponse, ApiError> {
    let removed = client.delete_user(user_id.into_inner()).await.in_format(Format::Json)?;
    debug!(removed, "Handled delete");

    Ok(HttpResponse::NoContent().finish())
}
