use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserListQuery};
use crate::user_actor::UserError;
use crate::validation::{CreateUserRequest, UpdateUserRequest};

/// Client for interacting with the user store actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Validates the request, then stores a new user under a fresh id.
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserError> {
        debug!("Sending request");
        let params = request.validate()?;
        let user = self.inner.create(params).await?;
        info!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    /// Replaces the names of an existing user. An unknown id is reported as
    /// not found before the request body is looked at.
    #[instrument(skip(self, request))]
    pub async fn update_user(&self, id: String, request: UpdateUserRequest) -> Result<User, UserError> {
        debug!("Sending request");
        if self.inner.get(id.clone()).await?.is_none() {
            debug!("User not found for update");
            return Err(UserError::NotFound(id));
        }
        let patch = request.validate()?;
        let user = self.inner.update(id, patch).await?;
        info!("User updated");
        Ok(user)
    }

    /// Every stored user. Paging and sort values are not applied.
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }
}
