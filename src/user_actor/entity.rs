use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;

    /// Creates a new User from validated creation parameters.
    ///
    /// # Arguments
    /// * `id` - Generated identifier for the user
    /// * `params` - Names and email; the password never reaches the store
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            user_id: id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
        })
    }

    /// Replaces the user's first and last name. Email is left as is.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        self.first_name = patch.first_name;
        self.last_name = patch.last_name;
        Ok(())
    }
}
