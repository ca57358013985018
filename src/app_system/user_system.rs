use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::User;

/// Owns the user store actor for the lifetime of the process.
///
/// The store is created here, before any request is served, so every
/// operation always sees an initialized map.
pub struct UserSystem {
    pub user_client: UserClient,
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Starts the store actor. Must be called from within a tokio runtime.
    #[instrument(name = "user_system")]
    pub fn new(buffer_size: usize) -> Self {
        let next_user_id = || Uuid::new_v4().to_string();

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer_size, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let handle = tokio::spawn(user_actor.run());

        info!("User system started");

        Self { user_client, handle }
    }

    /// Drops the coordinator's client and waits for the actor to drain.
    ///
    /// Clones handed to HTTP workers must be gone first, otherwise this waits
    /// for them.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user system");

        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Store actor failed");
            return Err(format!("Store actor failed: {e:?}"));
        }

        info!("User system shutdown complete");
        Ok(())
    }
}
