//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_update`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// Creates a mock client and a receiver for asserting requests.
///
/// The receiver stands in for a `ResourceActor`: tests read the requests the
/// client sends and answer them by hand.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UserClient;
    use crate::domain::User;
    use crate::user_actor::UserError;
    use crate::validation::{CreateUserRequest, UpdateUserRequest};

    fn existing(id: &str) -> User {
        User {
            user_id: id.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_create_user_sends_validated_params() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let create_task = tokio::spawn(async move {
            client
                .create_user(CreateUserRequest {
                    first_name: Some("Test".into()),
                    last_name: Some("User".into()),
                    email: Some("test@example.com".into()),
                    password: Some("hunter222".into()),
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.first_name, "Test");
        assert_eq!(params.email, "test@example.com");
        let stored = User {
            user_id: "user_1".into(),
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
        };
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_actor() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let result = client.create_user(CreateUserRequest::default()).await;
        assert!(matches!(result, Err(UserError::Validation(_))));

        drop(client);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_update_user_maps_not_found() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let update_task = tokio::spawn(async move {
            client
                .update_user(
                    "missing".into(),
                    UpdateUserRequest { first_name: Some("A".into()), last_name: Some("B".into()) },
                )
                .await
        });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "missing");
        responder.send(Ok(Some(existing("missing")))).unwrap();

        // Deleted between the lookup and the update.
        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "missing");
        assert_eq!(patch.first_name, "A");
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(UserError::NotFound("missing".into())));
    }

    #[tokio::test]
    async fn test_update_unknown_user_skips_body_checks() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let update_task = tokio::spawn(async move {
            client
                .update_user(
                    "ghost".into(),
                    UpdateUserRequest { first_name: Some("Grace".into()), last_name: None },
                )
                .await
        });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "ghost");
        responder.send(Ok(None)).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(UserError::NotFound("ghost".into())));
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_update_existing_user_still_validates() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let update_task = tokio::spawn(async move {
            client
                .update_user("user_1".into(), UpdateUserRequest { first_name: None, last_name: None })
                .await
        });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        responder.send(Ok(Some(existing("user_1")))).unwrap();

        let result = update_task.await.unwrap();
        assert!(matches!(result, Err(UserError::Validation(_))));
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_get_user_passes_through() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_user("user_9".into()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "user_9");
        responder.send(Ok(None)).unwrap();

        assert_eq!(get_task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_user("user_1".into()).await });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        drop(responder);

        assert_eq!(
            get_task.await.unwrap(),
            Err(UserError::ActorCommunicationError("Actor dropped".into()))
        );
    }
}
