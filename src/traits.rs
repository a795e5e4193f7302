use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::reminder::{NotificationOptions, NotificationRequest};

/// A system service that is able to display local notifications at a given time.
///
/// Implementations own the registry of pending notifications, keyed by [`NotificationRequest::id`].
/// Every method may complete at an arbitrary later time, and completions for different IDs may come in any order.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Ask the user whether notifications are allowed. Returns whether they were granted.
    /// A denial does not prevent further calls to [`Self::register`], these notifications will just never show up.
    async fn request_permission(&self, options: NotificationOptions) -> Result<bool, ServiceError>;

    /// Add a pending notification.
    /// This may fail, e.g. in case too many notifications are pending, or the request is not valid.
    async fn register(&self, request: NotificationRequest) -> Result<(), ServiceError>;

    /// Remove the pending notification with this ID. Removing a notification that does not exist is not an error.
    async fn cancel(&self, id: &str);

    /// Returns the IDs of the notifications that are currently pending
    async fn pending_ids(&self) -> Result<Vec<String>, ServiceError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl<S> NotificationService for Arc<S>
where
    S: NotificationService + ?Sized,
{
    async fn request_permission(&self, options: NotificationOptions) -> Result<bool, ServiceError> {
        (**self).request_permission(options).await
    }

    async fn register(&self, request: NotificationRequest) -> Result<(), ServiceError> {
        (**self).register(request).await
    }

    async fn cancel(&self, id: &str) {
        (**self).cancel(id).await
    }

    async fn pending_ids(&self) -> Result<Vec<String>, ServiceError> {
        (**self).pending_ids().await
    }
}
