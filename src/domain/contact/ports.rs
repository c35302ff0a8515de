use async_trait::async_trait;

use super::{
    errors::ValidationError,
    models::{message::ComposedMessage, request::ContactRequest, submission::ContactSubmission},
};

#[async_trait]
pub trait ContactService: Send + Sync + 'static {
    /// Validates the request and relays it as one email. Validation failures
    /// return before any network I/O.
    async fn submit(&self, request: ContactRequest)
        -> Result<ContactSubmission, ContactServiceError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ContactServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Relay configuration error: {0}")]
    Configuration(String),

    #[error("Failed to deliver the contact message")]
    Delivery(#[source] anyhow::Error),
}

impl From<ContactNotifierError> for ContactServiceError {
    fn from(error: ContactNotifierError) -> Self {
        match error {
            ContactNotifierError::Configuration(s) => ContactServiceError::Configuration(s),
            ContactNotifierError::Delivery(e) => ContactServiceError::Delivery(e),
        }
    }
}

/// Delivers a composed message. Implementations make exactly one attempt and
/// never retry.
#[async_trait]
pub trait ContactNotifier: Send + Sync + 'static {
    async fn send(&self, message: &ComposedMessage) -> Result<(), ContactNotifierError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ContactNotifierError {
    #[error("Relay configuration error: {0}")]
    Configuration(String),

    #[error("Failed to deliver message through the relay")]
    Delivery(#[source] anyhow::Error),
}
