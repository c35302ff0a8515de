use async_trait::async_trait;

use super::{
    models::{
        message::{ComposedMessage, MailRouting},
        request::ContactRequest,
        submission::{ContactPolicy, ContactSubmission},
    },
    ports::{ContactNotifier, ContactService, ContactServiceError},
};

#[derive(Debug)]
pub struct Contact<N>
where
    N: ContactNotifier,
{
    pub notifier: N,
    routing: MailRouting,
    policy: ContactPolicy,
}

impl<N> Contact<N>
where
    N: ContactNotifier,
{
    pub fn new(notifier: N, routing: MailRouting, policy: ContactPolicy) -> Self {
        Self {
            notifier,
            routing,
            policy,
        }
    }
}

#[async_trait]
impl<N> ContactService for Contact<N>
where
    N: ContactNotifier,
{
    #[tracing::instrument(
        name = "Relaying a contact submission",
        skip(self, request),
        fields(sender_email = tracing::field::Empty, service = tracing::field::Empty)
    )]
    async fn submit(
        &self,
        request: ContactRequest,
    ) -> Result<ContactSubmission, ContactServiceError> {
        let submission = ContactSubmission::parse(request, &self.policy)?;
        tracing::Span::current()
            .record("sender_email", tracing::field::display(submission.email()))
            .record("service", tracing::field::display(submission.service_label()));

        let message = ComposedMessage::compose(&submission, &self.routing);
        self.notifier.send(&message).await?;

        Ok(submission)
    }
}
