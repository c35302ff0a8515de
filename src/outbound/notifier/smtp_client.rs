use crate::configuration::{RelaySettings, SmtpSettings};
use crate::domain::contact::{
    models::message::ComposedMessage,
    ports::{ContactNotifier, ContactNotifierError},
};
use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

pub const IMPLICIT_TLS_PORT: u16 = 465;

/// How the relay connection is secured, chosen by port convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity {
    ImplicitTls,
    OpportunisticStartTls,
}

impl TransportSecurity {
    pub fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            TransportSecurity::ImplicitTls
        } else {
            TransportSecurity::OpportunisticStartTls
        }
    }
}

/// Relays composed messages through an authenticated SMTP server. A fresh
/// connection is opened for every message and closed once it is sent.
#[derive(Debug, Clone)]
pub struct SmtpClient {
    settings: SmtpSettings,
}

impl SmtpClient {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn transport(
        &self,
        relay: &RelaySettings,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, ContactNotifierError> {
        let tls_parameters = TlsParameters::new(relay.host.clone()).map_err(|e| {
            ContactNotifierError::Configuration(format!(
                "Invalid TLS parameters for {}: {}",
                relay.host, e
            ))
        })?;
        let tls = match TransportSecurity::for_port(relay.port) {
            TransportSecurity::ImplicitTls => Tls::Wrapper(tls_parameters),
            TransportSecurity::OpportunisticStartTls => Tls::Opportunistic(tls_parameters),
        };
        let credentials = Credentials::new(
            relay.username.clone(),
            relay.password.expose_secret().to_string(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(relay.host.as_str())
                .port(relay.port)
                .tls(tls)
                .credentials(credentials)
                .timeout(Some(self.settings.timeout()))
                .build(),
        )
    }
}

#[async_trait]
impl ContactNotifier for SmtpClient {
    #[tracing::instrument(
        name = "Sending a contact email through the SMTP relay",
        skip(self, message),
        fields(relay_host = tracing::field::Empty, relay_port = tracing::field::Empty)
    )]
    async fn send(&self, message: &ComposedMessage) -> Result<(), ContactNotifierError> {
        let relay = self
            .settings
            .relay()
            .map_err(|e| ContactNotifierError::Configuration(e.to_string()))?;
        tracing::Span::current()
            .record("relay_host", tracing::field::display(&relay.host))
            .record("relay_port", relay.port);

        let email = build_message(message)?;
        let transport = self.transport(&relay)?;

        let timeout = self.settings.timeout();
        match tokio::time::timeout(timeout, transport.send(email)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ContactNotifierError::Delivery(anyhow::Error::new(e))),
            Err(_) => Err(ContactNotifierError::Delivery(anyhow::anyhow!(
                "SMTP relay did not complete the transaction within {:?}",
                timeout
            ))),
        }
    }
}

fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, ContactNotifierError> {
    address.parse().map_err(|e| {
        ContactNotifierError::Configuration(format!("Invalid {} address {}: {}", role, address, e))
    })
}

pub(crate) fn build_message(message: &ComposedMessage) -> Result<Message, ContactNotifierError> {
    let from = parse_mailbox(message.from(), "sender")?;
    let to = parse_mailbox(message.to(), "recipient")?;
    let envelope = Envelope::new(Some(from.email.clone()), vec![to.email.clone()])
        .map_err(|e| ContactNotifierError::Configuration(e.to_string()))?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject())
        .envelope(envelope);
    if let Some(reply_to) = message.reply_to() {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(
                error = %e,
                reply_to,
                "Dropping a Reply-To address the mail library cannot represent"
            ),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            message.text_body().to_string(),
            message.html_body().to_string(),
        ))
        .map_err(|e| ContactNotifierError::Delivery(anyhow::Error::new(e)))
}
