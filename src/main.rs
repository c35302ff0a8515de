use contact_relay::configuration::get_configuration;
use contact_relay::domain::contact::service::Contact;
use contact_relay::inbound::http::Application;
use contact_relay::outbound::notifier::smtp_client::SmtpClient;
use contact_relay::outbound::telemetry::init_logger;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let configuration = get_configuration().expect("Failed to read configuration");
    init_logger("contact-relay", &configuration.log_level(), std::io::stdout);

    if let Err(missing) = configuration.smtp.relay() {
        tracing::warn!(%missing, "Contact submissions will be rejected until the relay is configured");
    }

    let routing = configuration.mail_routing();
    let policy = configuration.contact.policy();
    let smtp_client = SmtpClient::new(configuration.smtp);
    let contact_service = Contact::new(smtp_client, routing, policy);
    let application = Application::build(contact_service, configuration.application).await?;

    application.run_until_stopped().await
}
