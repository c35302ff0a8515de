use crate::domain::contact::models::submission::ContactPolicy;
use crate::domain::contact::models::message::MailRouting;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Variables understood without the `APP_` prefix, mapped onto their settings key.
const WELL_KNOWN_VARIABLES: [(&str, &str); 6] = [
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("CONTACT_TO", "contact.recipient"),
    ("FROM_EMAIL", "contact.sender"),
];

const DEFAULT_RECIPIENT: &str = "business@felder-itsolutions.at";
const DEFAULT_FALLBACK_SENDER: &str = "no-reply@felder-itsolutions.at";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub general: GeneralSettings,
    pub application: ApplicationSettings,
    pub smtp: SmtpSettings,
    pub contact: ContactSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeneralSettings {
    pub log_level: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Upper bound on a request body; larger bodies are answered with 413.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_body_bytes: usize,
    pub cors: CorsSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CorsSettings {
    pub allow_origin: String,
    pub allow_credentials: bool,
}

/// Relay settings as found in the environment. Every connection field is
/// optional here; completeness is checked per dispatch by [`SmtpSettings::relay`].
#[derive(serde::Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    #[serde(default)]
    pub host: Option<String>,
    /// Kept as text so a malformed `SMTP_PORT` is reported per request
    /// instead of failing startup.
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    pub timeout_milliseconds: u64,
}

#[derive(Clone, Debug)]
pub struct RelaySettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("SMTP configuration missing: {}", .0.join(", "))]
pub struct MissingRelaySettings(pub Vec<&'static str>);

impl SmtpSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Empty, non-numeric and zero ports count as missing.
    pub fn port_number(&self) -> Option<u16> {
        non_empty(self.port.as_deref())
            .and_then(|port| port.parse::<u16>().ok())
            .filter(|port| *port != 0)
    }

    /// Returns the complete connection settings, or the names of the missing
    /// ones. Empty strings count as missing.
    pub fn relay(&self) -> Result<RelaySettings, MissingRelaySettings> {
        let host = non_empty(self.host.as_deref());
        let port = self.port_number();
        let username = non_empty(self.username.as_deref());
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().trim().is_empty());

        match (host, port, username, password) {
            (Some(host), Some(port), Some(username), Some(password)) => Ok(RelaySettings {
                host: host.to_string(),
                port,
                username: username.to_string(),
                password: password.clone(),
            }),
            (host, port, username, password) => {
                let mut missing = Vec::new();
                if host.is_none() {
                    missing.push("SMTP_HOST");
                }
                if port.is_none() {
                    missing.push("SMTP_PORT");
                }
                if username.is_none() {
                    missing.push("SMTP_USER");
                }
                if password.is_none() {
                    missing.push("SMTP_PASS");
                }
                Err(MissingRelaySettings(missing))
            }
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ContactSettings {
    pub recipient: String,
    #[serde(default)]
    pub sender: Option<String>,
    pub fallback_sender: String,
    pub require_service: bool,
    pub require_message: bool,
}

impl ContactSettings {
    pub fn policy(&self) -> ContactPolicy {
        ContactPolicy {
            require_service: self.require_service,
            require_message: self.require_message,
        }
    }
}

impl Settings {
    pub fn log_level(&self) -> String {
        self.general.log_level.clone()
    }

    /// The sender prefers an explicit address, then the relay login, then the
    /// fixed fallback. The submitter's address is never used here.
    pub fn mail_routing(&self) -> MailRouting {
        let sender = non_empty(self.contact.sender.as_deref())
            .or_else(|| non_empty(self.smtp.username.as_deref()))
            .unwrap_or(self.contact.fallback_sender.as_str())
            .to_string();
        let recipient = non_empty(Some(self.contact.recipient.as_str()))
            .unwrap_or(DEFAULT_RECIPIENT)
            .to_string();
        MailRouting { sender, recipient }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    set_defaults(&mut settings)?;
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;
    apply_well_known_variables(&mut settings, |name| std::env::var(name).ok())?;

    settings.try_into()
}

fn set_defaults(settings: &mut config::Config) -> Result<(), config::ConfigError> {
    settings.set_default("general.log_level", "info")?;
    settings.set_default("application.max_body_bytes", 262_144_i64)?;
    settings.set_default("application.cors.allow_origin", "*")?;
    settings.set_default("application.cors.allow_credentials", false)?;
    settings.set_default("smtp.timeout_milliseconds", 10_000_i64)?;
    settings.set_default("contact.recipient", DEFAULT_RECIPIENT)?;
    settings.set_default("contact.fallback_sender", DEFAULT_FALLBACK_SENDER)?;
    settings.set_default("contact.require_service", true)?;
    settings.set_default("contact.require_message", true)?;
    Ok(())
}

fn apply_well_known_variables<F>(
    settings: &mut config::Config,
    lookup: F,
) -> Result<(), config::ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, key) in WELL_KNOWN_VARIABLES {
        if let Some(value) = lookup(variable).filter(|v| !v.trim().is_empty()) {
            settings.set(key, value)?;
        }
    }
    Ok(())
}
