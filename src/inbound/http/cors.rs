use crate::configuration::CorsSettings;
use actix_web::http::header::{self, HeaderValue, InvalidHeaderValue};
use actix_web::middleware::DefaultHeaders;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Cross-origin headers attached to every response, validated once at startup.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_credentials: bool,
}

impl CorsHeaders {
    pub fn middleware(&self) -> DefaultHeaders {
        let headers = DefaultHeaders::new()
            .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone()))
            .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
            .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS));
        if self.allow_credentials {
            headers.add((header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"))
        } else {
            headers
        }
    }
}

impl TryFrom<&CorsSettings> for CorsHeaders {
    type Error = InvalidHeaderValue;

    fn try_from(settings: &CorsSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&settings.allow_origin)?,
            allow_credentials: settings.allow_credentials,
        })
    }
}
