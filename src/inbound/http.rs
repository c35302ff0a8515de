use crate::configuration::ApplicationSettings;
use crate::domain::contact::ports::ContactService;
use crate::inbound::http::cors::CorsHeaders;
use crate::inbound::http::handlers::{contact, health_check, method_not_allowed, preflight};
use crate::inbound::http::state::SharedContactState;
use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod cors;
mod errors;
mod handlers;
pub mod state;

pub use errors::AppError;

pub const CONTACT_PATH: &str = "/api/contact";

pub struct Application {
    port: u16,
    server: Server,
}

fn run<CS: ContactService>(
    listener: TcpListener,
    cors: CorsHeaders,
    max_body_bytes: usize,
    contact_state: SharedContactState<CS>,
) -> Result<Server, std::io::Error> {
    let contact_state = web::Data::new(contact_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors.middleware())
            .wrap(TracingLogger::default())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .app_data(contact_state.clone())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource(CONTACT_PATH)
                    .route(web::post().to(contact::<CS>))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::route().to(method_not_allowed)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

impl Application {
    pub async fn build<CS: ContactService>(
        contact_service: CS,
        configuration: ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let cors = CorsHeaders::try_from(&configuration.cors)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let contact_state = SharedContactState::new(contact_service);
        let server = run(
            listener,
            cors,
            configuration.max_body_bytes,
            contact_state,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
