#![deny(missing_docs)]
//! vesselid server executable.
//!
//! Hosts HTTP endpoints for IMO and MMSI validation and MID lookup.

mod config;
mod openapi;
mod routes;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use log::info;

#[cfg(not(test))]
use crate::config::ServerConfig;

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let listen_addr = config.listen_addr();
    let allowed_origins = config.allowed_origins.clone();
    info!("vesselid server listening on {listen_addr}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .configure(routes::configure)
        })
        .bind((config.host.as_str(), config.port))
        .map_err(|err| {
            std::io::Error::new(err.kind(), format!("Can't bind {listen_addr}: {err}"))
        })?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
