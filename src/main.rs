mod domain;
mod validation;
mod clients;

mod api;
mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;

use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use tracing::info;

use crate::app_system::{setup_tracing, Config, UserSystem};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();

    setup_tracing();

    info!(host = %config.host, port = config.port, "Starting user service");

    let system = UserSystem::new(config.store_buffer);
    let user_client = web::Data::new(system.user_client.clone());

    let app = move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(user_client.clone())
            .service(api::bind_services(web::scope("/users")))
    };

    let mut http_server = HttpServer::new(app);
    if let Some(workers) = config.workers {
        http_server = http_server.workers(workers);
    }
    http_server.bind((config.host.as_str(), config.port))?.run().await?;

    info!("HTTP server stopped");

    system
        .shutdown()
        .await
        .map_err(std::io::Error::other)?;

    info!("Application completed successfully");
    Ok(())
}
