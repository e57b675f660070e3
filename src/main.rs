use std::io;

use actix_cors::Cors;
use actix_web::{
    http::StatusCode,
    middleware::{Condition, ErrorHandlers, Logger},
    web, App, HttpServer,
};
use taskdesk::{
    auth::TokenService, config::Config, error::expose_internal_error, routes, state::AppState,
    store::Stores,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let stores = Stores::connect(&config.database_url).await.map_err(|e| {
        log::error!("Failed to open the store: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl);
    let state = web::Data::new(AppState::new(&stores, tokens));
    let expose_errors = !config.is_production();

    log::info!("Starting TaskDesk server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Condition::new(
                expose_errors,
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, expose_internal_error),
            ))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config))
            .service(web::scope("/api").configure(routes::config))
            .default_service(web::route().to(routes::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    log::info!("Server stopped");
    stores.close().await;
    Ok(())
}
