mod auth;
mod config;
mod errors;
mod resolver;
mod routes;

use std::io;

use actix_web::{middleware, web, App, HttpServer, ResponseError};
use tokio::time;

use config::{EnvConfig, Settings};
use errors::ServiceError;
use resolver::ProxyResolver;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[cfg(feature = "error_reporting")]
    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").map_err(|_| io::Error::new(io::ErrorKind::Other, "SENTRY_DSN not set"))?,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let resolver = web::Data::new(ProxyResolver::new(EnvConfig));

    match resolver.resolve_proxy() {
        Some(proxy) => log::info!("using proxy {}", proxy),
        None => log::info!("no proxy configured, connecting directly"),
    }

    let bind_address = settings.bind_address.clone();
    let cleanup_interval = settings.cleanup_interval;
    let settings = web::Data::new(settings);

    // avoid move to server
    let cloned_resolver = resolver.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(settings.clone())
            .app_data(cloned_resolver.clone())
            .configure(routes::config)
            .default_service(web::route().to(|| async { ServiceError::NotFound.error_response() }))
    })
    .bind(&bind_address)?
    .run();

    log::info!("listening on {}", bind_address);

    actix_rt::spawn(async move {
        let mut interval = time::interval(cleanup_interval);

        loop {
            interval.tick().await;

            resolver.cleanup_expired_identifiers().await;

            log::debug!(
                "{} identifiers tracked after cleanup",
                resolver.used_identifier_count().await
            );
        }
    });

    server.await
}
